// src/config/consts.rs

// Site
pub const BASE_URL: &str = "https://www.thesaurus.com";
pub const BROWSE_PATH: &str = "/browse/";
pub const START_SLUG: &str = "deny";
pub const STATE_MARKER: &str = "INITIAL_STATE";

// Net
pub const USER_AGENT: &str = concat!("thesaurus_scrape/", env!("CARGO_PKG_VERSION"));
pub const TIMEOUT_SECS: u64 = 15;

// Local files
pub const LOG_FILE: &str = ".store/crawl.log";
pub const DEBUG_DUMP_FILE: &str = "example.json";
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_OUT_FILE: &str = "words.jsonl";

// Concurrency
pub const WORKERS: usize = 1;
pub const REQUEST_PAUSE_MS: u64 = 1000; // be polite
pub const JITTER_MS: u64 = 250; // extra 0..250 ms
