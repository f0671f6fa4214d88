// tests/crawl.rs
//
// Crawl loop against an in-memory site: no network, no politeness delay.
//
mod common;

use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;

use serde_json::Value;
use thesaurus_scrape::config::{browse_url, CrawlOptions};
use thesaurus_scrape::core::Fetch;
use thesaurus_scrape::crawl;
use thesaurus_scrape::progress::Progress;
use thesaurus_scrape::spider;
use thesaurus_scrape::store::WordSink;
use thesaurus_scrape::{Frontier, Result, ScrapeError};

struct FakeSite {
    pages: HashMap<String, String>,
    hits: Mutex<Vec<String>>,
}

impl FakeSite {
    /// deny → refuse, reject (syn), allow (ant); refuse → deny, decline; reject → broken page.
    fn new() -> Self {
        let mut pages = HashMap::new();
        let mut add = |slug: &str, syns: &[&str], ants: &[&str]| {
            pages.insert(browse_url(slug), common::page_for(&common::word_api(slug, syns, ants)));
        };
        add("deny", &["refuse", "reject"], &["allow"]);
        add("refuse", &["deny", "decline"], &[]);
        add("allow", &[], &[]);
        add("decline", &["refuse"], &[]);
        pages.insert(browse_url("reject"), String::from("<html><script>window.X = 1;</script></html>"));
        Self { pages, hits: Mutex::new(Vec::new()) }
    }
}

impl Fetch for FakeSite {
    fn fetch(&self, url: &str) -> Result<String> {
        self.hits.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Http(format!("404 Not Found {url}")))
    }
}

#[derive(Default)]
struct Recorder {
    done: Vec<String>,
    failed: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn item_done(&mut self, url: &str, _summary: &str) {
        self.done.push(url.to_string());
    }
    fn item_failed(&mut self, url: &str, _reason: &str) {
        self.failed.push(url.to_string());
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

fn quiet_opts() -> CrawlOptions {
    let mut opts = CrawlOptions::default();
    opts.pause_ms = 0;
    opts.jitter_ms = 0;
    opts.output.words = None;
    opts
}

#[test]
fn crawls_every_reachable_page_once() {
    let site = FakeSite::new();
    let mut opts = quiet_opts();
    opts.workers = 3;
    let mut progress = Recorder::default();

    let summary = crawl::run(&opts, &site, Some(&mut progress), None).unwrap();

    let mut words = summary.words.clone();
    words.sort();
    assert_eq!(words, vec!["allow", "decline", "deny", "refuse"]);
    assert_eq!(summary.pages_ok, 4);
    assert_eq!(summary.pages_failed, 1);
    assert_eq!(summary.seen, 5);
    assert_eq!(summary.depth, 2);

    let hits = site.hits.lock().unwrap();
    assert_eq!(hits.len(), 5);
    assert_eq!(progress.failed, vec![browse_url("reject")]);
    assert_eq!(progress.done.len(), 4);
    assert!(progress.finished);
}

#[test]
fn limits_stop_the_crawl() {
    let site = FakeSite::new();
    let mut opts = quiet_opts();
    opts.max_depth = Some(0);
    let summary = crawl::run(&opts, &site, None, None).unwrap();
    assert_eq!(summary.words, vec!["deny"]);
    // Discovered but never fetched.
    assert_eq!(summary.seen, 4);

    let site = FakeSite::new();
    let mut opts = quiet_opts();
    opts.max_pages = Some(2);
    let summary = crawl::run(&opts, &site, None, None).unwrap();
    assert_eq!(summary.pages_ok + summary.pages_failed, 2);
    assert_eq!(site.hits.lock().unwrap().len(), 2);

    let site = FakeSite::new();
    let mut opts = quiet_opts();
    opts.max_pages = Some(0);
    let mut progress = Recorder::default();
    let summary = crawl::run(&opts, &site, Some(&mut progress), None).unwrap();
    assert_eq!(summary.pages_ok + summary.pages_failed, 0);
    assert!(site.hits.lock().unwrap().is_empty());
    assert!(progress.finished);
}

#[test]
fn unknown_start_page_is_skipped_not_fatal() {
    let site = FakeSite::new();
    let mut opts = quiet_opts();
    opts.set_start(&["missing", "allow"]);
    let summary = crawl::run(&opts, &site, None, None).unwrap();
    assert_eq!(summary.pages_failed, 1);
    assert_eq!(summary.words, vec!["allow"]);
}

#[test]
fn words_are_written_as_json_lines() {
    let dir = common::tmp_dir("sink");
    let path = dir.join("out").join("words.jsonl");
    let site = FakeSite::new();
    let opts = quiet_opts();

    let mut sink = WordSink::create(&path).unwrap();
    assert_eq!(sink.path(), path.as_path());
    let summary = crawl::run(&opts, &site, None, Some(&mut sink)).unwrap();
    assert_eq!(sink.written(), summary.pages_ok);
    let written = sink.finish().unwrap();

    let text = fs::read_to_string(written).unwrap();
    let entries: Vec<String> = text
        .lines()
        .map(|l| serde_json::from_str::<Value>(l).unwrap()["entry"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0], "deny");
}

#[test]
fn parse_page_dumps_state_and_expands_frontier() {
    let dir = common::tmp_dir("dump");
    let dump = dir.join("example.json");
    let site = FakeSite::new();
    let doc = site.fetch(&browse_url("deny")).unwrap();
    let frontier = Frontier::seeded([browse_url("deny")]);

    let outcome = spider::parse_page(&doc, &frontier, Some(&dump)).unwrap();
    assert_eq!(outcome.word.entry, "deny");
    assert_eq!(outcome.new_urls.len(), 3);
    assert!(outcome.related.is_empty());

    let state: Value = serde_json::from_str(&fs::read_to_string(&dump).unwrap()).unwrap();
    assert_eq!(state["config"]["ads"], Value::Null);
    assert_eq!(state["searchData"]["tunaApiData"]["entry"], "deny");
}

#[test]
fn state_is_found_past_scripts_that_only_mention_it() {
    let page = common::page_for(&common::word_api("deny", &["refuse"], &[]));
    let doc = page.replacen(
        "<script>window.dataLayer",
        "<script>var key = 'INITIAL_STATE'; // read by the app</script><script>window.dataLayer",
        1,
    );
    assert_eq!(doc.matches("INITIAL_STATE").count(), 2);

    let frontier = Frontier::new();
    let outcome = spider::parse_page(&doc, &frontier, None).unwrap();
    assert_eq!(outcome.word.entry, "deny");
    assert!(frontier.contains(&browse_url("refuse")));

    let only_mention = "<script>var key = 'INITIAL_STATE';</script>";
    assert!(matches!(spider::decode_page(only_mention), Err(ScrapeError::Extraction(_))));
}

#[test]
fn page_without_state_script_is_extraction_error() {
    let frontier = Frontier::new();
    let err = spider::parse_page("<html><body>nothing</body></html>", &frontier, None).unwrap_err();
    assert!(matches!(err, ScrapeError::Extraction(_)));
    assert!(frontier.is_empty());
}
