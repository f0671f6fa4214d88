// src/cli.rs
use std::{env, error::Error, fs, path::{Path, PathBuf}};

use crate::{
    config::CrawlOptions,
    core::HttpFetcher,
    crawl,
    frontier::Frontier,
    progress::Progress,
    spider,
    store::WordSink,
};

pub type CliResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Debug, PartialEq)]
pub enum Command {
    Crawl(CrawlOptions),
    File { path: PathBuf, opts: CrawlOptions },
    Help,
}

/// Progress on stderr, one line per page.
struct ConsoleProgress {
    done: usize,
    failed: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.failed = 0;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, url: &str, summary: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {summary} <- {url}", self.done + self.failed, self.total);
    }
    fn item_failed(&mut self, url: &str, reason: &str) {
        self.failed += 1;
        eprintln!("[{}/{}] skipped {url}: {reason}", self.done + self.failed, self.total);
    }
    fn finish(&mut self) {
        eprintln!("Crawl complete");
    }
}

pub fn run() -> CliResult<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Help => {
            eprintln!(include_str!("cli_help.txt"));
            Ok(())
        }
        Command::File { path, opts } => run_file(&path, &opts),
        Command::Crawl(opts) => run_crawl(&opts),
    }
}

fn run_crawl(opts: &CrawlOptions) -> CliResult<()> {
    let fetcher = HttpFetcher::new()?;
    let mut sink = match &opts.output.words {
        Some(path) => Some(WordSink::create(path)?),
        None => None,
    };
    if let Some(s) = &sink {
        eprintln!("Writing words to {}", s.path().display());
    }
    let mut progress = ConsoleProgress { done: 0, failed: 0, total: 0 };

    let summary = crawl::run(opts, &fetcher, Some(&mut progress), sink.as_mut())?;

    println!(
        "{} page(s) ok, {} skipped, {} url(s) seen",
        summary.pages_ok, summary.pages_failed, summary.seen
    );
    if let Some(s) = sink {
        let written = s.written();
        let path = s.finish()?;
        println!("Wrote {written} word(s) to {}", path.display());
    }
    Ok(())
}

fn run_file(path: &Path, opts: &CrawlOptions) -> CliResult<()> {
    let doc = fs::read_to_string(path)?;
    let frontier = Frontier::new();
    let outcome = spider::parse_page(&doc, &frontier, opts.output.debug_dump.as_deref())?;

    println!("{}", outcome.word);
    for variant in &outcome.word.variants {
        println!("  {variant}");
    }
    if let Some(p) = &outcome.word.pronunciation {
        println!("  {p}");
    }
    for example in &outcome.word.examples {
        println!("  {example}");
    }
    if !outcome.related.is_empty() {
        let terms: Vec<String> = outcome.related.iter().map(|w| format!("{} ({})", w.term, w.similarity)).collect();
        println!("related synonyms: {}", terms.join(", "));
    }
    for url in &outcome.new_urls {
        println!("{url}");
    }
    Ok(())
}

pub fn parse_args(args: &[String]) -> CliResult<Command> {
    let mut opts = CrawlOptions::default();
    let mut file: Option<PathBuf> = None;

    let mut args = args.iter().peekable();
    while let Some(a) = args.next() {
        match a.as_str() {
            "-s" | "--start" => {
                let v = args.next().ok_or("Missing value for --start")?;
                let items: Vec<&str> = v.split(',').collect();
                opts.set_start(&items);
                if opts.start_urls.is_empty() {
                    return Err("No start words given".into());
                }
            }
            "-n" | "--max-pages" => {
                let v: usize = args.next().ok_or("Missing value for --max-pages")?.parse()?;
                opts.max_pages = Some(v);
            }
            "-d" | "--max-depth" => {
                let v: usize = args.next().ok_or("Missing value for --max-depth")?.parse()?;
                opts.max_depth = Some(v);
            }
            "-w" | "--workers" => {
                let v: usize = args.next().ok_or("Missing value for --workers")?.parse()?;
                if v == 0 { return Err("Workers must be at least 1".into()); }
                opts.workers = v;
            }
            "--delay-ms" => {
                opts.pause_ms = args.next().ok_or("Missing value for --delay-ms")?.parse()?;
            }
            "-o" | "--out" => {
                opts.output.words = Some(PathBuf::from(args.next().ok_or("Missing output path")?));
            }
            "--no-out" => opts.output.words = None,
            "--dump" => {
                // Optional value: only taken when it doesn't look like a flag.
                let path = args.next_if(|v| !v.starts_with('-')).map(PathBuf::from);
                opts.output.enable_dump(path);
            }
            "--no-dump" => opts.output.debug_dump = None,
            "-f" | "--file" => {
                file = Some(PathBuf::from(args.next().ok_or("Missing value for --file")?));
            }
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(match file {
        Some(path) => Command::File { path, opts },
        None => Command::Crawl(opts),
    })
}
