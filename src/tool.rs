// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! CLI tool for loading a corpus into an autocomplete index and querying it
//! interactively.
//!
//! Grounded on the reference crate's own `tool.rs`: a `clap` argument struct,
//! a `rustyline`-backed REPL, a `log`-into-`tracing` bridge with a panic
//! hook, and a `die!` macro for fatal startup errors.

use autocomplete_tst::corpus::{bench_probes, cities_lines};
use autocomplete_tst::{AutocompleteIndex, CopyIndex, FindOutcome, IndexConfig, InsertOutcome};
use clap::{ArgAction, Parser};
use rustyline::DefaultEditor;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

macro_rules! die {
    ($fmt:literal, $($arg:tt)*) => {{
        eprintln!($fmt, $($arg)*);
        std::process::exit(1);
    }};

    ($msg:literal) => {{
        eprintln!($msg);
        std::process::exit(1);
    }};
}

fn init_tracing(quiet: bool, verbose: u8) -> LevelFilter {
    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    tracing_log::LogTracer::init().expect("failed to set log tracer");

    let registry = Registry::default();
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("TST_LOG")
        .from_env_lossy()
        .add_directive("rustyline=warn".parse().expect("valid directive"));

    let subscriber = registry.with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        die!("INTERNAL ERROR: setting default tracing::subscriber failed");
    }

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing_panic::panic_hook(info);
        prev_hook(info);
    }));

    level_filter
}

/// CLI tool for the ternary-search-tree autocomplete index
#[derive(Parser, Debug)]
#[command(name = "tst")]
#[command(about = "Load a corpus and query it with an autocomplete index")]
struct ToolArgs {
    /// Path to a `cities.txt`-style corpus file, one record per line
    corpus: PathBuf,

    /// Number of bits in the Bloom filter's bit array
    #[arg(long, default_value_t = 5_000_000)]
    bloom_bits: usize,

    /// Suppress all output except for errors
    #[arg(short, long)]
    quiet: bool,

    /// Turn on verbose output; repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Run one command non-interactively then exit: `--bench f paris`
    #[arg(long, num_args = 2, value_names = ["CMD", "ARG"])]
    bench: Option<Vec<String>>,

    /// Run the scripted `cities5000.txt` prefix benchmark and write
    /// `bench_cpy.txt`, then exit
    #[arg(long)]
    bench_artifact: Option<PathBuf>,
}

enum CommandResult {
    Continue,
    Exit,
}

fn run_command(index: &mut CopyIndex, line: &str) -> CommandResult {
    let line = line.trim();
    if line.is_empty() {
        return CommandResult::Continue;
    }

    let mut parts = line.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or_default();
    let arg = parts.next().unwrap_or_default().trim();

    match cmd {
        "a" => match index.add_one(arg.as_bytes()) {
            Ok(InsertOutcome::Inserted(_)) => println!("inserted \"{arg}\""),
            Ok(InsertOutcome::Duplicate(_)) => println!("\"{arg}\" already present, refcnt incremented"),
            Ok(InsertOutcome::SkippedByBloomGate) => {
                println!("\"{arg}\" skipped (Bloom filter reports it as possibly present)");
            }
            Err(e) => eprintln!("error: {e}"),
        },
        "f" => match index.find(arg.as_bytes()) {
            FindOutcome::Found(handle) => {
                println!("found \"{}\"", String::from_utf8_lossy(index.bytes(handle)));
            }
            FindOutcome::NotPresent => println!("\"{arg}\" not present"),
            FindOutcome::BloomFalsePositive => {
                println!("Bloom filter suggested \"{arg}\" but the tree disagrees (false positive)");
            }
        },
        "s" => {
            let matches = index.prefix(arg.as_bytes(), 20);
            if matches.is_empty() {
                println!("no matches for prefix \"{arg}\"");
            } else {
                for handle in matches {
                    println!("{}", String::from_utf8_lossy(index.bytes(handle)));
                }
            }
        }
        "d" => match index.delete(arg.as_bytes()) {
            Ok(autocomplete_tst::DeleteOutcome::Removed) => println!("removed \"{arg}\""),
            Ok(autocomplete_tst::DeleteOutcome::StillReferenced(n)) => {
                println!("\"{arg}\" still referenced ({n} remaining)");
            }
            Err(e) => eprintln!("error: {e}"),
        },
        "q" => return CommandResult::Exit,
        other => eprintln!("unknown command: {other} (expected a/f/s/d/q)"),
    }

    CommandResult::Continue
}

fn load_corpus(index: &mut CopyIndex, path: &Path) {
    let text = fs::read_to_string(path).unwrap_or_else(|e| die!("error: failed to read {}: {e}", path.display()));

    let start = Instant::now();
    let loaded = match index.load(cities_lines(&text).map(str::as_bytes)) {
        Ok(n) => n,
        Err(e) => die!("error: corpus load failed: {e}"),
    };
    info!("loaded {loaded} keys from {} in {:?}", path.display(), start.elapsed());
}

fn run_bench_artifact(index: &CopyIndex, corpus5000: &Path, out_path: &Path) {
    let text = fs::read_to_string(corpus5000)
        .unwrap_or_else(|e| die!("error: failed to read {}: {e}", corpus5000.display()));

    let mut out = fs::File::create(out_path).unwrap_or_else(|e| die!("error: failed to create {}: {e}", out_path.display()));

    for (idx, (prefix, _word)) in bench_probes(&text).enumerate() {
        let start = Instant::now();
        let _ = index.prefix(prefix, 1024);
        let micros = start.elapsed().as_secs_f64() * 1_000_000.0;
        writeln!(out, "{idx} {micros:.6}").unwrap_or_else(|e| die!("error: failed to write bench artifact: {e}"));
    }
}

fn run_repl(index: &mut CopyIndex) {
    println!("Welcome to the autocomplete shell. Commands: a <word>, f <word>, s <prefix>, d <word>, q.");

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => die!("error initializing line editor: {e}"),
    };

    loop {
        match rl.readline("tst> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if let CommandResult::Exit = run_command(index, &line) {
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => continue,
            Err(rustyline::error::ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => die!("error reading input: {e}"),
        }
    }
}

fn main() {
    let args = ToolArgs::parse();
    let level_filter = init_tracing(args.quiet, args.verbose);
    info!("starting {} ({}), log level: {level_filter}", "tst", env!("CARGO_PKG_VERSION"));

    let mut index = CopyIndex::new(IndexConfig::default().bloom_bits(args.bloom_bits));
    load_corpus(&mut index, &args.corpus);

    if let Some(out_path) = &args.bench_artifact {
        run_bench_artifact(&index, &args.corpus, out_path);
        return;
    }

    if let Some(bench) = &args.bench {
        let [cmd, arg] = bench.as_slice() else {
            die!("error: --bench expects exactly two values: CMD ARG");
        };
        let line = format!("{cmd} {arg}");
        run_command(&mut index, &line);
        return;
    }

    run_repl(&mut index);
}
