//! Suggestion Benchmarking Tool
//!
//! Measures dictionary indexing and suggestion throughput on a real word
//! list, one word per line.
//!
//! ## What It Benchmarks
//!
//! 1. **Index**: Building a snapshot from the whole dictionary
//! 2. **Suggest**: Answering misspelled queries against that snapshot
//!
//! ## Usage
//!
//! ```bash
//! # Queries are one-deletion variants of dictionary words
//! ./target/release/suggest_bench /path/to/words.txt
//!
//! # Queries read from a second word list
//! ./target/release/suggest_bench /path/to/words.txt /path/to/queries.txt
//!
//! # With the `trace` feature, RUST_LOG controls log output
//! RUST_LOG=gramspell_core=debug ./target/release/suggest_bench words.txt
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Suggest ===
//! --------------------------------
//! Mode        : Suggest
//! Elapsed     : 0.412 s
//! Items       : 10_000
//! Items/sec   : 24_271
//! --------------------------------
//! ```

use std::env;
use std::hint::black_box;
use std::time::{Duration, Instant};

use gramspell_core::dictionary::stream_words_from_path;
use gramspell_core::{PlainTextDictionary, Result, Suggester};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;
const MAX_QUERIES: usize = 10_000;
const SUGGESTIONS_PER_QUERY: usize = 5;

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: suggest_bench <dictionary> [queries]");
        std::process::exit(1);
    }

    println!("Loading dictionary...");
    let dictionary = PlainTextDictionary::from_path(&args[1])?;
    let words: Vec<&str> = dictionary.words().collect();

    let queries: Vec<String> = match args.get(2) {
        Some(path) => stream_words_from_path(path)?
            .take(MAX_QUERIES)
            .collect::<std::io::Result<_>>()?,
        None => deletion_variants(&words, MAX_QUERIES),
    };

    println!("Words:     {}", fmt_count(words.len() as u64));
    println!("Queries:   {}\n", fmt_count(queries.len() as u64));

    bench_index(&words);
    bench_suggest(&words, &queries)?;

    Ok(())
}

#[cfg(feature = "trace")]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gramspell_core=info")),
        )
        .init();
}

#[cfg(not(feature = "trace"))]
fn init_tracing() {}

/// Drops the middle character of evenly spaced words.
fn deletion_variants(words: &[&str], limit: usize) -> Vec<String> {
    let step = (words.len() / limit.max(1)).max(1);
    words
        .iter()
        .step_by(step)
        .filter(|w| w.chars().count() > 3)
        .take(limit)
        .map(|w| {
            let mid = w.chars().count() / 2;
            w.chars()
                .enumerate()
                .filter_map(|(i, c)| (i != mid).then_some(c))
                .collect()
        })
        .collect()
}

fn bench_index(words: &[&str]) {
    println!("=== Index ===");

    warmup(|| {
        let suggester = Suggester::new();
        black_box(suggester.index_dictionary(words.iter().copied()).ok());
    });

    let mut accepted = 0u64;
    let elapsed = measure(|| {
        let suggester = Suggester::new();
        if let Ok(report) = suggester.index_dictionary(words.iter().copied()) {
            accepted = report.accepted as u64;
        }
        black_box(&suggester);
    });

    print_perf("Index", elapsed, accepted);
}

fn bench_suggest(words: &[&str], queries: &[String]) -> Result<()> {
    let suggester = Suggester::new();
    let report = suggester.index_dictionary(words.iter().copied())?;
    println!("{report}");
    println!("{}\n", suggester.stats());

    println!("=== Suggest ===");

    warmup(|| {
        for query in queries {
            black_box(suggester.suggest(query, SUGGESTIONS_PER_QUERY).ok());
        }
    });

    let mut found = 0u64;
    let elapsed = measure(|| {
        let mut local = 0u64;
        for query in queries {
            if let Ok(suggestions) = suggester.suggest(query, SUGGESTIONS_PER_QUERY) {
                local += u64::from(!suggestions.is_empty());
                black_box(suggestions);
            }
        }
        found = local;
    });

    print_perf("Suggest", elapsed, queries.len() as u64);
    println!(
        "Answered    : {} of {} queries\n",
        fmt_count(found),
        fmt_count(queries.len() as u64)
    );

    Ok(())
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, elapsed: Duration, items: u64) {
    let secs = elapsed.as_secs_f64();

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);

    if items > 0 {
        println!("Items       : {}", fmt_count(items));
        println!("Items/sec   : {}", fmt_count((items as f64 / secs) as u64));
    }

    println!("--------------------------------\n");
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
