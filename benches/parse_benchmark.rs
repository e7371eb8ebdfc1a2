//! Benchmarks for threatsort parsing and tabulation.
//!
//! Run with: cargo bench
//!
//! Inputs are synthetic word streams shaped like a weekly report section.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use threatsort::{build_tables, extract_countries, parse_words, ParseResult, WordToken};

const HEADERS: [&str; 4] = ["ACCESS", "DATA", "MALWARE", "OTHER"];
const PLACES: [&str; 5] = ["Germany", "the US", "a French", "Brazil", "Indonesia"];

/// Creates a word stream with `incidents` incidents spread over all headers.
fn create_word_stream(incidents: usize) -> Vec<WordToken> {
    let mut words = vec![
        WordToken::bold("THREAT"),
        WordToken::bold("DETAIL"),
    ];

    let per_header = incidents.div_ceil(HEADERS.len()).max(1);
    for (h, header) in HEADERS.iter().enumerate() {
        words.push(WordToken::bold(*header));
        for i in 0..per_header {
            let n = h * per_header + i;
            words.push(WordToken::bold(format!("actor{}", n % 37)));
            let description = format!(
                "{}. offered access to a retailer in {} on XSS for {} USD",
                i + 1,
                PLACES[n % PLACES.len()],
                500 + n
            );
            words.extend(description.split(' ').map(WordToken::regular));
        }
    }

    words.push(WordToken::bold("THREAT"));
    words.push(WordToken::bold("ACTIVITY"));
    words
}

/// Benchmark the word-stream parser at various sizes.
fn bench_parse_words(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_words");

    for incidents in [10, 100, 1000].iter() {
        let words = create_word_stream(*incidents);

        group.bench_function(format!("{}_incidents", incidents), |b| {
            b.iter(|| parse_words(black_box(&words)));
        });
    }

    group.finish();
}

/// Benchmark table construction over several documents.
fn bench_build_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tables");

    for documents in [1, 12, 52].iter() {
        let results: Vec<ParseResult> = (0..*documents)
            .map(|_| parse_words(&create_word_stream(40)))
            .collect();

        group.bench_function(format!("{}_documents", documents), |b| {
            b.iter(|| build_tables(black_box(&results)));
        });
    }

    group.finish();
}

/// Benchmark country extraction on a single description.
fn bench_country_extraction(c: &mut Criterion) {
    let description = "Access to a logistics firm in the United Kingdom and a German bank.";

    c.bench_function("extract_countries", |b| {
        b.iter(|| extract_countries(black_box(description)));
    });
}

criterion_group!(
    benches,
    bench_parse_words,
    bench_build_tables,
    bench_country_extraction,
);
criterion_main!(benches);
