//! Benchmarks for rendering and extracting text from loaded documents
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use loupe_query::{load, Options};

fn markup(rows: usize) -> String {
    let mut markup = String::from("<table>");
    for row in 0..rows {
        markup.push_str(&format!(
            r#"<tr class="row-{row}"><td>{row} &amp; more</td><td><a href="/{row}">link</a></td><!-- {row} --></tr>"#
        ));
    }
    markup.push_str("</table>");
    markup
}

/// # Panics
/// If a selector is invalid
pub fn criterion_benchmark(c: &mut Criterion) {
    for rows in [10, 1_000] {
        let query = load(&markup(rows), &Options::default());
        let all = query.root();

        c.bench_with_input(BenchmarkId::new("text", rows), &all, |b, all| {
            b.iter(|| black_box(all.text()));
        });
        c.bench_with_input(BenchmarkId::new("html", rows), &query, |b, query| {
            b.iter(|| black_box(query.html(None).unwrap()));
        });
        c.bench_with_input(BenchmarkId::new("select", rows), &query, |b, query| {
            b.iter(|| black_box(query.select("tr > td a[href]", None, None).unwrap().len()));
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
