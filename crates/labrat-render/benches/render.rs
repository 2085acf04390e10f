//! Benchmarks for annotated text rendering.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use labrat_render::{Span, TrailingPolicy, render_html};

/// Build a post of `words` words where every fourth word is a hashtag.
fn generate_post(words: usize) -> (String, Vec<Span>) {
    let mut text = String::with_capacity(words * 8);
    let mut spans = Vec::new();
    for i in 0..words {
        if i > 0 {
            text.push(' ');
        }
        if i % 4 == 0 {
            let tag = format!("tag{i}");
            let start = text.len();
            text.push('#');
            text.push_str(&tag);
            spans.push(Span::hashtag(start, text.len(), tag));
        } else {
            text.push_str("a<b&c");
        }
    }
    (text, spans)
}

fn bench_render_plain(c: &mut Criterion) {
    let text = "just some text & a <tag>, no entities at all";
    c.bench_function("render_plain_text", |b| {
        b.iter(|| render_html(text, Vec::new(), TrailingPolicy::none()));
    });
}

fn bench_render_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_hashtags");
    for words in [8, 64, 512] {
        let (text, spans) = generate_post(words);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(words), &words, |b, _| {
            b.iter(|| render_html(&text, spans.clone(), TrailingPolicy::none()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render_plain, bench_render_scaling);
criterion_main!(benches);
