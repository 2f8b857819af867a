//! Benchmarks for URL resolution and request construction
//!
//! Run with: cargo bench -p livetv-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use livetv_core::{build, infer_content_type, resolve, ViewConfig};

const URLS: [(&str, &str); 6] = [
    ("hls_token", "https://cdn.example.com/live/channel-1/index.m3u8?token=abc123&exp=1700000000"),
    ("dash", "https://cdn.example.com/vod/movie/manifest.mpd"),
    ("smooth", "https://cdn.example.com/vod/movie.ism/manifest"),
    ("format_query", "https://cdn.example.com/play?id=42&format=m3u8-aapl"),
    ("progressive", "https://cdn.example.com/clips/trailer.mp4"),
    ("malformed", "not a url / at all"),
];

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for (name, url) in URLS {
        group.bench_with_input(BenchmarkId::new("resolve", name), url, |b, url| {
            b.iter(|| resolve(black_box(url)))
        });
        group.bench_with_input(BenchmarkId::new("infer_content_type", name), url, |b, url| {
            b.iter(|| infer_content_type(black_box(url)))
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let url = URLS[0].1;
    let tag = resolve(url);

    c.bench_function("build_request", |b| {
        b.iter(|| build(black_box(url), black_box(tag)))
    });

    let payload = serde_json::json!({
        "url": url,
        "title": "Channel 1",
        "epg": { "now": "News", "next": "Weather" }
    });
    c.bench_function("view_config_from_args", |b| {
        b.iter(|| ViewConfig::from_args(black_box(&payload)))
    });
}

criterion_group!(
    resolver_benches,
    bench_resolve,
    bench_build,
);

criterion_main!(resolver_benches);
