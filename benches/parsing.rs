//! Benchmarks for weekpack parsing, windowing and aggregation.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- windows`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use weekpack::Message;
use weekpack::config::{SystemFilterConfig, WindowConfig};
use weekpack::core::aggregate::{SortedMessages, WeeklyAggregator};
use weekpack::core::filter::filter_system_messages;
use weekpack::core::output::{to_csv, to_json};
use weekpack::core::window::extract_windows;
use weekpack::parser::Parser;
use weekpack::parsers::WhatsAppParser;

// =============================================================================
// Test Data Generators
// =============================================================================

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn sender(i: usize) -> &'static str {
    match i % 5 {
        0 => "target",
        1 | 3 => "Alice",
        _ => "Bob",
    }
}

/// One message every ten minutes, every seventh with a continuation line and
/// every fiftieth a system notice.
fn generate_whatsapp_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count + count / 7);
    for i in 0..count {
        let ts = base_time() + Duration::minutes(i as i64 * 10);
        let body = if i % 50 == 0 {
            "\u{200E}Bild weggelassen".to_string()
        } else {
            format!("Message number {}", i)
        };
        lines.push(format!(
            "[{}] {}: {}",
            ts.format("%d.%m.%y, %H:%M:%S"),
            sender(i),
            body
        ));
        if i % 7 == 0 {
            lines.push("and a second line".to_string());
        }
    }
    lines.join("\n")
}

fn generate_messages(count: usize) -> Vec<Message> {
    (0..count)
        .map(|i| {
            let ts = base_time() + Duration::minutes(i as i64 * 10);
            Message::new(ts, sender(i), format!("Message number {}", i))
        })
        .collect()
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_whatsapp_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("whatsapp_parsing");
    let parser = WhatsAppParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_whatsapp_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                let messages = parser.parse_str(black_box(txt));
                black_box(messages)
            });
        });
    }
    group.finish();
}

fn bench_system_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("system_filter");
    let config = SystemFilterConfig::default();

    for size in [1_000_usize, 10_000, 100_000] {
        let messages = WhatsAppParser::new().parse_str(&generate_whatsapp_txt(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let kept = filter_system_messages(black_box(messages.clone()), &config);
                    black_box(kept)
                });
            },
        );
    }
    group.finish();
}

// =============================================================================
// Windowing Benchmarks
// =============================================================================

fn bench_windows(c: &mut Criterion) {
    let mut group = c.benchmark_group("windows");

    for size in [100_usize, 1_000, 10_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &messages,
            |b, messages| {
                b.iter(|| {
                    let windows = extract_windows(black_box(messages), "target", 5);
                    black_box(windows)
                });
            },
        );
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let aggregator = WeeklyAggregator::new(WindowConfig::new("target"));

    for size in [1_000_usize, 10_000, 100_000] {
        let sorted = SortedMessages::sort(generate_messages(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &sorted, |b, sorted| {
            b.iter(|| {
                let weeks = aggregator.aggregate(black_box(sorted));
                black_box(weeks)
            });
        });
    }
    group.finish();
}

// =============================================================================
// End-to-End Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let parser = WhatsAppParser::new();
    let filter = SystemFilterConfig::default();
    let aggregator = WeeklyAggregator::new(WindowConfig::new("target"));

    for size in [1_000_usize, 10_000, 50_000] {
        let txt = generate_whatsapp_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                // parse -> filter -> sort -> aggregate -> output
                let messages = parser.parse_str(black_box(txt));
                let kept = filter_system_messages(messages, &filter);
                let weeks = aggregator.aggregate(&SortedMessages::sort(kept));
                let json = to_json(&weeks).unwrap();
                let csv = to_csv(&weeks).unwrap();
                black_box((json, csv))
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_whatsapp_parsing,
    bench_system_filter,
    bench_windows,
    bench_aggregate,
    bench_full_pipeline,
);

criterion_main!(benches);
