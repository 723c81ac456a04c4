// SPDX-License-Identifier: MIT OR Apache-2.0
//! Benchmarks for host response classification and report rendering.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};

use bpx::present::render;
use bpx::{ErrorReport, OutputFormat, PopupError, ReportOptions, classify_host_error};

// ── Helpers ─────────────────────────────────────────────────────────────

fn known_code() -> Value {
    json!({
        "status": "error",
        "version": 3000001,
        "code": 24,
        "params": {
            "message": "Unable to decrypt github.com/alice.gpg",
            "action": "fetch",
            "error": "gpg: decryption failed: No secret key",
            "storeId": "default",
            "storePath": "~/.password-store",
            "storeName": "My passwords",
            "file": "github.com/alice.gpg"
        }
    })
}

fn unknown_code(extra: usize) -> Value {
    let params: serde_json::Map<String, Value> = (0..extra)
        .map(|i| (format!("param{i}"), json!(format!("value-{i}"))))
        .collect();
    json!({"status": "error", "version": "bogus", "code": 999, "params": params})
}

// ── Benchmarks ──────────────────────────────────────────────────────────

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let known = known_code();
    group.bench_function("known_code", |b| {
        b.iter(|| classify_host_error(black_box(known.clone())))
    });

    for extra in [1usize, 16, 256] {
        let raw = unknown_code(extra);
        group.throughput(Throughput::Elements(extra as u64));
        group.bench_with_input(BenchmarkId::new("unknown_code", extra), &raw, |b, raw| {
            b.iter(|| classify_host_error(black_box(raw.clone())))
        });
    }
    group.finish();
}

fn bench_classify_str(c: &mut Criterion) {
    let text = known_code().to_string();
    c.bench_function("classify_str/known_code", |b| {
        b.iter(|| bpx::classify::classify_str(black_box(&text)))
    });
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let err: PopupError = match classify_host_error(known_code()) {
        Ok(host) => host.into(),
        Err(e) => panic!("classify: {e}"),
    };
    let report = ErrorReport::new(&err, &ReportOptions::default());
    for format in [
        OutputFormat::Text,
        OutputFormat::Compact,
        OutputFormat::Json,
        OutputFormat::Html,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format),
            &report,
            |b, report| b.iter(|| render(black_box(report), format)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_classify_str, bench_render);
criterion_main!(benches);
