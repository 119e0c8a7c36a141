//! Spine rebuild cost.
//!
//! A replace at a fixed depth should scale with the width of the containers
//! on the path, not with the total size of the document. `wide_siblings`
//! grows the number of untouched sibling subtrees while keeping the path
//! width fixed; `path_width` grows the width of the containers on the path.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jptr_core::{get, replace, JsonValue, Pointer};
use serde_json::{json, Map, Value};

/// `{"target": {"list": [0; 8]}, "s0": <subtree>, "s1": <subtree>, ...}`
fn document_with_siblings(siblings: usize) -> JsonValue {
    let mut root = Map::new();
    root.insert("target".to_string(), json!({"list": [0, 1, 2, 3, 4, 5, 6, 7]}));
    for i in 0..siblings {
        root.insert(
            format!("s{i}"),
            json!({"payload": (0..64).collect::<Vec<_>>(), "nested": {"k": "v"}}),
        );
    }
    JsonValue::from(Value::Object(root))
}

fn bench_wide_siblings(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_siblings");
    let pointer = Pointer::parse("/target/list/3").unwrap();
    for siblings in [0usize, 16, 256] {
        let document = document_with_siblings(siblings);
        group.bench_with_input(
            BenchmarkId::from_parameter(siblings),
            &document,
            |b, document| {
                b.iter(|| replace(&pointer, black_box(document), JsonValue::Null).unwrap())
            },
        );
    }
    group.finish();
}

fn bench_path_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_width");
    for width in [8usize, 128, 2048] {
        let document = JsonValue::from(json!({"xs": (0..width).collect::<Vec<_>>()}));
        let pointer = Pointer::parse(&format!("/xs/{}", width / 2)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(width), &document, |b, document| {
            b.iter(|| replace(&pointer, black_box(document), JsonValue::Null).unwrap())
        });
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let document = document_with_siblings(256);
    let pointer = Pointer::parse("/s128/nested/k").unwrap();
    c.bench_function("get_depth_3", |b| {
        b.iter(|| get(black_box(&pointer), black_box(&document)).unwrap())
    });
}

criterion_group!(benches, bench_wide_siblings, bench_path_width, bench_get);
criterion_main!(benches);
