//! Criterion micro-benchmarks for cursor navigation and document builds.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use flatdoc::{DocumentBuilder, DocumentConfig};
use flatdoc_arena::{HeapAllocator, PoolConfig};
use flatdoc_bench::{nested_profile, wide_profile};
use flatdoc_tree::{validate, TreeCursor};

fn bench_sibling_walk(c: &mut Criterion) {
    let profile = wide_profile();
    c.bench_function("cursor_sibling_walk_10k", |b| {
        b.iter(|| {
            let root = TreeCursor::new(&profile.tokens);
            let mut cursor = root.first_child();
            let mut count = 0usize;
            while cursor.is_valid() {
                count += 1;
                cursor = cursor.next_sibling();
            }
            black_box(count);
        });
    });
}

fn bench_validate_nested(c: &mut Criterion) {
    let profile = nested_profile();
    c.bench_function("validate_nested", |b| {
        b.iter(|| black_box(validate(&profile.tokens, profile.input.len())));
    });
}

fn bench_build_nested(c: &mut Criterion) {
    let profile = nested_profile();
    let config = DocumentConfig::new(PoolConfig::for_slots(profile.tokens.len() as u32));
    let builder = DocumentBuilder::new(config, &HeapAllocator);
    c.bench_function("build_nested", |b| {
        b.iter(|| {
            let doc = builder.build(&profile.tokens, profile.input.len());
            black_box(doc.map(|d| d.len()))
        });
    });
}

criterion_group!(
    benches,
    bench_sibling_walk,
    bench_validate_nested,
    bench_build_nested
);
criterion_main!(benches);
