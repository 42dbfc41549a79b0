use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use textcompare_core::{CompareConfig, CompareEngine, DiffAlgorithmKind};

fn sample_pair(repeat: usize) -> (String, String) {
    let original = [
        "今天天气很好，我们去公园散步。",
        "The quick brown fox jumps over the lazy dog 3.14 times.",
        "混合内容：Rust 编写的文本比较工具 supports 中文 and English.",
    ];
    let modified = [
        "今天天气不错，我们去公园跑步。",
        "A quick red fox jumped over the dog 2.71 times!",
        "混合内容：Rust 写的文本对比工具 supports 中文 and English well.",
    ];
    let build = |parts: &[&str]| -> String {
        (0..repeat).map(|i| parts[i % parts.len()]).collect::<Vec<_>>().join(" ")
    };
    (build(&original), build(&modified))
}

fn engine(algorithm: DiffAlgorithmKind) -> CompareEngine {
    CompareEngine::from_config(CompareConfig::char_split().with_algorithm(algorithm))
        .expect("valid benchmark config")
}

fn bench_tokenize(c: &mut Criterion) {
    let engine = engine(DiffAlgorithmKind::Myers);
    let mut group = c.benchmark_group("tokenize");

    for &repeat in &[3usize, 30usize] {
        let (text, _) = sample_pair(repeat);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeat), &text, |b, text| {
            b.iter(|| black_box(engine.segment_text(text)))
        });
    }

    group.finish();
}

fn bench_similarity(c: &mut Criterion) {
    let engine = engine(DiffAlgorithmKind::Myers);
    let (a, b) = sample_pair(30);
    let mut group = c.benchmark_group("similarity");

    group.bench_function("cosine", |bench| {
        bench.iter(|| black_box(engine.cosine_similarity(&a, &b)))
    });
    group.bench_function("jaccard", |bench| {
        bench.iter(|| black_box(engine.jaccard_similarity(&a, &b)))
    });

    group.finish();
}

fn bench_diffs(c: &mut Criterion) {
    let (a, b) = sample_pair(30);
    let mut group = c.benchmark_group("diff");

    for algorithm in [DiffAlgorithmKind::Myers, DiffAlgorithmKind::Lcs, DiffAlgorithmKind::Patience] {
        let engine = engine(algorithm);
        group.bench_function(BenchmarkId::new("tokens", algorithm.name()), |bench| {
            bench.iter(|| black_box(engine.diff_tokens(&a, &b)))
        });
        group.bench_function(BenchmarkId::new("chars", algorithm.name()), |bench| {
            bench.iter(|| black_box(engine.diff_chars(&a, &b)))
        });
    }

    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let engine = engine(DiffAlgorithmKind::Myers);
    let (a, b) = sample_pair(3);

    c.bench_function("compare_report", |bench| {
        bench.iter(|| black_box(engine.compare(&a, &b)))
    });
}

criterion_group!(benches, bench_tokenize, bench_similarity, bench_diffs, bench_compare);
criterion_main!(benches);
