use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use texttree::{parse_ini, parse_jsonex, to_jsonex, to_xml};

/// A settings-style document with `count` objects of five attributes.
fn settings_text(count: usize) -> String {
    let mut text = String::from("content:TextLayoutSamplerSettings\nobjects:[\n");
    for i in 0..count {
        text.push_str(&format!(
            "  {{name:\"Object {i}\", fontFamily:\"Segoe UI\", fontSize:{}, width:{}, text:\"Sample\\ttext {i}\"}},\n",
            10 + i % 8,
            200 + i,
        ));
    }
    text.push_str("]\n");
    text
}

fn ini_text(sections: usize) -> String {
    let mut text = String::new();
    for i in 0..sections {
        text.push_str(&format!("[section{i}]\n"));
        for j in 0..5 {
            text.push_str(&format!("key{j} = value {i} {j}\n"));
        }
    }
    text
}

fn benchmark_parse_simple(c: &mut Criterion) {
    let text = "window:{title:\"Sampler\", width:800, height:600}";

    c.bench_function("parse_simple_document", |b| {
        b.iter(|| parse_jsonex(black_box(text)))
    });
}

fn benchmark_parse_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_jsonex");

    for size in [10, 50, 100, 500].iter() {
        let text = settings_text(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_jsonex(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_parse_ini(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_ini");

    for size in [10, 100].iter() {
        let text = ini_text(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_ini(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_write(c: &mut Criterion) {
    let (tree, _) = parse_jsonex(&settings_text(100));

    c.bench_function("write_jsonex_100_objects", |b| {
        b.iter(|| to_jsonex(black_box(&tree)))
    });
    c.bench_function("write_xml_100_objects", |b| {
        b.iter(|| to_xml(black_box(&tree)))
    });
}

fn benchmark_navigation(c: &mut Criterion) {
    let (tree, _) = parse_jsonex(&settings_text(100));
    let objects = tree.find_key(0, "objects").unwrap();

    c.bench_function("find_key_scan", |b| {
        b.iter(|| black_box(&tree).get_key_value(black_box(objects), "missing"))
    });
}

criterion_group!(
    benches,
    benchmark_parse_simple,
    benchmark_parse_by_size,
    benchmark_parse_ini,
    benchmark_write,
    benchmark_navigation,
);
criterion_main!(benches);
