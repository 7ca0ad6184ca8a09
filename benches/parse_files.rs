use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fs;

use xmlprobe::{parse_document, InputBuffer, ParseFlags};

fn bench_parse_files(c: &mut Criterion) {
    let well_formed_bytes = fs::read("tests/read/well_formed.xml").unwrap();
    c.bench_function("well_formed.xml - parse", |b| {
        b.iter(|| {
            let buffer = InputBuffer::from_bytes(black_box(&well_formed_bytes));
            let root = parse_document(&buffer, ParseFlags::DEFAULT).unwrap();
            black_box(root);
        });
    });

    // failures also pay for resolving the reported position to a byte offset
    let unclosed_bytes = fs::read("tests/read/unclosed.xml").unwrap();
    c.bench_function("unclosed.xml - parse failure", |b| {
        b.iter(|| {
            let failure = xmlprobe::check_bytes(black_box(&unclosed_bytes)).unwrap_err();
            black_box(failure);
        });
    });
}

criterion_group! {
    name = benches;
    // This can be any expression that returns a `Criterion` object.
    config = Criterion::default().significance_level(0.1).sample_size(500);
    targets = bench_parse_files
}
criterion_main!(benches);
