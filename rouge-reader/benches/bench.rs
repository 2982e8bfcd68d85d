use criterion::*;

use rouge_reader::{read_all, read_str, Table};

fn bench_number_reading(c: &mut Criterion) {
    let ns = Table::new("user");
    c.bench_function("float reading", |b| {
        b.iter(|| black_box(read_str(&ns, "-1.360438755021694e308")))
    });
    c.bench_function("integer reading (all radixes)", |b| {
        b.iter(|| black_box(read_all(&ns, "12345 0x1F 0b101 017 123456789012345678901234567890")))
    });
}

fn bench_keyword_reading(c: &mut Criterion) {
    let ns = Table::new("user");
    c.bench_function("keyword reading", |b| {
        b.iter(|| black_box(read_all(&ns, ":some-keyword :ns/kw :\"quoted keyword\"")))
    });
}

fn bench_syntax_quote(c: &mut Criterion) {
    let ns = Table::new("user")
        .refer("rouge.core", "let")
        .refer("rouge.core", "when");
    c.bench_function("syntax-quote expansion", |b| {
        b.iter(|| {
            black_box(read_str(
                &ns,
                "`(let [x# ~test] (when x# (do ~@body [x# #{~a}] {:k ~v})))",
            ))
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = bench_number_reading, bench_keyword_reading, bench_syntax_quote
}
criterion_main!(benches);
