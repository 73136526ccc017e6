use criterion::{black_box, criterion_group, criterion_main, Criterion};
use steer_cards::{Module, Parameters, Sequence};

fn wide_card(width: usize) -> Parameters {
    let mut card = Parameters::new();
    for idx in 0..width {
        card.set(
            format!("block{idx}"),
            Module::new(format!("module{idx}"))
                .with("seed", idx as i64)
                .with("range", (0.0, 1.0))
                .with("nested", Parameters::new().with("label", "value").with("flag", true)),
        );
    }
    card.set(
        "output",
        Sequence::from_modules((0..8).map(|idx| Module::new(format!("out{idx}")))),
    );
    card
}

fn dump_bench(c: &mut Criterion) {
    let card = wide_card(500);
    c.bench_function("dump_card_500", |b| {
        b.iter(|| black_box(card.dump()));
    });
    c.bench_function("fingerprint_card_500", |b| {
        b.iter(|| black_box(card.fingerprint().unwrap()));
    });
}

criterion_group!(benches, dump_bench);
criterion_main!(benches);
