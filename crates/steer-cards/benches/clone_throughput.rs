use criterion::{black_box, criterion_group, criterion_main, Criterion};
use steer_cards::{Module, Parameters};

fn deep_card(depth: usize) -> Parameters {
    let mut card = Parameters::new().with("leaf", 1);
    for level in 0..depth {
        card = Parameters::new()
            .with(format!("level{level}"), card)
            .with("module", Module::new("vegas").with("ncvg", 100_000));
    }
    card
}

fn clone_bench(c: &mut Criterion) {
    let card = deep_card(64);
    c.bench_function("clone_with_override_depth_64", |b| {
        b.iter(|| black_box(card.clone_with([("leaf", 2)])));
    });
    let base = Module::new("lpair").with("card", card.clone());
    c.bench_function("module_clone_as_depth_64", |b| {
        b.iter(|| black_box(base.clone_as("lpair_el", [("mode", 3)])));
    });
}

criterion_group!(benches, clone_bench);
criterion_main!(benches);
