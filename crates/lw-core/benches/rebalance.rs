use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lw_core::{Balance, CATEGORIES, Category, compute_slices, rebalance};

fn bench_rebalance(c: &mut Criterion) {
    c.bench_function("rebalance_single_move", |b| {
        let state = Balance::default();
        b.iter(|| rebalance(black_box(state), Category::Work, black_box(73)));
    });

    c.bench_function("rebalance_move_sequence", |b| {
        b.iter(|| {
            let mut state = Balance::default();
            for value in 0..100 {
                let cat = Category::ALL[value as usize % 4];
                state = rebalance(state, cat, black_box(value));
            }
            state
        });
    });
}

fn bench_slices(c: &mut Criterion) {
    c.bench_function("compute_slices", |b| {
        let state = Balance::new(70, 10, 10, 10);
        b.iter(|| compute_slices(black_box(&state), &CATEGORIES));
    });
}

criterion_group!(benches, bench_rebalance, bench_slices);
criterion_main!(benches);
