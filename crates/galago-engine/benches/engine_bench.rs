use criterion::{criterion_group, criterion_main, Criterion};
use galago_engine::verify_ltl;
use galago_ltl::Ltl;
use galago_ts::TransitionSystem;

/// A ring of `n` states passing a token; state 0 carries "tok".
fn ring(n: usize) -> TransitionSystem<usize, &'static str, &'static str> {
    let mut b = TransitionSystem::builder();
    b.name("ring").add_initial_state(0usize);
    for i in 0..n {
        b.add_transition(i, "pass", (i + 1) % n);
    }
    b.add_label(0, "tok");
    b.build()
}

fn bench_verify(c: &mut Criterion) {
    let ts = ring(64);
    let phi = Ltl::always_eventually(Ltl::prop("tok"));
    c.bench_function("verify_ring_64_always_eventually_tok", |b| {
        b.iter(|| verify_ltl(&ts, &phi).unwrap())
    });

    let bad = Ltl::eventually_always(Ltl::not(Ltl::prop("tok")));
    c.bench_function("verify_ring_64_counterexample", |b| {
        b.iter(|| verify_ltl(&ts, &bad).unwrap())
    });
}

criterion_group!(benches, bench_verify);
criterion_main!(benches);
