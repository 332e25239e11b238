use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use charge_field::fields::{normalize, superpose, SingularityPolicy};
use charge_field::grid::GridSpec;
use charge_field::simulation::SimulationConfig;

fn bench_superposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_superposition");
    let charges = SimulationConfig::three_charge_system().charges;

    for points in [50usize, 200] {
        let grid = GridSpec::square(-10.0, 10.0, points).build().expect("valid grid");
        group.bench_function(BenchmarkId::new("three_charges", points), |b| {
            b.iter_batched(
                || grid.clone(),
                |grid| {
                    let field = superpose(&grid, &charges, SingularityPolicy::Mask).expect("mask policy");
                    black_box(normalize(&field, SingularityPolicy::Mask))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_superposition);
criterion_main!(benches);
