//! Benchmarks for the lattice stepper.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use lattice_life::{
    compute::{Lattice, Simulation, Stepper},
    schema::{Seed, SimulationConfig},
};

fn bench_stepper_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("stepper_step");

    for side in [6, 16, 32, 64, 128] {
        let mut lattice = Lattice::from_seed(&Seed::random(0.5, Some(42)), side)
            .expect("benchmark sides are within the cell limit");
        let mut stepper = Stepper::new();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{side}^3")),
            &side,
            |b, _| {
                b.iter(|| {
                    stepper.step(black_box(&mut lattice));
                });
            },
        );
    }

    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");

    for cell_size in [20.0f32, 5.0, 1.0] {
        let config = SimulationConfig {
            cell_size,
            gap: 0.5,
            seed: Seed::random(0.5, Some(7)),
            ..Default::default()
        };
        let side = config.side();
        let mut sim = Simulation::new(config).expect("valid bench config");

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{side}^3")),
            &cell_size,
            |b, &size| {
                b.iter(|| {
                    let _ = black_box(sim.resize(size, 0.5));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_stepper_step, bench_resize);
criterion_main!(benches);
