use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use minotaur::generation::utils::create_rng;
use minotaur::{shortest_path, DepthFirstCarver, Generator, MazeConfig};

fn bench_carving(c: &mut Criterion) {
    let generator = DepthFirstCarver::new();
    let mut group = c.benchmark_group("carve");

    for size in [10usize, 15, 51, 101] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let config = MazeConfig::new(7, size);
            b.iter(|| {
                let mut rng = create_rng(&config);
                black_box(generator.generate(&config, &mut rng))
            })
        });
    }

    group.finish();
}

fn bench_exit_path(c: &mut Criterion) {
    let config = MazeConfig::new(7, 101);
    let grid = match DepthFirstCarver::new().generate(&config, &mut create_rng(&config)) {
        Ok(grid) => grid,
        Err(e) => panic!("maze generation failed: {}", e),
    };

    c.bench_function("shortest_path_101", |b| {
        b.iter(|| {
            black_box(shortest_path(
                &grid,
                config.start_position(),
                config.exit_position(),
            ))
        })
    });
}

criterion_group!(benches, bench_carving, bench_exit_path);
criterion_main!(benches);
