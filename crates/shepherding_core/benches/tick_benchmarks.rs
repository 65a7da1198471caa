use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shepherding_core::config::{AppConfig, NetworkStrategy};
use shepherding_core::delaunay;
use shepherding_core::{NullBridge, World};
use shepherding_data::Vec2;

fn world_with(strategy: NetworkStrategy, n_sheep: usize) -> World {
    let mut config = AppConfig::default();
    config.world.seed = Some(42);
    config.world.n_sheep = n_sheep;
    config.world.n_shepherd = 2;
    config.network.strategy = strategy;
    World::new(config).expect("valid benchmark config")
}

fn bench_metric_tick(c: &mut Criterion) {
    let mut world = world_with(NetworkStrategy::Metric, 50);
    c.bench_function("tick_metric_50", |b| {
        b.iter(|| black_box(world.step(&mut NullBridge)))
    });
}

fn bench_voronoi_tick(c: &mut Criterion) {
    let mut world = world_with(NetworkStrategy::Voronoi, 20);
    c.bench_function("tick_voronoi_20", |b| {
        b.iter(|| black_box(world.step(&mut NullBridge)))
    });
}

fn bench_triangulation(c: &mut Criterion) {
    let points: Vec<Vec2> = (0..100)
        .map(|i| {
            let x = (i % 10) as f64 * 25.0 + (i as f64 * 0.37).sin();
            let y = (i / 10) as f64 * 25.0 + (i as f64 * 0.71).cos();
            Vec2::new(x, y)
        })
        .collect();

    c.bench_function("delaunay_neighbors_100", |b| {
        b.iter(|| black_box(delaunay::neighbors(&points)))
    });
}

criterion_group!(
    benches,
    bench_metric_tick,
    bench_voronoi_tick,
    bench_triangulation
);
criterion_main!(benches);
