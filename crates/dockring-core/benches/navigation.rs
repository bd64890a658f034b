use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dockring_core::prelude::*;

fn bench_valid_neighbors(c: &mut Criterion) {
    let map = NavigationMap::new(8, 32).unwrap();
    let nodes = map.nodes();

    c.bench_function("valid_neighbors_all_nodes", |b| {
        b.iter(|| {
            let mut total = 0;
            for &node in &nodes {
                total += map.valid_neighbors(black_box(node), Direction::Inbound).len();
                total += map.valid_neighbors(black_box(node), Direction::Outbound).len();
            }
            total
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let config = StationConfig {
        ring_count: 8,
        segment_count: 32,
        inbound_spawn_chance: 1.0,
        outbound_spawn_chance: 0.5,
        seed: Some(1),
        ..Default::default()
    };
    let mut engine = StationEngine::new(config).unwrap();
    // Warm up to a populated steady state.
    for _ in 0..200 {
        engine.next_tick();
    }

    c.bench_function("next_tick_populated", |b| b.iter(|| engine.next_tick()));
}

criterion_group!(benches, bench_valid_neighbors, bench_tick);
criterion_main!(benches);
