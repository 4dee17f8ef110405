//! Registry hot-path benchmarks: the tick loop and spatial queries.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use obsidian_shared::Vec3;
use obsidian_world::{EntityKind, EntityRegistry, NullBroadcaster};
use std::sync::Arc;

fn populated_registry(count: usize) -> EntityRegistry {
    let registry = EntityRegistry::new(Arc::new(NullBroadcaster));
    for i in 0..count {
        #[allow(clippy::cast_precision_loss)]
        let entity = registry.spawn(
            Vec3::new((i % 256) as f32, 64.0, (i / 256) as f32),
            EntityKind::Generic,
        );
        entity.lock().set_motion(Vec3::new(0.02, 0.0, -0.02));
        entity.lock().reset_stale();
    }
    registry
}

fn bench_tick(c: &mut Criterion) {
    let registry = populated_registry(1_000);
    c.bench_function("tick_1000_moving_entities", |b| {
        b.iter(|| black_box(&registry).on_tick());
    });
}

fn bench_queries(c: &mut Criterion) {
    let registry = populated_registry(1_000);

    c.bench_function("entities_in_chunk", |b| {
        b.iter(|| black_box(&registry).entities_in_chunk(4, 0));
    });

    c.bench_function("entities_in_distance", |b| {
        b.iter(|| black_box(&registry).entities_in_distance(Vec3::new(128.0, 64.0, 2.0), 32.0));
    });

    c.bench_function("find_entity_by_id", |b| {
        let id = registry.all_entities()[500].id();
        b.iter(|| black_box(&registry).find_entity_by_id(id));
    });
}

criterion_group!(benches, bench_tick, bench_queries);
criterion_main!(benches);
