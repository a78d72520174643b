//! Criterion benchmarks for the planning pipeline.
//!
//! - `plan_full_catalog`: ~50 locations, all six materials demanded.
//! - `route_full_catalog`: route ordering over the resulting plan.

use cartographer_core::location::Location;
use cartographer_core::material::Material;
use cartographer_core::metrics::metrics;
use cartographer_core::route::route;
use cartographer_core::sourcing::plan;
use cartographer_core::test_utils::*;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// 40 stock locations split across two regions plus 10 mines, roughly the
/// size of a late-game snapshot.
fn build_snapshot() -> Vec<Location> {
    let mut locations = Vec::with_capacity(50);
    for i in 0..40u64 {
        let region = if i < 6 { "Mexico" } else { "Australia" };
        let entries: Vec<_> = Material::ALL
            .iter()
            .map(|&m| (m, 50 + (i * 37 + m as u64 * 11) % 200))
            .collect();
        locations.push(stock_with_level(
            &format!("stock-{i}"),
            region,
            &entries,
            (i % 5) as u8 + 1,
        ));
    }
    for i in 0..10usize {
        let material = Material::ALL[i % 5];
        locations.push(mine(
            &format!("mine-{i}"),
            "Australia",
            material,
            1.0 + i as f64 * 0.3,
        ));
    }
    locations
}

fn bench_plan(c: &mut Criterion) {
    let locations = build_snapshot();
    let d = demand(&[
        (Material::Metals, 12_000),
        (Material::Ceramics, 8_000),
        (Material::Resins, 6_000),
        (Material::Chemicals, 4_000),
        (Material::SpecialAlloys, 3_000),
        (Material::ChiralCrystals, 2_000),
    ]);

    c.bench_function("plan_full_catalog", |b| {
        b.iter(|| plan(black_box(&d), black_box(&locations)))
    });

    let p = plan(&d, &locations);
    c.bench_function("route_full_catalog", |b| {
        b.iter(|| route(black_box(&p), black_box(&locations)))
    });
    c.bench_function("metrics_full_catalog", |b| b.iter(|| metrics(black_box(&p))));
}

criterion_group!(benches, bench_plan);
criterion_main!(benches);
