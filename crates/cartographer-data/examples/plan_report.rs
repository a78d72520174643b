//! Plan report: loads the bundled catalog, queues a few structures against a
//! mid-game progress overlay, and prints the sourcing plan, route and metrics.
//!
//! Run with: `cargo run --package cartographer-data --example plan_report`
//! Set `RUST_LOG=debug` to see per-request planner logs.

use std::path::Path;

use cartographer_core::demand::DemandVector;
use cartographer_core::id::{LocationId, StructureId};
use cartographer_core::material::Material;
use cartographer_core::metrics::metrics;
use cartographer_core::route::{StopKind, route_with_config};
use cartographer_core::sourcing::plan;
use cartographer_core::user_state::UserState;
use cartographer_data::load_catalog;
use tracing_subscriber::{EnvFilter, fmt};

const QUEUE: [&str; 3] = ["postbox", "watchtower", "timefall-shelter"];

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).init();

    let data_dir = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
    let loaded = load_catalog(data_dir).expect("failed to load catalog");
    let catalog = &loaded.catalog;

    let mut state = UserState::initial(catalog);
    let villa = LocationId::new("villa-libre");
    state
        .set_unlocked(catalog, &villa, true)
        .expect("villa-libre is in the catalog");
    state
        .set_connection_level(catalog, &villa, 3)
        .expect("villa-libre is a prepper");
    state
        .set_available(catalog, &LocationId::new("ciudad-nudo-del-norte"), Material::Metals, 80)
        .expect("ciudad-nudo-del-norte is a facility");
    state
        .set_upgraded(catalog, &LocationId::new("mine-north-of-f1"), true)
        .expect("mine-north-of-f1 is upgradeable");

    for id in QUEUE {
        state
            .queue_structure(catalog, &StructureId::new(id))
            .unwrap_or_else(|e| panic!("failed to queue '{id}': {e}"));
    }
    let bridge = state
        .queue_structure(catalog, &StructureId::new("bridge-foundation"))
        .expect("bridge-foundation is in the catalog");
    state
        .build_queue
        .set_requirement(bridge, Material::SpecialAlloys, 400)
        .expect("bridge was just queued");

    println!("=== Build queue ({} items) ===", state.build_queue.len());
    for item in state.build_queue.items() {
        println!("  {} {:<20} priority {}", item.id, item.structure_name, item.priority);
    }

    let snapshot = catalog.snapshot(&state);
    let demand = DemandVector::from_queue(&state.build_queue);
    let p = plan(&demand, &snapshot);

    println!("\n=== Materials ===");
    for s in &p.summary {
        println!(
            "  {:<16} needed {:>5}  stock {:>5}  rate {:>5}  unmet {:>5}",
            s.material.display_name(),
            s.total_needed,
            s.from_stock,
            s.from_rate,
            s.unmet
        );
    }

    println!("\n=== Route ===");
    for (i, stop) in route_with_config(&p, &snapshot, &loaded.config)
        .iter()
        .enumerate()
    {
        let what = match &stop.kind {
            StopKind::Stock { materials } => format!("pick up {} units", materials.total()),
            StopKind::Rate {
                material,
                amount,
                fuel_cost,
            } => format!("mine {amount} {material} for {fuel_cost} crystals"),
        };
        println!(
            "  {:>2}. [{:>9}] {:<32} priority {:>7.1}  {what}",
            i + 1,
            stop.region,
            stop.location_name,
            stop.priority
        );
    }

    let m = metrics(&p);
    println!("\n=== Metrics ===");
    println!("  required:    {}", m.total_required);
    println!("  from stock:  {}", m.total_from_stock);
    println!("  from rate:   {}", m.total_from_rate);
    println!("  unmet:       {}", m.total_unmet);
    println!("  fulfillment: {:.2}%", m.fulfillment_rate);
    println!("  fuel:        {}", m.fuel_needed);
    println!("  sources:     {}", m.source_count);
}
