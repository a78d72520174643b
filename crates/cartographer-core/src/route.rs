//! Collection route ordering.
//!
//! Stops in the primary region come first. All other regions compare equal,
//! so within each group stops are ordered by descending priority and ties
//! keep their build order (stock stops by location id, then rate stops by
//! material).

use crate::config::PlannerConfig;
use crate::id::LocationId;
use crate::location::Location;
use crate::material::{Material, MaterialMap};
use crate::sourcing::SourcingPlan;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// One visit on the collection route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub location_id: LocationId,
    pub location_name: String,
    pub region: String,
    pub priority: f64,
    pub kind: StopKind,
}

/// What happens at a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StopKind {
    /// Pick up stock.
    Stock { materials: MaterialMap },
    /// Spend fuel at a mine.
    Rate {
        material: Material,
        amount: u64,
        fuel_cost: u64,
    },
}

/// Order the plan's sources using the default [`PlannerConfig`].
pub fn route(plan: &SourcingPlan, locations: &[Location]) -> Vec<RouteStop> {
    route_with_config(plan, locations, &PlannerConfig::default())
}

pub fn route_with_config(
    plan: &SourcingPlan,
    locations: &[Location],
    config: &PlannerConfig,
) -> Vec<RouteStop> {
    let find = |id: &LocationId| locations.iter().find(|l| &l.id == id);
    let mut stops = Vec::with_capacity(plan.from_stock.len() + plan.from_rate.len());

    for (id, alloc) in &plan.from_stock {
        let Some(loc) = find(id) else {
            debug!(location = %id, "stock allocation for unknown location, no stop");
            continue;
        };
        let level = loc
            .as_stock()
            .and_then(|s| s.connection_level)
            .unwrap_or(config.default_connection_level);
        stops.push(RouteStop {
            location_id: loc.id.clone(),
            location_name: loc.name.clone(),
            region: loc.region.clone(),
            priority: alloc.materials.total() as f64 + f64::from(level) * config.connection_bonus,
            kind: StopKind::Stock {
                materials: alloc.materials.clone(),
            },
        });
    }

    for (&material, alloc) in &plan.from_rate {
        let Some(loc) = find(&alloc.source_id) else {
            debug!(location = %alloc.source_id, %material, "rate allocation for unknown location, no stop");
            continue;
        };
        stops.push(RouteStop {
            location_id: loc.id.clone(),
            location_name: alloc.source_name.clone(),
            region: loc.region.clone(),
            priority: config.rate_stop_priority,
            kind: StopKind::Rate {
                material,
                amount: alloc.amount,
                fuel_cost: alloc.fuel_cost,
            },
        });
    }

    stops.sort_by(|a, b| compare_stops(a, b, &config.primary_region));
    stops
}

fn compare_stops(a: &RouteStop, b: &RouteStop, primary: &str) -> Ordering {
    let a_primary = a.region == primary;
    let b_primary = b.region == primary;
    b_primary
        .cmp(&a_primary)
        .then_with(|| b.priority.total_cmp(&a.priority))
}
