//! Two-phase greedy allocation of demand across sources.
//!
//! For each demanded material, in canonical [`Material`] order:
//!
//! 1. **Stock phase** -- eligible stock sources are drained in snapshot
//!    order until the material is covered or stock runs out.
//! 2. **Rate phase** -- any remainder goes to the single eligible rate source
//!    with the highest effective rate for that material. Rate sources have
//!    unlimited output, so the whole remainder is assigned and costed in
//!    fuel. Without a candidate the remainder is recorded as unmet.
//!
//! The snapshot is only borrowed; nothing is mutated or cached.

use crate::demand::DemandVector;
use crate::id::LocationId;
use crate::location::{Location, RateSource};
use crate::material::{Material, MaterialMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Materials drawn from one stock location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAllocation {
    pub name: String,
    pub materials: MaterialMap,
}

/// The rate source chosen for one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateAllocation {
    pub amount: u64,
    pub source_id: LocationId,
    pub source_name: String,
    /// Fuel (chiral crystals) needed to produce `amount`.
    pub fuel_cost: u64,
}

/// Per-material breakdown of how demand was covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub material: Material,
    pub total_needed: u64,
    pub from_stock: u64,
    pub from_rate: u64,
    pub unmet: u64,
}

/// Result of [`plan`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcingPlan {
    pub from_stock: BTreeMap<LocationId, StockAllocation>,
    pub from_rate: BTreeMap<Material, RateAllocation>,
    pub total_fuel_needed: u64,
    /// Only materials with a positive shortfall appear here.
    pub unmet: MaterialMap,
    /// One entry per material that received anything, in processing order.
    pub summary: Vec<MaterialSummary>,
}

impl SourcingPlan {
    /// True when every demanded unit was sourced.
    pub fn is_fully_sourced(&self) -> bool {
        self.unmet.is_empty()
    }

    /// Amount of `material` drawn from a given stock location.
    pub fn stock_taken(&self, id: &LocationId, material: Material) -> u64 {
        self.from_stock
            .get(id)
            .map_or(0, |alloc| alloc.materials.get(material))
    }
}

/// Fuel needed to produce `amount` at `effective_rate` output per unit of fuel.
///
/// `effective_rate` must be positive.
pub fn fuel_cost(amount: u64, effective_rate: f64) -> u64 {
    debug_assert!(effective_rate > 0.0);
    (amount as f64 / effective_rate).ceil() as u64
}

/// Pick the eligible rate source with the highest effective rate for
/// `material`. Ties go to the first candidate in snapshot order; sources
/// with a non-positive (or NaN) effective rate never qualify.
pub fn best_rate_source(
    material: Material,
    locations: &[Location],
) -> Option<(&Location, &RateSource, f64)> {
    let mut best: Option<(&Location, &RateSource, f64)> = None;
    for loc in locations.iter().filter(|l| l.is_eligible()) {
        let Some(rate) = loc.as_rate() else { continue };
        if rate.produces != material {
            continue;
        }
        let effective = rate.effective_rate();
        if effective.is_nan() || effective <= 0.0 {
            continue;
        }
        match best {
            Some((_, _, current)) if effective <= current => {}
            _ => best = Some((loc, rate, effective)),
        }
    }
    best
}

/// Allocate `demand` across the eligible locations of a snapshot.
pub fn plan(demand: &DemandVector, locations: &[Location]) -> SourcingPlan {
    let stock_sources: Vec<&Location> = locations
        .iter()
        .filter(|l| l.is_eligible() && l.as_stock().is_some())
        .collect();

    debug!(
        materials = demand.entries().count(),
        stock_sources = stock_sources.len(),
        locations = locations.len(),
        "planning material sourcing"
    );

    let mut result = SourcingPlan::default();

    for (material, needed) in demand.entries() {
        let mut remaining = needed;
        let mut from_stock = 0u64;
        let mut from_rate = 0u64;

        for loc in &stock_sources {
            if remaining == 0 {
                break;
            }
            let take = loc.available(material).min(remaining);
            if take == 0 {
                continue;
            }
            remaining -= take;
            from_stock += take;
            trace!(location = %loc.id, %material, take, remaining, "stock allocation");

            result
                .from_stock
                .entry(loc.id.clone())
                .or_insert_with(|| StockAllocation {
                    name: loc.name.clone(),
                    materials: MaterialMap::new(),
                })
                .materials
                .add(material, take);
        }

        if remaining > 0 {
            match best_rate_source(material, locations) {
                Some((loc, _, effective)) => {
                    let fuel = fuel_cost(remaining, effective);
                    trace!(location = %loc.id, %material, amount = remaining, fuel, "rate allocation");
                    result.total_fuel_needed = result.total_fuel_needed.saturating_add(fuel);
                    result.from_rate.insert(
                        material,
                        RateAllocation {
                            amount: remaining,
                            source_id: loc.id.clone(),
                            source_name: loc.name.clone(),
                            fuel_cost: fuel,
                        },
                    );
                    from_rate = remaining;
                    remaining = 0;
                }
                None => {
                    debug!(%material, unmet = remaining, "no eligible source for remainder");
                    result.unmet.set(material, remaining);
                }
            }
        }

        if from_stock > 0 || from_rate > 0 {
            result.summary.push(MaterialSummary {
                material,
                total_needed: needed,
                from_stock,
                from_rate,
                unmet: remaining,
            });
        }
    }

    result
}

/// Plan several independent demands against one snapshot.
///
/// With the `parallel` feature the demands are planned on the rayon pool;
/// results are returned in input order either way.
pub fn plan_batch(demands: &[DemandVector], locations: &[Location]) -> Vec<SourcingPlan> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        demands.par_iter().map(|d| plan(d, locations)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        demands.iter().map(|d| plan(d, locations)).collect()
    }
}
