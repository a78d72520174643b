use crate::sourcing::SourcingPlan;
use serde::{Deserialize, Serialize};

/// Summary statistics for a [`SourcingPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    pub total_required: u64,
    pub total_from_stock: u64,
    pub total_from_rate: u64,
    pub total_unmet: u64,
    /// Percentage of demand sourced, rounded to two decimals. An empty
    /// demand counts as fully sourced; any unmet demand caps it at 99.99.
    pub fulfillment_rate: f64,
    pub fuel_needed: u64,
    /// Distinct stock locations plus distinct rate-sourced materials.
    pub source_count: usize,
}

/// Highest rate reported while any demand is unmet.
const MAX_PARTIAL_RATE: f64 = 99.99;

pub fn metrics(plan: &SourcingPlan) -> EfficiencyMetrics {
    let total_from_stock = plan
        .from_stock
        .values()
        .fold(0u64, |acc, a| acc.saturating_add(a.materials.total()));
    let total_from_rate = plan
        .from_rate
        .values()
        .fold(0u64, |acc, a| acc.saturating_add(a.amount));
    let total_unmet = plan.unmet.total();
    let sourced = total_from_stock.saturating_add(total_from_rate);
    let total_required = sourced.saturating_add(total_unmet);

    let fulfillment_rate = if total_unmet == 0 {
        100.0
    } else {
        // A residual shortfall must never round up to a full 100.
        round2(sourced as f64 / total_required as f64 * 100.0).min(MAX_PARTIAL_RATE)
    };

    EfficiencyMetrics {
        total_required,
        total_from_stock,
        total_from_rate,
        total_unmet,
        fulfillment_rate,
        fuel_needed: plan.total_fuel_needed,
        source_count: plan.from_stock.len() + plan.from_rate.len(),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
