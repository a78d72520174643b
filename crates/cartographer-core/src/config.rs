use serde::{Deserialize, Serialize};

/// Tuning for the route heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Region whose stops are visited before all others. Exact match.
    pub primary_region: String,
    /// Priority given to every rate-source stop.
    pub rate_stop_priority: f64,
    /// Priority added per connection level of a stock stop.
    pub connection_bonus: f64,
    /// Connection level assumed when a stock source has none.
    pub default_connection_level: u8,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            primary_region: "Mexico".to_string(),
            rate_stop_priority: 10.0,
            connection_bonus: 0.5,
            default_connection_level: 1,
        }
    }
}
