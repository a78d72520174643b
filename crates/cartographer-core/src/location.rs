use crate::id::LocationId;
use crate::material::{Material, MaterialMap};
use serde::{Deserialize, Serialize};

/// A location as seen by the planner: catalog identity joined with the
/// user's overlay. Produced by [`crate::catalog::Catalog::snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub region: String,
    pub unlocked: bool,
    pub active: bool,
    pub kind: SourceKind,
}

/// How a location supplies materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Finite, user-edited on-hand stock.
    Stock(StockSource),
    /// Converts fuel into a single material with unlimited output.
    Rate(RateSource),
}

/// A facility or prepper holding a finite amount of each material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockSource {
    pub available: MaterialMap,
    /// Connection level 1-5. Affects route priority only.
    #[serde(default)]
    pub connection_level: Option<u8>,
}

/// A mine converting chiral crystals into one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSource {
    pub produces: Material,
    /// Output units per unit of fuel consumed.
    pub conversion_rate: f64,
    #[serde(default)]
    pub upgraded: bool,
    pub upgrade_multiplier: f64,
}

impl RateSource {
    /// Base conversion rate, multiplied by the upgrade multiplier when upgraded.
    pub fn effective_rate(&self) -> f64 {
        if self.upgraded {
            self.conversion_rate * self.upgrade_multiplier
        } else {
            self.conversion_rate
        }
    }
}

impl Location {
    /// Only unlocked, active locations take part in planning.
    pub fn is_eligible(&self) -> bool {
        self.unlocked && self.active
    }

    pub fn as_stock(&self) -> Option<&StockSource> {
        match &self.kind {
            SourceKind::Stock(s) => Some(s),
            SourceKind::Rate(_) => None,
        }
    }

    pub fn as_rate(&self) -> Option<&RateSource> {
        match &self.kind {
            SourceKind::Rate(r) => Some(r),
            SourceKind::Stock(_) => None,
        }
    }

    /// On-hand stock of `material`. Zero for rate sources and for materials
    /// the location doesn't list.
    pub fn available(&self, material: Material) -> u64 {
        self.as_stock().map_or(0, |s| s.available.get(material))
    }
}
