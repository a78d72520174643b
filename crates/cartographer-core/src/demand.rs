use crate::material::{Material, MaterialMap};
use crate::user_state::BuildQueue;
use serde::{Deserialize, Serialize};

/// Total material requirement of a planning request.
///
/// Zero entries are kept but ignored by the sourcing engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DemandVector(MaterialMap);

impl DemandVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum every queued item's requirement overrides.
    pub fn from_queue(queue: &BuildQueue) -> Self {
        queue
            .items()
            .iter()
            .flat_map(|item| item.requirements.nonzero())
            .collect()
    }

    pub fn get(&self, material: Material) -> u64 {
        self.0.get(material)
    }

    pub fn add(&mut self, material: Material, amount: u64) {
        self.0.add(material, amount);
    }

    /// Materials with non-zero demand, in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (Material, u64)> + '_ {
        self.0.nonzero()
    }

    /// True when nothing is demanded.
    pub fn is_empty(&self) -> bool {
        self.0.nonzero().next().is_none()
    }

    pub fn total(&self) -> u64 {
        self.0.total()
    }

    pub fn as_map(&self) -> &MaterialMap {
        &self.0
    }
}

impl FromIterator<(Material, u64)> for DemandVector {
    fn from_iter<I: IntoIterator<Item = (Material, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<MaterialMap> for DemandVector {
    fn from(map: MaterialMap) -> Self {
        Self(map)
    }
}
