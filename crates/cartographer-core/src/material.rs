use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the six raw material kinds.
///
/// Declaration order is the canonical processing order: maps keyed by
/// `Material` iterate in this order, which keeps planning deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Metals,
    Ceramics,
    Resins,
    Chemicals,
    #[serde(alias = "specialAlloys")]
    SpecialAlloys,
    #[serde(alias = "chiralCrystals")]
    ChiralCrystals,
}

impl Material {
    /// Every material, in canonical order.
    pub const ALL: [Material; 6] = [
        Material::Metals,
        Material::Ceramics,
        Material::Resins,
        Material::Chemicals,
        Material::SpecialAlloys,
        Material::ChiralCrystals,
    ];

    /// The material consumed by rate sources to produce their output.
    pub const FUEL: Material = Material::ChiralCrystals;

    /// Human-readable label.
    pub fn display_name(self) -> &'static str {
        match self {
            Material::Metals => "Metals",
            Material::Ceramics => "Ceramics",
            Material::Resins => "Resins",
            Material::Chemicals => "Chemicals",
            Material::SpecialAlloys => "Special Alloys",
            Material::ChiralCrystals => "Chiral Crystals",
        }
    }

    pub fn is_fuel(self) -> bool {
        self == Self::FUEL
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Quantities keyed by material. Missing entries read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialMap(BTreeMap<Material, u64>);

impl MaterialMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Quantity of a material, zero when absent.
    pub fn get(&self, material: Material) -> u64 {
        self.0.get(&material).copied().unwrap_or(0)
    }

    /// Overwrite the quantity of a material.
    pub fn set(&mut self, material: Material, amount: u64) {
        self.0.insert(material, amount);
    }

    /// Add to the quantity of a material, saturating at `u64::MAX`.
    pub fn add(&mut self, material: Material, amount: u64) {
        let entry = self.0.entry(material).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    pub fn remove(&mut self, material: Material) -> Option<u64> {
        self.0.remove(&material)
    }

    pub fn contains(&self, material: Material) -> bool {
        self.0.contains_key(&material)
    }

    /// Sum of all quantities.
    pub fn total(&self) -> u64 {
        self.0.values().fold(0u64, |acc, &v| acc.saturating_add(v))
    }

    /// Number of materials with an entry (including zero entries).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(material, amount)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Material, u64)> + '_ {
        self.0.iter().map(|(&m, &a)| (m, a))
    }

    /// Iterate only entries with a non-zero amount.
    pub fn nonzero(&self) -> impl Iterator<Item = (Material, u64)> + '_ {
        self.iter().filter(|&(_, a)| a > 0)
    }
}

impl FromIterator<(Material, u64)> for MaterialMap {
    fn from_iter<I: IntoIterator<Item = (Material, u64)>>(iter: I) -> Self {
        let mut map = MaterialMap::new();
        for (material, amount) in iter {
            map.add(material, amount);
        }
        map
    }
}

impl From<BTreeMap<Material, u64>> for MaterialMap {
    fn from(map: BTreeMap<Material, u64>) -> Self {
        Self(map)
    }
}
