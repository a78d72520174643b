//! Immutable reference catalog of locations and structure templates.
//!
//! The catalog is assembled through a [`CatalogBuilder`] and frozen with
//! [`CatalogBuilder::build`]. It never changes afterwards; everything the
//! user edits lives in [`crate::user_state::UserState`] and is joined with
//! the catalog by location id in [`Catalog::snapshot`].

use crate::error::CatalogError;
use crate::id::{LocationId, StructureId};
use crate::location::{Location, RateSource, SourceKind, StockSource};
use crate::material::{Material, MaterialMap};
use crate::user_state::{LocationState, UserState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ===========================================================================
// Definitions
// ===========================================================================

/// A location definition.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDef {
    pub id: LocationId,
    pub name: String,
    pub region: String,
    /// Free-text hint shown to the player, e.g. "Complete Main Order #3".
    pub unlock_requirement: Option<String>,
    pub unlocked_by_default: bool,
    pub kind: LocationDefKind,
}

/// What a location is in the game, and what it brings to planning.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationDefKind {
    Facility { default_materials: MaterialMap },
    Prepper { default_materials: MaterialMap },
    Mine(MineDef),
}

/// Static mine parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MineDef {
    pub produces: Material,
    pub conversion_rate: f64,
    pub upgradeable: bool,
    pub upgrade_multiplier: f64,
    /// Chiral crystals needed to bring the mine online.
    pub fuel_required: Option<u64>,
    /// Output obtained from `fuel_required`.
    pub output: Option<u64>,
}

impl LocationDef {
    pub fn is_mine(&self) -> bool {
        matches!(self.kind, LocationDefKind::Mine(_))
    }

    pub fn mine(&self) -> Option<&MineDef> {
        match &self.kind {
            LocationDefKind::Mine(m) => Some(m),
            _ => None,
        }
    }

    /// Starting stock for facilities and preppers; empty for mines.
    pub fn default_materials(&self) -> Option<&MaterialMap> {
        match &self.kind {
            LocationDefKind::Facility { default_materials }
            | LocationDefKind::Prepper { default_materials } => Some(default_materials),
            LocationDefKind::Mine(_) => None,
        }
    }
}

/// Construction tier a structure belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PccLevel {
    /// PCC level 1 or 2.
    Level(u8),
    /// Named tiers such as "Auto Paver" or "Tracklayer".
    Named(String),
}

impl fmt::Display for PccLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PccLevel::Level(n) => write!(f, "PCC Level {n}"),
            PccLevel::Named(name) => f.write_str(name),
        }
    }
}

/// A buildable structure and its average material cost.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureDef {
    pub id: StructureId,
    pub name: String,
    pub pcc_level: PccLevel,
    pub category: String,
    pub description: String,
    pub requirements: MaterialMap,
    /// Actual cost depends on placement (e.g. bridge length).
    pub variable_requirements: bool,
    pub notes: Option<String>,
}

// ===========================================================================
// Builder
// ===========================================================================

/// Builder for an immutable [`Catalog`]. Rejects duplicate ids.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    locations: Vec<LocationDef>,
    location_index: HashMap<LocationId, usize>,
    structures: Vec<StructureDef>,
    structure_index: HashMap<StructureId, usize>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_location(&mut self, def: LocationDef) -> Result<(), CatalogError> {
        if self.location_index.contains_key(&def.id) {
            return Err(CatalogError::DuplicateLocation(def.id));
        }
        self.location_index
            .insert(def.id.clone(), self.locations.len());
        self.locations.push(def);
        Ok(())
    }

    pub fn add_structure(&mut self, def: StructureDef) -> Result<(), CatalogError> {
        if self.structure_index.contains_key(&def.id) {
            return Err(CatalogError::DuplicateStructure(def.id));
        }
        self.structure_index
            .insert(def.id.clone(), self.structures.len());
        self.structures.push(def);
        Ok(())
    }

    /// Freeze the catalog.
    pub fn build(self) -> Catalog {
        Catalog {
            locations: self.locations,
            location_index: self.location_index,
            structures: self.structures,
            structure_index: self.structure_index,
        }
    }
}

// ===========================================================================
// Catalog
// ===========================================================================

/// Immutable catalog. Locations and structures keep insertion order.
#[derive(Debug, Clone)]
pub struct Catalog {
    locations: Vec<LocationDef>,
    location_index: HashMap<LocationId, usize>,
    structures: Vec<StructureDef>,
    structure_index: HashMap<StructureId, usize>,
}

impl Catalog {
    pub fn location(&self, id: &LocationId) -> Option<&LocationDef> {
        self.location_index.get(id).map(|&i| &self.locations[i])
    }

    pub fn locations(&self) -> &[LocationDef] {
        &self.locations
    }

    pub fn structure(&self, id: &StructureId) -> Option<&StructureDef> {
        self.structure_index.get(id).map(|&i| &self.structures[i])
    }

    pub fn structures(&self) -> &[StructureDef] {
        &self.structures
    }

    /// Structures in `category`. `"All"` matches everything.
    pub fn structures_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a StructureDef> + 'a {
        self.structures
            .iter()
            .filter(move |s| category == "All" || s.category == category)
    }

    pub fn structures_at_level<'a>(
        &'a self,
        level: &'a PccLevel,
    ) -> impl Iterator<Item = &'a StructureDef> + 'a {
        self.structures.iter().filter(move |s| &s.pcc_level == level)
    }

    /// Distinct structure categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for s in &self.structures {
            if !seen.contains(&s.category.as_str()) {
                seen.push(s.category.as_str());
            }
        }
        seen
    }

    /// Join the catalog with the user's overlay into planner locations.
    ///
    /// Output follows catalog order. A location without an overlay entry
    /// uses its initial state; overlay entries unknown to the catalog are
    /// ignored.
    pub fn snapshot(&self, state: &UserState) -> Vec<Location> {
        self.locations
            .iter()
            .map(|def| match state.location(&def.id) {
                Some(overlay) => join(def, overlay),
                None => join(def, &LocationState::initial(def)),
            })
            .collect()
    }
}

fn join(def: &LocationDef, overlay: &LocationState) -> Location {
    let kind = match &def.kind {
        LocationDefKind::Facility { .. } | LocationDefKind::Prepper { .. } => {
            SourceKind::Stock(StockSource {
                available: overlay.available.clone(),
                connection_level: overlay.connection_level,
            })
        }
        LocationDefKind::Mine(mine) => SourceKind::Rate(RateSource {
            produces: mine.produces,
            conversion_rate: mine.conversion_rate,
            upgraded: overlay.upgraded,
            upgrade_multiplier: mine.upgrade_multiplier,
        }),
    };
    Location {
        id: def.id.clone(),
        name: def.name.clone(),
        region: def.region.clone(),
        unlocked: overlay.unlocked,
        active: overlay.active,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn duplicate_location_rejected() {
        let mut builder = CatalogBuilder::new();
        builder
            .add_location(facility_def("c1", "Mexico", &[(Material::Metals, 10)]))
            .unwrap();
        let err = builder
            .add_location(facility_def("c1", "Mexico", &[]))
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateLocation(LocationId::new("c1")));
    }

    #[test]
    fn duplicate_structure_rejected() {
        let mut builder = CatalogBuilder::new();
        builder
            .add_structure(structure_def("postbox", "Utility", 1, &[]))
            .unwrap();
        let err = builder
            .add_structure(structure_def("postbox", "Utility", 1, &[]))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateStructure(_)));
    }

    #[test]
    fn lookup_by_id() {
        let catalog = sample_catalog();
        let def = catalog.location(&LocationId::new("villa-libre")).unwrap();
        assert_eq!(def.name, "Villa Libre");
        assert!(!def.is_mine());
        assert!(catalog.location(&LocationId::new("nowhere")).is_none());

        let mine = catalog
            .location(&LocationId::new("mine-north-of-f1"))
            .unwrap();
        assert_eq!(mine.mine().unwrap().produces, Material::SpecialAlloys);
        assert!(mine.default_materials().is_none());
    }

    #[test]
    fn structure_filters() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.structures_in_category("All").count(),
            catalog.structures().len()
        );
        let utility: Vec<_> = catalog
            .structures_in_category("Utility")
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(utility, vec!["postbox", "timefall-shelter"]);

        let level2 = catalog.structures_at_level(&PccLevel::Level(2)).count();
        assert_eq!(level2, 1);
        let paver = PccLevel::Named("Auto Paver".into());
        assert_eq!(catalog.structures_at_level(&paver).count(), 1);
    }

    #[test]
    fn categories_first_seen_order() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.categories(),
            vec!["Transportation", "Utility", "Reconnaissance", "Infrastructure"]
        );
    }

    #[test]
    fn pcc_level_display() {
        assert_eq!(PccLevel::Level(1).to_string(), "PCC Level 1");
        assert_eq!(PccLevel::Named("Tracklayer".into()).to_string(), "Tracklayer");
    }

    #[test]
    fn snapshot_follows_catalog_order_and_overlay() {
        let catalog = sample_catalog();
        let mut state = UserState::initial(&catalog);
        state
            .set_available(&catalog, &LocationId::new("villa-libre"), Material::Resins, 7)
            .unwrap();
        state
            .set_unlocked(&catalog, &LocationId::new("villa-libre"), true)
            .unwrap();

        let snapshot = catalog.snapshot(&state);
        let ids: Vec<_> = snapshot.iter().map(|l| l.id.as_str()).collect();
        let catalog_ids: Vec<_> = catalog.locations().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, catalog_ids);

        let villa = snapshot.iter().find(|l| l.id.as_str() == "villa-libre").unwrap();
        assert!(villa.unlocked);
        assert_eq!(villa.available(Material::Resins), 7);
    }

    #[test]
    fn snapshot_defaults_missing_overlay() {
        let catalog = sample_catalog();
        let state = UserState::default();
        let snapshot = catalog.snapshot(&state);
        assert_eq!(snapshot.len(), catalog.locations().len());

        let c1 = &snapshot[0];
        assert_eq!(c1.id.as_str(), "ciudad-nudo-del-norte");
        assert!(c1.unlocked);
        assert_eq!(c1.as_stock().unwrap().connection_level, Some(1));
        assert_eq!(c1.available(Material::Metals), 200);
    }

    #[test]
    fn snapshot_carries_mine_upgrade() {
        let catalog = sample_catalog();
        let mut state = UserState::initial(&catalog);
        let id = LocationId::new("mine-north-of-f1");
        state.set_upgraded(&catalog, &id, true).unwrap();
        let snapshot = catalog.snapshot(&state);
        let mine = snapshot.iter().find(|l| l.id == id).unwrap();
        let rate = mine.as_rate().unwrap();
        assert!(rate.upgraded);
        assert_eq!(rate.effective_rate(), rate.conversion_rate * 1.5);
    }
}
