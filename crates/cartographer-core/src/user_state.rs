//! The user's mutable overlay on top of the catalog.
//!
//! Per-location progress (unlocked, active, on-hand stock, connection
//! level, mine upgrade) is keyed by [`LocationId`] and never merged into
//! the catalog. The build queue holds the structures the user intends to
//! build, each with its own editable copy of the material requirements.

use crate::catalog::{Catalog, LocationDef, LocationDefKind, StructureDef};
use crate::error::CatalogError;
use crate::id::{BuildItemId, LocationId, StructureId};
use crate::material::{Material, MaterialMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Valid connection levels for facilities and preppers.
pub const CONNECTION_LEVELS: std::ops::RangeInclusive<u8> = 1..=5;

/// Overlay for a single location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    pub unlocked: bool,
    pub active: bool,
    #[serde(default)]
    pub available: MaterialMap,
    /// `Some` for stock locations only.
    #[serde(default)]
    pub connection_level: Option<u8>,
    /// Meaningful for mines only.
    #[serde(default)]
    pub upgraded: bool,
}

impl LocationState {
    /// Fresh overlay for a catalog location.
    pub fn initial(def: &LocationDef) -> Self {
        match &def.kind {
            LocationDefKind::Facility { default_materials }
            | LocationDefKind::Prepper { default_materials } => Self {
                unlocked: def.unlocked_by_default,
                active: true,
                available: default_materials.clone(),
                connection_level: Some(1),
                upgraded: false,
            },
            LocationDefKind::Mine(_) => Self {
                unlocked: def.unlocked_by_default,
                active: true,
                available: MaterialMap::new(),
                connection_level: None,
                upgraded: false,
            },
        }
    }
}

// ===========================================================================
// Build queue
// ===========================================================================

/// A structure queued for construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildItem {
    pub id: BuildItemId,
    pub structure_id: StructureId,
    pub structure_name: String,
    /// User-editable copy of the structure's requirement template.
    pub requirements: MaterialMap,
    pub priority: u32,
}

/// Ordered list of structures to build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildQueue {
    items: Vec<BuildItem>,
    next_id: u64,
}

impl BuildQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a structure. Its requirements are copied so later edits don't
    /// touch the catalog.
    pub fn add(&mut self, structure: &StructureDef) -> BuildItemId {
        let id = BuildItemId(self.next_id);
        self.next_id += 1;
        self.items.push(BuildItem {
            id,
            structure_id: structure.id.clone(),
            structure_name: structure.name.clone(),
            requirements: structure.requirements.clone(),
            priority: self.items.len() as u32 + 1,
        });
        id
    }

    pub fn remove(&mut self, id: BuildItemId) -> Result<BuildItem, CatalogError> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(CatalogError::UnknownBuildItem(id))?;
        Ok(self.items.remove(pos))
    }

    /// Override one material requirement of a queued item.
    pub fn set_requirement(
        &mut self,
        id: BuildItemId,
        material: Material,
        amount: u64,
    ) -> Result<(), CatalogError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(CatalogError::UnknownBuildItem(id))?;
        item.requirements.set(material, amount);
        Ok(())
    }

    pub fn get(&self, id: BuildItemId) -> Option<&BuildItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[BuildItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// ===========================================================================
// User state
// ===========================================================================

/// Everything the user edits: location overlays plus the build queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    locations: BTreeMap<LocationId, LocationState>,
    pub build_queue: BuildQueue,
}

impl UserState {
    /// Initial overlay for every catalog location and an empty queue.
    pub fn initial(catalog: &Catalog) -> Self {
        let locations = catalog
            .locations()
            .iter()
            .map(|def| (def.id.clone(), LocationState::initial(def)))
            .collect();
        Self {
            locations,
            build_queue: BuildQueue::new(),
        }
    }

    /// Discard all progress and the build queue.
    pub fn reset(&mut self, catalog: &Catalog) {
        *self = Self::initial(catalog);
    }

    pub fn location(&self, id: &LocationId) -> Option<&LocationState> {
        self.locations.get(id)
    }

    pub fn locations(&self) -> impl Iterator<Item = (&LocationId, &LocationState)> {
        self.locations.iter()
    }

    pub fn set_unlocked(
        &mut self,
        catalog: &Catalog,
        id: &LocationId,
        unlocked: bool,
    ) -> Result<(), CatalogError> {
        let def = location_def(catalog, id)?;
        self.overlay_or_initial(def).unlocked = unlocked;
        Ok(())
    }

    pub fn set_active(
        &mut self,
        catalog: &Catalog,
        id: &LocationId,
        active: bool,
    ) -> Result<(), CatalogError> {
        let def = location_def(catalog, id)?;
        self.overlay_or_initial(def).active = active;
        Ok(())
    }

    /// Record the on-hand stock of a material at a facility or prepper.
    pub fn set_available(
        &mut self,
        catalog: &Catalog,
        id: &LocationId,
        material: Material,
        amount: u64,
    ) -> Result<(), CatalogError> {
        let def = self.stock_def(catalog, id)?;
        self.overlay_or_initial(def).available.set(material, amount);
        Ok(())
    }

    pub fn set_connection_level(
        &mut self,
        catalog: &Catalog,
        id: &LocationId,
        level: u8,
    ) -> Result<(), CatalogError> {
        if !CONNECTION_LEVELS.contains(&level) {
            return Err(CatalogError::InvalidConnectionLevel {
                id: id.clone(),
                level,
            });
        }
        let def = self.stock_def(catalog, id)?;
        self.overlay_or_initial(def).connection_level = Some(level);
        Ok(())
    }

    pub fn set_upgraded(
        &mut self,
        catalog: &Catalog,
        id: &LocationId,
        upgraded: bool,
    ) -> Result<(), CatalogError> {
        let def = location_def(catalog, id)?;
        let mine = def
            .mine()
            .ok_or_else(|| CatalogError::NotARateSource(id.clone()))?;
        if upgraded && !mine.upgradeable {
            return Err(CatalogError::NotUpgradeable(id.clone()));
        }
        self.overlay_or_initial(def).upgraded = upgraded;
        Ok(())
    }

    /// Queue a catalog structure by id.
    pub fn queue_structure(
        &mut self,
        catalog: &Catalog,
        id: &StructureId,
    ) -> Result<BuildItemId, CatalogError> {
        let structure = catalog
            .structure(id)
            .ok_or_else(|| CatalogError::UnknownStructure(id.clone()))?;
        Ok(self.build_queue.add(structure))
    }

    fn overlay_or_initial(&mut self, def: &LocationDef) -> &mut LocationState {
        self.locations
            .entry(def.id.clone())
            .or_insert_with(|| LocationState::initial(def))
    }

    fn stock_def<'c>(
        &self,
        catalog: &'c Catalog,
        id: &LocationId,
    ) -> Result<&'c LocationDef, CatalogError> {
        let def = location_def(catalog, id)?;
        if def.is_mine() {
            return Err(CatalogError::NotAStockSource(id.clone()));
        }
        Ok(def)
    }
}

fn location_def<'c>(catalog: &'c Catalog, id: &LocationId) -> Result<&'c LocationDef, CatalogError> {
    catalog
        .location(id)
        .ok_or_else(|| CatalogError::UnknownLocation(id.clone()))
}
