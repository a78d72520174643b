//! Serde data file structs for catalog definitions.
//!
//! These structs define the on-disk format for locations, structures and
//! planner settings. They are deserialized from RON, JSON, or TOML data
//! files and then validated into catalog types by the loader.

use cartographer_core::catalog::{LocationDef, LocationDefKind, MineDef, PccLevel, StructureDef};
use cartographer_core::id::{LocationId, StructureId};
use cartographer_core::material::{Material, MaterialMap};
use serde::Deserialize;
use std::path::Path;

use crate::loader::DataLoadError;

// ===========================================================================
// Locations
// ===========================================================================

/// A location definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationData {
    pub id: String,
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub unlock_requirement: Option<String>,
    #[serde(default)]
    pub unlocked_by_default: bool,
    pub kind: LocationKindData,
}

/// The kind of location and its kind-specific fields.
#[derive(Debug, Clone, Deserialize)]
pub enum LocationKindData {
    Facility {
        #[serde(default)]
        default_materials: MaterialMap,
    },
    Prepper {
        #[serde(default)]
        default_materials: MaterialMap,
    },
    Mine {
        produces: Material,
        conversion_rate: f64,
        #[serde(default)]
        upgradeable: bool,
        #[serde(default = "default_upgrade_multiplier")]
        upgrade_multiplier: f64,
        #[serde(default)]
        fuel_required: Option<u64>,
        #[serde(default)]
        output: Option<u64>,
    },
}

fn default_upgrade_multiplier() -> f64 {
    1.5
}

impl LocationData {
    /// Validate and convert into a catalog definition. `file` is only used
    /// for error reporting.
    pub fn into_def(self, file: &Path) -> Result<LocationDef, DataLoadError> {
        let kind = match self.kind {
            LocationKindData::Facility { default_materials } => {
                LocationDefKind::Facility { default_materials }
            }
            LocationKindData::Prepper { default_materials } => {
                LocationDefKind::Prepper { default_materials }
            }
            LocationKindData::Mine {
                produces,
                conversion_rate,
                upgradeable,
                upgrade_multiplier,
                fuel_required,
                output,
            } => {
                if !(conversion_rate.is_finite() && conversion_rate > 0.0) {
                    return Err(invalid(
                        file,
                        &self.id,
                        format!("conversion_rate must be positive, got {conversion_rate}"),
                    ));
                }
                if !(upgrade_multiplier.is_finite() && upgrade_multiplier >= 1.0) {
                    return Err(invalid(
                        file,
                        &self.id,
                        format!("upgrade_multiplier must be at least 1, got {upgrade_multiplier}"),
                    ));
                }
                LocationDefKind::Mine(MineDef {
                    produces,
                    conversion_rate,
                    upgradeable,
                    upgrade_multiplier,
                    fuel_required,
                    output,
                })
            }
        };

        Ok(LocationDef {
            id: LocationId::new(self.id),
            name: self.name,
            region: self.region,
            unlock_requirement: self.unlock_requirement,
            unlocked_by_default: self.unlocked_by_default,
            kind,
        })
    }
}

fn invalid(file: &Path, id: &str, detail: String) -> DataLoadError {
    DataLoadError::InvalidDefinition {
        file: file.to_path_buf(),
        id: id.to_string(),
        detail,
    }
}

// ===========================================================================
// Structures
// ===========================================================================

/// A structure definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct StructureData {
    pub id: String,
    pub name: String,
    pub pcc_level: PccLevel,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "average_requirements")]
    pub requirements: MaterialMap,
    #[serde(default)]
    pub variable_requirements: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl StructureData {
    pub fn into_def(self) -> StructureDef {
        StructureDef {
            id: StructureId::new(self.id),
            name: self.name,
            pcc_level: self.pcc_level,
            category: self.category,
            description: self.description,
            requirements: self.requirements,
            variable_requirements: self.variable_requirements,
            notes: self.notes,
        }
    }
}

// ===========================================================================
// TOML wrappers
// ===========================================================================

/// Wrapper for a list of locations in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlLocations {
    pub locations: Vec<LocationData>,
}

/// Wrapper for a list of structures in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlStructures {
    pub structures: Vec<StructureData>,
}

// ===========================================================================
// Tests
// ===========================================================================
