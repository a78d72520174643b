//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available to other crates' tests via the `test-utils` feature.

use crate::catalog::{
    Catalog, CatalogBuilder, LocationDef, LocationDefKind, MineDef, PccLevel, StructureDef,
};
use crate::demand::DemandVector;
use crate::id::{LocationId, StructureId};
use crate::location::{Location, RateSource, SourceKind, StockSource};
use crate::material::{Material, MaterialMap};

// ===========================================================================
// Snapshot locations
// ===========================================================================

pub fn materials(entries: &[(Material, u64)]) -> MaterialMap {
    entries.iter().copied().collect()
}

/// An unlocked, active stock source with no connection level.
pub fn stock(id: &str, region: &str, available: &[(Material, u64)]) -> Location {
    Location {
        id: LocationId::new(id),
        name: id.to_uppercase(),
        region: region.to_string(),
        unlocked: true,
        active: true,
        kind: SourceKind::Stock(StockSource {
            available: materials(available),
            connection_level: None,
        }),
    }
}

pub fn stock_with_level(
    id: &str,
    region: &str,
    available: &[(Material, u64)],
    level: u8,
) -> Location {
    let mut loc = stock(id, region, available);
    if let SourceKind::Stock(s) = &mut loc.kind {
        s.connection_level = Some(level);
    }
    loc
}

/// An unlocked, active, un-upgraded rate source with a 1.5x upgrade multiplier.
pub fn mine(id: &str, region: &str, produces: Material, rate: f64) -> Location {
    Location {
        id: LocationId::new(id),
        name: id.to_uppercase(),
        region: region.to_string(),
        unlocked: true,
        active: true,
        kind: SourceKind::Rate(RateSource {
            produces,
            conversion_rate: rate,
            upgraded: false,
            upgrade_multiplier: 1.5,
        }),
    }
}

pub fn upgraded_mine(
    id: &str,
    region: &str,
    produces: Material,
    rate: f64,
    multiplier: f64,
) -> Location {
    let mut loc = mine(id, region, produces, rate);
    if let SourceKind::Rate(r) = &mut loc.kind {
        r.upgraded = true;
        r.upgrade_multiplier = multiplier;
    }
    loc
}

pub fn locked(mut loc: Location) -> Location {
    loc.unlocked = false;
    loc
}

pub fn inactive(mut loc: Location) -> Location {
    loc.active = false;
    loc
}

pub fn demand(entries: &[(Material, u64)]) -> DemandVector {
    entries.iter().copied().collect()
}

// ===========================================================================
// Catalog definitions
// ===========================================================================

pub fn facility_def(id: &str, region: &str, defaults: &[(Material, u64)]) -> LocationDef {
    LocationDef {
        id: LocationId::new(id),
        name: id.to_string(),
        region: region.to_string(),
        unlock_requirement: None,
        unlocked_by_default: false,
        kind: LocationDefKind::Facility {
            default_materials: materials(defaults),
        },
    }
}

pub fn prepper_def(id: &str, region: &str, defaults: &[(Material, u64)]) -> LocationDef {
    LocationDef {
        kind: LocationDefKind::Prepper {
            default_materials: materials(defaults),
        },
        ..facility_def(id, region, &[])
    }
}

pub fn mine_def(
    id: &str,
    region: &str,
    produces: Material,
    rate: f64,
    upgradeable: bool,
) -> LocationDef {
    LocationDef {
        kind: LocationDefKind::Mine(MineDef {
            produces,
            conversion_rate: rate,
            upgradeable,
            upgrade_multiplier: 1.5,
            fuel_required: None,
            output: None,
        }),
        ..facility_def(id, region, &[])
    }
}

pub fn structure_def(
    id: &str,
    category: &str,
    level: u8,
    requirements: &[(Material, u64)],
) -> StructureDef {
    StructureDef {
        id: StructureId::new(id),
        name: id.to_string(),
        pcc_level: PccLevel::Level(level),
        category: category.to_string(),
        description: String::new(),
        requirements: materials(requirements),
        variable_requirements: false,
        notes: None,
    }
}

/// A small catalog modelled on the opening regions of the game.
///
/// Locations (catalog order):
/// - `ciudad-nudo-del-norte`: facility, Mexico, unlocked by default
/// - `villa-libre`: prepper, Mexico
/// - `mine-north-of-f1`: special-alloys mine (2.4), Australia, unlocked by default
/// - `smoke-hill-mine`: ceramics mine (1.2), Mexico
/// - `old-quarry`: chemicals mine (0.6), Australia, not upgradeable
/// - `south-edge-mine`: metals mine (2.0), Australia
pub fn sample_catalog() -> Catalog {
    use Material::*;

    let mut b = CatalogBuilder::new();

    let mut c1 = facility_def(
        "ciudad-nudo-del-norte",
        "Mexico",
        &[
            (Metals, 200),
            (Ceramics, 150),
            (Resins, 100),
            (Chemicals, 75),
            (SpecialAlloys, 50),
            (ChiralCrystals, 300),
        ],
    );
    c1.name = "Ciudad Nudo del Norte (C1)".into();
    c1.unlocked_by_default = true;

    let mut villa = prepper_def(
        "villa-libre",
        "Mexico",
        &[
            (Metals, 150),
            (Ceramics, 200),
            (Resins, 120),
            (Chemicals, 80),
            (SpecialAlloys, 40),
            (ChiralCrystals, 250),
        ],
    );
    villa.name = "Villa Libre".into();

    let mut f1 = mine_def("mine-north-of-f1", "Australia", SpecialAlloys, 2.4, true);
    f1.name = "Mine North of F1".into();
    f1.unlocked_by_default = true;

    let mut smoke = mine_def("smoke-hill-mine", "Mexico", Ceramics, 1.2, true);
    smoke.name = "Smoke Hill Mine".into();

    let mut quarry = mine_def("old-quarry", "Australia", Chemicals, 0.6, false);
    quarry.name = "Old Quarry".into();

    let mut south = mine_def("south-edge-mine", "Australia", Metals, 2.0, true);
    south.name = "South Edge Mine".into();

    for def in [c1, villa, f1, smoke, quarry, south] {
        b.add_location(def).expect("sample ids are unique");
    }

    let mut bridge = structure_def("bridge-foundation", "Transportation", 1, &[(Metals, 800)]);
    bridge.variable_requirements = true;
    let postbox = structure_def(
        "postbox",
        "Utility",
        1,
        &[(Metals, 200), (Ceramics, 150), (Resins, 100), (ChiralCrystals, 50)],
    );
    let watchtower = structure_def(
        "watchtower",
        "Reconnaissance",
        1,
        &[(Metals, 300), (Ceramics, 200), (Resins, 150), (ChiralCrystals, 100)],
    );
    let shelter = structure_def(
        "timefall-shelter",
        "Utility",
        1,
        &[(Metals, 250), (Ceramics, 300), (Resins, 200), (ChiralCrystals, 150)],
    );
    let zip = structure_def(
        "zip-line",
        "Transportation",
        2,
        &[
            (Metals, 400),
            (Ceramics, 200),
            (Resins, 300),
            (Chemicals, 100),
            (SpecialAlloys, 200),
            (ChiralCrystals, 250),
        ],
    );
    let mut road = structure_def(
        "road-segment",
        "Infrastructure",
        0,
        &[(Metals, 1200), (Ceramics, 800), (ChiralCrystals, 400)],
    );
    road.pcc_level = PccLevel::Named("Auto Paver".into());
    road.variable_requirements = true;

    for def in [bridge, postbox, watchtower, shelter, zip, road] {
        b.add_structure(def).expect("sample ids are unique");
    }

    b.build()
}
