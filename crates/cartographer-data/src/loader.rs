//! Loading pipeline: finds data files, deserializes them, builds the catalog.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! deserialization helpers, plus [`load_catalog`] which ties them together.

use cartographer_core::CatalogError;
use cartographer_core::catalog::{Catalog, CatalogBuilder};
use cartographer_core::config::PlannerConfig;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::schema::{LocationData, StructureData};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A definition parsed but carries values the planner can't use.
    #[error("invalid definition '{id}' in {file}: {detail}")]
    InvalidDefinition {
        file: PathBuf,
        id: String,
        detail: String,
    },

    /// The catalog builder rejected a definition.
    #[error("catalog error in {file}: {source}")]
    Catalog {
        file: PathBuf,
        source: CatalogError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Formats
// ===========================================================================

/// Supported data file formats, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Ron, Format::Toml, Format::Json];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Ron => "ron",
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }

    fn parse<T: DeserializeOwned>(self, path: &Path, content: &str) -> Result<T, DataLoadError> {
        let parsed = match self {
            Format::Ron => ron::from_str(content).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|detail| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail,
        })
    }
}

/// Format of `path`, judged by its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let ext = path.extension().and_then(|e| e.to_str());
    Format::ALL
        .into_iter()
        .find(|f| Some(f.extension()) == ext)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Locate `{base_name}.{ron,toml,json}` in `dir`.
///
/// `Ok(None)` when absent; `ConflictingFormats` when more than one format
/// is present for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut present = Format::ALL
        .into_iter()
        .map(|f| dir.join(format!("{base_name}.{}", f.extension())))
        .filter(|candidate| candidate.is_file());

    let first = present.next();
    match (first, present.next()) {
        (Some(a), Some(b)) => Err(DataLoadError::ConflictingFormats { a, b }),
        (first, _) => Ok(first),
    }
}

/// [`find_data_file`] for files the catalog cannot do without.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read `path` and deserialize it in the format its extension names.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    format.parse(path, &content)
}

/// Read a list of definitions. RON and JSON files hold the list at the top
/// level; TOML files keep it under `toml_key` (`[[locations]]`).
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    if format != Format::Toml {
        return format.parse(path, &content);
    }

    let mut table: toml::Table = format.parse(path, &content)?;
    let list = table.remove(toml_key).ok_or_else(|| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: format!("missing top-level key '{toml_key}'"),
    })?;
    list.try_into().map_err(|e: toml::de::Error| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    })
}

// ===========================================================================
// Catalog loading
// ===========================================================================

/// A catalog together with the planner settings found next to it.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub config: PlannerConfig,
}

/// Load `locations.*` and `structures.*` (required) and `planner.*`
/// (optional) from `dir`.
pub fn load_catalog(dir: &Path) -> Result<LoadedCatalog, DataLoadError> {
    let locations_path = require_data_file(dir, "locations")?;
    let structures_path = require_data_file(dir, "structures")?;

    let locations: Vec<LocationData> = deserialize_list(&locations_path, "locations")?;
    let structures: Vec<StructureData> = deserialize_list(&structures_path, "structures")?;

    let mut builder = CatalogBuilder::new();
    let location_count = locations.len();
    for data in locations {
        let def = data.into_def(&locations_path)?;
        debug!(location = %def.id, region = %def.region, "loaded location");
        builder
            .add_location(def)
            .map_err(|source| DataLoadError::Catalog {
                file: locations_path.clone(),
                source,
            })?;
    }
    let structure_count = structures.len();
    for data in structures {
        builder
            .add_structure(data.into_def())
            .map_err(|source| DataLoadError::Catalog {
                file: structures_path.clone(),
                source,
            })?;
    }

    let config = match find_data_file(dir, "planner")? {
        Some(path) => deserialize_file(&path)?,
        None => {
            warn!(dir = %dir.display(), "no planner settings found, using defaults");
            PlannerConfig::default()
        }
    };

    info!(
        dir = %dir.display(),
        locations = location_count,
        structures = structure_count,
        primary_region = %config.primary_region,
        "catalog loaded"
    );

    Ok(LoadedCatalog {
        catalog: builder.build(),
        config,
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cartographer_core::id::LocationId;
    use cartographer_core::material::Material;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cartographer_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const LOCATIONS_RON: &str = r#"[
        (
            id: "ciudad-nudo-del-norte",
            name: "Ciudad Nudo del Norte (C1)",
            region: "Mexico",
            unlocked_by_default: true,
            kind: Facility(default_materials: { metals: 200, ceramics: 150 }),
        ),
        (
            id: "smoke-hill-mine",
            name: "Smoke Hill Mine",
            region: "Mexico",
            kind: Mine(produces: ceramics, conversion_rate: 1.2, upgradeable: true),
        ),
    ]"#;

    const STRUCTURES_RON: &str = r#"[
        (
            id: "postbox",
            name: "Postbox",
            pcc_level: 1,
            category: "Utility",
            requirements: { metals: 200, ceramics: 150, resins: 100, chiral_crystals: 50 },
        ),
    ]"#;

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("locations.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("planner.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("structures.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        for name in ["locations.yaml", "locations"] {
            let result = detect_format(Path::new(name));
            assert!(matches!(result, Err(DataLoadError::UnsupportedFormat { .. })));
        }
    }

    // -----------------------------------------------------------------------
    // find_data_file / require_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_data_file_found_and_missing() {
        let dir = make_test_dir("find");
        fs::write(dir.join("locations.json"), "[]").unwrap();

        assert_eq!(
            find_data_file(&dir, "locations").unwrap(),
            Some(dir.join("locations.json"))
        );
        assert_eq!(find_data_file(&dir, "structures").unwrap(), None);

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("conflict");
        fs::write(dir.join("locations.ron"), "[]").unwrap();
        fs::write(dir.join("locations.json"), "[]").unwrap();

        let result = find_data_file(&dir, "locations");
        assert!(matches!(result, Err(DataLoadError::ConflictingFormats { .. })));

        cleanup(&dir);
    }

    #[test]
    fn require_data_file_missing() {
        let dir = make_test_dir("require_missing");

        let result = require_data_file(&dir, "locations");
        assert!(matches!(
            result,
            Err(DataLoadError::MissingRequired { ref file, .. }) if file == "locations"
        ));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // deserialize_file / deserialize_list
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_list_each_format() {
        let dir = make_test_dir("list_formats");

        let ron_path = dir.join("a.ron");
        fs::write(&ron_path, STRUCTURES_RON).unwrap();
        let from_ron: Vec<StructureData> = deserialize_list(&ron_path, "structures").unwrap();

        let json_path = dir.join("b.json");
        fs::write(
            &json_path,
            r#"[{"id": "postbox", "name": "Postbox", "pcc_level": 1, "category": "Utility",
                "requirements": {"metals": 200}}]"#,
        )
        .unwrap();
        let from_json: Vec<StructureData> = deserialize_list(&json_path, "structures").unwrap();

        let toml_path = dir.join("c.toml");
        fs::write(
            &toml_path,
            r#"
[[structures]]
id = "postbox"
name = "Postbox"
pcc_level = 1
category = "Utility"

[structures.requirements]
metals = 200
"#,
        )
        .unwrap();
        let from_toml: Vec<StructureData> = deserialize_list(&toml_path, "structures").unwrap();

        for list in [&from_ron, &from_json, &from_toml] {
            assert_eq!(list.len(), 1);
            assert_eq!(list[0].id, "postbox");
            assert_eq!(list[0].requirements.get(Material::Metals), 200);
        }

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_toml_missing_key() {
        let dir = make_test_dir("list_toml_missing");
        let path = dir.join("structures.toml");
        fs::write(&path, r#"foo = "bar""#).unwrap();

        let result: Result<Vec<StructureData>, _> = deserialize_list(&path, "structures");
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_file_parse_error() {
        let dir = make_test_dir("parse_err");
        let path = dir.join("bad.ron");
        fs::write(&path, "this is not valid RON {{{").unwrap();

        let result: Result<Vec<LocationData>, _> = deserialize_file(&path);
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // load_catalog
    // -----------------------------------------------------------------------

    #[test]
    fn load_catalog_without_planner_uses_defaults() {
        let dir = make_test_dir("load_defaults");
        fs::write(dir.join("locations.ron"), LOCATIONS_RON).unwrap();
        fs::write(dir.join("structures.ron"), STRUCTURES_RON).unwrap();

        let loaded = load_catalog(&dir).unwrap();
        assert_eq!(loaded.catalog.locations().len(), 2);
        assert_eq!(loaded.catalog.structures().len(), 1);
        assert_eq!(loaded.config, PlannerConfig::default());
        let mine = loaded
            .catalog
            .location(&LocationId::new("smoke-hill-mine"))
            .unwrap();
        assert_eq!(mine.mine().unwrap().produces, Material::Ceramics);

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_reads_planner_settings() {
        let dir = make_test_dir("load_planner");
        fs::write(dir.join("locations.ron"), LOCATIONS_RON).unwrap();
        fs::write(dir.join("structures.ron"), STRUCTURES_RON).unwrap();
        fs::write(
            dir.join("planner.toml"),
            "primary_region = \"Australia\"\nrate_stop_priority = 12.5\n",
        )
        .unwrap();

        let loaded = load_catalog(&dir).unwrap();
        assert_eq!(loaded.config.primary_region, "Australia");
        assert_eq!(loaded.config.rate_stop_priority, 12.5);
        assert_eq!(loaded.config.connection_bonus, 0.5);

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_missing_structures() {
        let dir = make_test_dir("load_missing");
        fs::write(dir.join("locations.ron"), LOCATIONS_RON).unwrap();

        let result = load_catalog(&dir);
        assert!(matches!(
            result,
            Err(DataLoadError::MissingRequired { ref file, .. }) if file == "structures"
        ));

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_duplicate_location() {
        let dir = make_test_dir("load_dup");
        fs::write(
            dir.join("locations.json"),
            r#"[
                {"id": "a", "name": "A", "region": "Mexico", "kind": {"Facility": {}}},
                {"id": "a", "name": "A again", "region": "Mexico", "kind": {"Prepper": {}}}
            ]"#,
        )
        .unwrap();
        fs::write(dir.join("structures.json"), "[]").unwrap();

        let result = load_catalog(&dir);
        assert!(matches!(
            result,
            Err(DataLoadError::Catalog {
                source: CatalogError::DuplicateLocation(_),
                ..
            })
        ));

        cleanup(&dir);
    }

    #[test]
    fn load_catalog_invalid_mine() {
        let dir = make_test_dir("load_invalid");
        fs::write(
            dir.join("locations.json"),
            r#"[{"id": "m", "name": "M", "region": "Australia",
                 "kind": {"Mine": {"produces": "metals", "conversion_rate": -2.0}}}]"#,
        )
        .unwrap();
        fs::write(dir.join("structures.json"), "[]").unwrap();

        let result = load_catalog(&dir);
        assert!(matches!(result, Err(DataLoadError::InvalidDefinition { .. })));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Error display messages
    // -----------------------------------------------------------------------

    #[test]
    fn error_display_messages() {
        let e = DataLoadError::MissingRequired {
            file: "locations".to_string(),
            dir: PathBuf::from("/data"),
        };
        assert!(format!("{e}").contains("locations"));
        assert!(format!("{e}").contains("/data"));

        let e = DataLoadError::InvalidDefinition {
            file: PathBuf::from("locations.ron"),
            id: "dry-mine".to_string(),
            detail: "conversion_rate must be positive".to_string(),
        };
        let msg = format!("{e}");
        assert!(msg.contains("dry-mine"));
        assert!(msg.contains("conversion_rate"));

        let e = DataLoadError::Catalog {
            file: PathBuf::from("structures.ron"),
            source: CatalogError::DuplicateStructure("postbox".into()),
        };
        assert!(format!("{e}").contains("postbox"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataLoadError = io_err.into();
        assert!(matches!(data_err, DataLoadError::Io(_)));
        assert!(format!("{data_err}").contains("file not found"));
    }
}
