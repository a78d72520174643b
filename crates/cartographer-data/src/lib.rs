pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, LoadedCatalog, load_catalog};
