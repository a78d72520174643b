use crate::id::{BuildItemId, LocationId, StructureId};

/// Errors raised when building the catalog or editing user state.
///
/// Planning itself never fails: shortfalls are reported through
/// [`crate::sourcing::SourcingPlan::unmet`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate location id '{0}'")]
    DuplicateLocation(LocationId),

    #[error("duplicate structure id '{0}'")]
    DuplicateStructure(StructureId),

    #[error("location '{0}' not found")]
    UnknownLocation(LocationId),

    #[error("structure '{0}' not found")]
    UnknownStructure(StructureId),

    #[error("build queue item {0} not found")]
    UnknownBuildItem(BuildItemId),

    /// Connection levels run from 1 to 5.
    #[error("connection level {level} out of range 1-5 for '{id}'")]
    InvalidConnectionLevel { id: LocationId, level: u8 },

    #[error("location '{0}' is not a stock source")]
    NotAStockSource(LocationId),

    #[error("location '{0}' is not a rate source")]
    NotARateSource(LocationId),

    #[error("mine '{0}' cannot be upgraded")]
    NotUpgradeable(LocationId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = CatalogError::DuplicateLocation(LocationId::new("villa-libre"));
        assert!(e.to_string().contains("villa-libre"));

        let e = CatalogError::InvalidConnectionLevel {
            id: LocationId::new("villa-libre"),
            level: 7,
        };
        let msg = e.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("villa-libre"));

        let e = CatalogError::UnknownBuildItem(BuildItemId(3));
        assert!(e.to_string().contains("#3"));
    }
}
