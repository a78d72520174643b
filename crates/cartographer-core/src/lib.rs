//! Cartographer Core -- material sourcing for base-building planning.
//!
//! This crate owns the read-only reference catalog, the user's per-location
//! overlay and build queue, and the three pure planning functions built on
//! top of them.
//!
//! # Planning Pipeline
//!
//! Every planning request is recomputed from scratch:
//!
//! 1. **Snapshot** -- [`catalog::Catalog::snapshot`] joins the immutable
//!    catalog with the [`user_state::UserState`] overlay by location id.
//! 2. **Demand** -- [`demand::DemandVector::from_queue`] sums the build
//!    queue's per-item requirement overrides.
//! 3. **Sourcing** -- [`sourcing::plan`] allocates demand across stock
//!    sources first, then the single best rate source per material.
//! 4. **Route** -- [`route::route`] orders the plan's source visits.
//! 5. **Metrics** -- [`metrics::metrics`] summarizes fulfillment.
//!
//! ```rust,ignore
//! let locations = catalog.snapshot(&state);
//! let demand = DemandVector::from_queue(&state.build_queue);
//! let plan = sourcing::plan(&demand, &locations);
//! let stops = route::route(&plan, &locations);
//! let report = metrics::metrics(&plan);
//! ```
//!
//! # Key Types
//!
//! - [`material::Material`] -- the six material kinds; chiral crystals are fuel.
//! - [`location::Location`] -- a snapshot location, tagged stock or rate source.
//! - [`catalog::Catalog`] -- immutable location and structure definitions.
//! - [`sourcing::SourcingPlan`] -- allocation result with unmet residual.
//! - [`config::PlannerConfig`] -- route heuristic tuning.

pub mod catalog;
pub mod config;
pub mod demand;
pub mod error;
pub mod id;
pub mod location;
pub mod material;
pub mod metrics;
pub mod route;
pub mod sourcing;
pub mod user_state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::CatalogError;
