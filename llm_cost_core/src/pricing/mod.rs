//! The signed, versioned pricing catalogue: resolution chain, schema, and
//! the compile-time embedded fallback snapshot.

pub mod catalogue;
pub mod embedded;
pub mod schema;

pub use catalogue::{Catalogue, CatalogueSource, PricingError, ResolutionInputs, Staleness};
pub use schema::{PriceDef, Provider, Revocation};
