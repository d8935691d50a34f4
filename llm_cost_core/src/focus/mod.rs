//! FOCUS (FinOps Open Cost & Usage Specification) row mapping and the
//! canonical-JSON encoding its `Tags` column requires.

pub mod canonical_json;
pub mod row;

pub use canonical_json::encode_tags;
pub use row::{FocusInput, FocusRow, COLUMNS};
