//! Declarative label / value rows for detail panels.
//!
//! A page describes its rows once as a `DetailsSchema`; the schema resolves
//! the rows against the loaded record (as JSON) and `DetailsTable` renders
//! them.

mod field;
mod schema;
mod view;

pub use field::{DetailValue, DetailsField, FieldKind};
pub use schema::{lookup, row_key, DetailRow, DetailsSchema};
pub use view::{DetailsTable, ItemDetailsGrid, YesNoBadge};
