//! Note Module
//!
//! The record type, its orderings and the pagination settings used by fetch.
//!
//! ## Responsibilities
//! - Define the `Note` entity and its merge semantics
//! - Provide the six orderings (id, title, created time; asc/desc)
//! - Carry pagination settings and their defaults

mod record;
mod sort;
mod pagination;

pub use record::{is_legacy_zero, Note, LEGACY_ZERO_SECONDS};
pub use sort::{sort_notes, SortBy, UnknownSortKey};
pub use pagination::{Pagination, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
