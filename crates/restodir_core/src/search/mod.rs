//! Restaurant search filters.
//!
//! # Responsibility
//! - Build parameter-bound SQL filter fragments for search queries.
//! - Own the boolean-combination policy of multi-criteria search.

pub mod criteria;
pub mod predicate;
