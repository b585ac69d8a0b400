//! Domain model for the restaurant directory.
//!
//! # Responsibility
//! - Define the entities assembled by the repository layer.
//! - Encode the minimal/full user split in the type system.
//!
//! # Invariants
//! - A review author is always a `UserSummary`, never a full profile.
//! - Restaurant associations are either all loaded or all left empty.

pub mod cuisine_type;
pub mod photo;
pub mod restaurant;
pub mod review;
pub mod user;
