//! Domain model for the share-points screen.
//!
//! # Responsibility
//! - Define the allocation state and its field addressing.
//! - Define the injected team/child/auth records and output records.
//!
//! # Invariants
//! - Team and child records are never mutated by core.
//! - `SubmissionRecord` values are immutable once built.

pub mod allocation;
pub mod submission;
pub mod team;
