//! Outbound collaborator contracts.
//!
//! # Responsibility
//! - Define where finalized allocations and user notices are delivered.
//! - Keep network transport and UI toolkits outside core.
//!
//! # Invariants
//! - Core never inspects sink outcomes beyond logging them.

pub mod notice;
pub mod submission;
