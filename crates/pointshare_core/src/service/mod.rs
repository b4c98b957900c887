//! Core use-case services.
//!
//! # Responsibility
//! - Apply the allocation update rule and confirm flow for the share-points
//!   screen.
//! - Load the dashboard profile behind a mount guard.
//! - Keep UI/FFI layers decoupled from collaborator implementations.

pub mod allocation_rule;
pub mod dashboard_service;
pub mod point_share_service;
