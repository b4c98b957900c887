//! Allocation policy configuration.
//!
//! # Responsibility
//! - Hold the numeric constants that shape the share-points screen.
//! - Load and validate overrides from JSON documents.
//!
//! # Invariants
//! - `AllocationPolicy::default()` reproduces the production constants
//!   (budget 100, field max 70, floor reservation 10, step 5).
//! - A policy returned by any loader has passed `validate()`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Total points a child distributes across the four fields.
pub const DEFAULT_TOTAL_BUDGET: u32 = 100;
/// Upper bound of one input field.
pub const DEFAULT_MAX_PER_FIELD: u32 = 70;
/// Minimum amount each non-edited field is assumed to consume.
pub const DEFAULT_FLOOR_RESERVATION: u32 = 10;
/// Spinner increment of one input field.
pub const DEFAULT_STEP: u32 = 5;

/// Number of fields that share the budget.
pub const ALLOCATION_FIELD_COUNT: u32 = 4;

/// Numeric policy applied by the allocation update rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllocationPolicy {
    pub total_budget: u32,
    pub max_per_field: u32,
    pub floor_reservation: u32,
    pub step: u32,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            total_budget: DEFAULT_TOTAL_BUDGET,
            max_per_field: DEFAULT_MAX_PER_FIELD,
            floor_reservation: DEFAULT_FLOOR_RESERVATION,
            step: DEFAULT_STEP,
        }
    }
}

impl AllocationPolicy {
    /// Checks internal consistency of the policy.
    ///
    /// # Errors
    /// - `total_budget` is zero.
    /// - `max_per_field` is zero or larger than `total_budget`.
    /// - floor reservations of three fields leave no room in the budget.
    /// - `step` is zero or larger than `max_per_field`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_budget == 0 {
            return Err(ConfigError::Invalid(
                "total_budget must be greater than 0".to_string(),
            ));
        }
        if self.max_per_field == 0 || self.max_per_field > self.total_budget {
            return Err(ConfigError::Invalid(format!(
                "max_per_field must be within 1..={}, got {}",
                self.total_budget, self.max_per_field
            )));
        }
        let reserved = u64::from(self.floor_reservation) * u64::from(ALLOCATION_FIELD_COUNT - 1);
        if reserved >= u64::from(self.total_budget) {
            return Err(ConfigError::Invalid(format!(
                "floor_reservation {} leaves no budget for the edited field",
                self.floor_reservation
            )));
        }
        if self.step == 0 || self.step > self.max_per_field {
            return Err(ConfigError::Invalid(format!(
                "step must be within 1..={}, got {}",
                self.max_per_field, self.step
            )));
        }
        Ok(())
    }

    /// Parses and validates a policy from JSON.
    ///
    /// Missing keys fall back to the defaults; unknown keys are rejected.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let policy: Self = serde_json::from_str(raw)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Reads, parses and validates a policy file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let policy = Self::from_json_str(&raw)?;
        log::info!(
            "event=policy_load module=config status=ok budget={} max_per_field={} floor={} step={}",
            policy.total_budget,
            policy.max_per_field,
            policy.floor_reservation,
            policy.step
        );
        Ok(policy)
    }
}

/// Policy loading errors.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read policy: {err}"),
            Self::Parse(err) => write!(f, "failed to parse policy: {err}"),
            Self::Invalid(message) => write!(f, "invalid policy: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}
