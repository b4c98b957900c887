//! Point allocation state.
//!
//! # Responsibility
//! - Hold the four point fields of the share-points screen.
//! - Carry the remaining-budget counter produced by the last update.
//!
//! # Invariants
//! - Sum of the four fields never exceeds the policy budget.
//! - Each field stays within `[0, max_per_field]`.
//! - `remaining` is written only by the update rule or by validated restore.

use crate::config::AllocationPolicy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One of the four point inputs on the share-points screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationField {
    /// Writing submission of the first teammate.
    StoryOne,
    /// Writing submission of the second teammate.
    StoryTwo,
    /// Drawing submission of the first teammate.
    IllustrationOne,
    /// Drawing submission of the second teammate.
    IllustrationTwo,
}

/// Stable id of the first teammate's story field.
pub const FIELD_STORY_ONE: &str = "story_one";
/// Stable id of the second teammate's story field.
pub const FIELD_STORY_TWO: &str = "story_two";
/// Stable id of the first teammate's illustration field.
pub const FIELD_ILLUSTRATION_ONE: &str = "illustration_one";
/// Stable id of the second teammate's illustration field.
pub const FIELD_ILLUSTRATION_TWO: &str = "illustration_two";

impl AllocationField {
    /// All fields in storage order.
    pub const ALL: [AllocationField; 4] = [
        AllocationField::StoryOne,
        AllocationField::StoryTwo,
        AllocationField::IllustrationOne,
        AllocationField::IllustrationTwo,
    ];

    /// Stable string id used by FFI callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StoryOne => FIELD_STORY_ONE,
            Self::StoryTwo => FIELD_STORY_TWO,
            Self::IllustrationOne => FIELD_ILLUSTRATION_ONE,
            Self::IllustrationTwo => FIELD_ILLUSTRATION_TWO,
        }
    }

    /// Parses a field from its stable id.
    ///
    /// Surrounding whitespace is ignored; case is not.
    pub fn parse(value: &str) -> Result<Self, AllocationError> {
        match value.trim() {
            FIELD_STORY_ONE => Ok(Self::StoryOne),
            FIELD_STORY_TWO => Ok(Self::StoryTwo),
            FIELD_ILLUSTRATION_ONE => Ok(Self::IllustrationOne),
            FIELD_ILLUSTRATION_TWO => Ok(Self::IllustrationTwo),
            other => Err(AllocationError::UnknownField(other.to_string())),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::StoryOne => 0,
            Self::StoryTwo => 1,
            Self::IllustrationOne => 2,
            Self::IllustrationTwo => 3,
        }
    }
}

impl Display for AllocationField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current point split of one share-points screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationState {
    points: [u32; 4],
    remaining: i64,
}

impl AllocationState {
    /// Creates the opening state: every field at zero, full budget remaining.
    pub fn new(policy: &AllocationPolicy) -> Self {
        Self {
            points: [0; 4],
            remaining: i64::from(policy.total_budget),
        }
    }

    /// Rebuilds a state handed back by a stateless caller.
    ///
    /// `remaining` is taken as-is since it reflects the raw input of the
    /// previous update and cannot be derived from the fields.
    ///
    /// # Errors
    /// - `FieldOutOfRange` when a field exceeds `policy.max_per_field`.
    /// - `OverBudget` when the fields sum past `policy.total_budget`.
    pub fn restore(
        policy: &AllocationPolicy,
        story_one: u32,
        story_two: u32,
        illustration_one: u32,
        illustration_two: u32,
        remaining: i64,
    ) -> Result<Self, AllocationError> {
        let points = [story_one, story_two, illustration_one, illustration_two];
        for field in AllocationField::ALL {
            let value = points[field.index()];
            if value > policy.max_per_field {
                return Err(AllocationError::FieldOutOfRange {
                    field,
                    value,
                    max: policy.max_per_field,
                });
            }
        }
        let total = points.iter().map(|value| u64::from(*value)).sum::<u64>();
        if total > u64::from(policy.total_budget) {
            return Err(AllocationError::OverBudget {
                total,
                budget: policy.total_budget,
            });
        }
        Ok(Self { points, remaining })
    }

    /// Returns the accepted value of one field.
    pub fn get(&self, field: AllocationField) -> u32 {
        self.points[field.index()]
    }

    pub fn story_one(&self) -> u32 {
        self.get(AllocationField::StoryOne)
    }

    pub fn story_two(&self) -> u32 {
        self.get(AllocationField::StoryTwo)
    }

    pub fn illustration_one(&self) -> u32 {
        self.get(AllocationField::IllustrationOne)
    }

    pub fn illustration_two(&self) -> u32 {
        self.get(AllocationField::IllustrationTwo)
    }

    /// Remaining-budget counter as displayed to the child.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Sum of the four accepted values.
    pub fn total(&self) -> u32 {
        self.points.iter().sum()
    }

    /// Budget not consumed by accepted values.
    ///
    /// Differs from `remaining()` after an update whose raw input was clamped.
    pub fn unallocated(&self, policy: &AllocationPolicy) -> i64 {
        i64::from(policy.total_budget) - i64::from(self.total())
    }

    /// Current values of the three fields other than `field`.
    pub fn others(&self, field: AllocationField) -> [u32; 3] {
        let mut others = [0; 3];
        let mut slot = 0;
        for candidate in AllocationField::ALL {
            if candidate != field {
                others[slot] = self.get(candidate);
                slot += 1;
            }
        }
        others
    }

    pub(crate) fn with_field(mut self, field: AllocationField, value: u32, remaining: i64) -> Self {
        self.points[field.index()] = value;
        self.remaining = remaining;
        self
    }
}

/// Allocation-level errors surfaced to session and FFI callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// Confirm was requested while the remaining counter is negative.
    BudgetExceeded { remaining: i64, budget: u32 },
    /// A restored field exceeds the per-field maximum.
    FieldOutOfRange {
        field: AllocationField,
        value: u32,
        max: u32,
    },
    /// Restored fields sum past the budget.
    OverBudget { total: u64, budget: u32 },
    /// Field id is not one of the four known inputs.
    UnknownField(String),
    /// The session already dispatched its submission.
    AlreadySubmitted,
}

impl Display for AllocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BudgetExceeded { budget, .. } => {
                write!(f, "You may only allocate {budget} points!")
            }
            Self::FieldOutOfRange { field, value, max } => {
                write!(f, "field `{field}` value {value} exceeds maximum {max}")
            }
            Self::OverBudget { total, budget } => {
                write!(f, "allocated total {total} exceeds budget {budget}")
            }
            Self::UnknownField(value) => write!(f, "unknown allocation field: `{value}`"),
            Self::AlreadySubmitted => write!(f, "points were already submitted"),
        }
    }
}

impl Error for AllocationError {}

#[cfg(test)]
mod tests {
    use super::{AllocationError, AllocationField, AllocationState};
    use crate::config::AllocationPolicy;

    #[test]
    fn new_state_starts_empty_with_full_budget() {
        let state = AllocationState::new(&AllocationPolicy::default());
        for field in AllocationField::ALL {
            assert_eq!(state.get(field), 0);
        }
        assert_eq!(state.remaining(), 100);
        assert_eq!(state.total(), 0);
    }

    #[test]
    fn parses_all_field_ids_and_rejects_other_casing() {
        for field in AllocationField::ALL {
            assert_eq!(AllocationField::parse(field.as_str()), Ok(field));
        }
        assert_eq!(
            AllocationField::parse("  story_two "),
            Ok(AllocationField::StoryTwo)
        );
        assert_eq!(
            AllocationField::parse("StoryOne"),
            Err(AllocationError::UnknownField("StoryOne".to_string()))
        );
    }

    #[test]
    fn others_excludes_edited_field() {
        let policy = AllocationPolicy::default();
        let state = AllocationState::restore(&policy, 5, 10, 15, 20, 50).expect("valid state");
        assert_eq!(state.others(AllocationField::StoryOne), [10, 15, 20]);
        assert_eq!(state.others(AllocationField::IllustrationTwo), [5, 10, 15]);
    }

    #[test]
    fn restore_rejects_field_above_maximum() {
        let policy = AllocationPolicy::default();
        let err = AllocationState::restore(&policy, 75, 0, 0, 0, 25).expect_err("75 > 70");
        assert_eq!(
            err,
            AllocationError::FieldOutOfRange {
                field: AllocationField::StoryOne,
                value: 75,
                max: 70,
            }
        );
    }

    #[test]
    fn restore_rejects_total_over_budget() {
        let policy = AllocationPolicy::default();
        let err = AllocationState::restore(&policy, 70, 20, 10, 5, 0).expect_err("105 > 100");
        assert_eq!(
            err,
            AllocationError::OverBudget {
                total: 105,
                budget: 100,
            }
        );
    }

    #[test]
    fn unallocated_is_derived_from_accepted_values() {
        let policy = AllocationPolicy::default();
        let state = AllocationState::restore(&policy, 70, 0, 0, 0, 10).expect("valid state");
        assert_eq!(state.unallocated(&policy), 30);
        assert_eq!(state.remaining(), 10);
    }

    #[test]
    fn budget_exceeded_message_names_the_budget() {
        let err = AllocationError::BudgetExceeded {
            remaining: -5,
            budget: 100,
        };
        assert_eq!(err.to_string(), "You may only allocate 100 points!");
    }
}
