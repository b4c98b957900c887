//! Allocation update rule.
//!
//! # Responsibility
//! - Compute the accepted value of an edited field and the new remaining
//!   counter from the current state.
//!
//! # Invariants
//! - Every non-edited field is treated as consuming at least
//!   `floor_reservation` points when computing the edited field's ceiling.
//! - `remaining` is derived from the raw proposed value, floored at 0.
//! - Out-of-range input is clamped, never rejected.
//! - Pure: no logging, no I/O.

use crate::config::AllocationPolicy;
use crate::model::allocation::{AllocationField, AllocationState};

/// Outcome of applying one proposed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationUpdate {
    pub field: AllocationField,
    /// Value the user asked for.
    pub proposed: u32,
    /// Value stored in the new state.
    pub accepted: u32,
    /// Largest value the field could take given the other three.
    pub ceiling: u32,
    /// State after the update.
    pub state: AllocationState,
}

impl AllocationUpdate {
    /// Whether the proposed value was reduced to fit the ceiling.
    pub fn was_clamped(&self) -> bool {
        self.accepted != self.proposed
    }
}

/// Spinner direction for `nudge_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

/// Ceiling of the edited field given the other three values.
///
/// `total_budget - sum(max(other, floor_reservation))`, kept inside
/// `[0, max_per_field]`. With the default policy the bounds never bind.
pub fn field_ceiling(policy: &AllocationPolicy, others: [u32; 3]) -> u32 {
    let floor = policy.floor_reservation;
    let floor_others = others
        .iter()
        .map(|value| i64::from((*value).max(floor)))
        .sum::<i64>();
    let max_value = i64::from(policy.total_budget) - floor_others;
    // Clamped into u32 range by the bounds above.
    max_value.clamp(0, i64::from(policy.max_per_field)) as u32
}

/// Remaining counter after proposing `proposed` next to `others`.
pub fn remaining_after(policy: &AllocationPolicy, proposed: u32, others: [u32; 3]) -> i64 {
    let spent = i64::from(proposed) + others.iter().map(|value| i64::from(*value)).sum::<i64>();
    (i64::from(policy.total_budget) - spent).max(0)
}

/// Applies one proposed value and reports the details.
pub fn evaluate_update(
    policy: &AllocationPolicy,
    state: &AllocationState,
    field: AllocationField,
    proposed: u32,
) -> AllocationUpdate {
    let others = state.others(field);
    let ceiling = field_ceiling(policy, others);
    let accepted = proposed.min(ceiling);
    let remaining = remaining_after(policy, proposed, others);

    AllocationUpdate {
        field,
        proposed,
        accepted,
        ceiling,
        state: state.with_field(field, accepted, remaining),
    }
}

/// Pure state transition for one field edit.
pub fn update_field(
    policy: &AllocationPolicy,
    state: &AllocationState,
    field: AllocationField,
    proposed: u32,
) -> AllocationState {
    evaluate_update(policy, state, field, proposed).state
}

/// Moves a field one `policy.step` up or down, then applies the update rule.
///
/// The stepped candidate is kept within `[0, max_per_field]` first, matching
/// a bounded numeric spinner.
pub fn nudge_field(
    policy: &AllocationPolicy,
    state: &AllocationState,
    field: AllocationField,
    direction: StepDirection,
) -> AllocationUpdate {
    let current = state.get(field);
    let candidate = match direction {
        StepDirection::Up => current.saturating_add(policy.step),
        StepDirection::Down => current.saturating_sub(policy.step),
    }
    .min(policy.max_per_field);
    evaluate_update(policy, state, field, candidate)
}
