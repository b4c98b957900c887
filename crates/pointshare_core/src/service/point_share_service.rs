//! Share-points use-case service.
//!
//! # Responsibility
//! - Own one allocation state per share-points screen.
//! - Route field edits through the update rule.
//! - Turn a confirmed allocation into two submission records and hand them
//!   to the submission sink exactly once.
//!
//! # Invariants
//! - Confirm with a negative remaining counter raises one notice, performs no
//!   submission and leaves the state editable.
//! - `Submitted` is terminal: later edits and confirms are rejected.
//! - Sink outcomes are logged, never reconciled.

use crate::config::AllocationPolicy;
use crate::model::allocation::{AllocationError, AllocationField, AllocationState};
use crate::model::submission::SubmissionRecord;
use crate::model::team::{AuthContext, ChildProfile, Team};
use crate::service::allocation_rule::{evaluate_update, nudge_field, AllocationUpdate, StepDirection};
use crate::sink::notice::{Notice, NoticeSink};
use crate::sink::submission::SubmissionSink;
use log::{debug, info, warn};
use uuid::Uuid;

/// Builds the two records for a confirmed allocation.
///
/// Record order follows the team: `child1` first, `child2` second. Both
/// records carry the allocating child's member id.
///
/// # Errors
/// - `BudgetExceeded` when `state.remaining()` is negative.
pub fn confirm_allocation(
    policy: &AllocationPolicy,
    state: &AllocationState,
    team: &Team,
    child: &ChildProfile,
) -> Result<[SubmissionRecord; 2], AllocationError> {
    if state.remaining() < 0 {
        return Err(AllocationError::BudgetExceeded {
            remaining: state.remaining(),
            budget: policy.total_budget,
        });
    }

    Ok([
        SubmissionRecord {
            writing_points: state.story_one(),
            drawing_points: state.illustration_one(),
            member_id: child.member_id,
            submission_id: team.child1.submission_id,
        },
        SubmissionRecord {
            writing_points: state.story_two(),
            drawing_points: state.illustration_two(),
            member_id: child.member_id,
            submission_id: team.child2.submission_id,
        },
    ])
}

/// Lifecycle phase of a share-points session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Fields are editable.
    Idle,
    /// Points were dispatched; the session accepts no further input.
    Submitted,
}

/// Per-screen share-points session.
pub struct PointShareSession<S: SubmissionSink, N: NoticeSink> {
    id: Uuid,
    policy: AllocationPolicy,
    team: Team,
    child: ChildProfile,
    auth: AuthContext,
    state: AllocationState,
    phase: SessionPhase,
    sink: S,
    notices: N,
}

impl<S: SubmissionSink, N: NoticeSink> PointShareSession<S, N> {
    /// Opens a session with every field at zero.
    pub fn new(
        policy: AllocationPolicy,
        team: Team,
        child: ChildProfile,
        auth: AuthContext,
        sink: S,
        notices: N,
    ) -> Self {
        let id = Uuid::new_v4();
        info!(
            "event=session_open module=point_share status=ok session_id={} budget={}",
            id, policy.total_budget
        );
        Self {
            id,
            state: AllocationState::new(&policy),
            policy,
            team,
            child,
            auth,
            phase: SessionPhase::Idle,
            sink,
            notices,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn state(&self) -> &AllocationState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Applies a proposed value to one field.
    pub fn update_field(
        &mut self,
        field: AllocationField,
        proposed: u32,
    ) -> Result<AllocationUpdate, AllocationError> {
        self.ensure_idle()?;
        let update = evaluate_update(&self.policy, &self.state, field, proposed);
        Ok(self.apply(update))
    }

    /// Steps one field by the policy step.
    pub fn nudge(
        &mut self,
        field: AllocationField,
        direction: StepDirection,
    ) -> Result<AllocationUpdate, AllocationError> {
        self.ensure_idle()?;
        let update = nudge_field(&self.policy, &self.state, field, direction);
        Ok(self.apply(update))
    }

    /// Confirms the current allocation.
    ///
    /// On success the records were handed to the sink and the session is
    /// `Submitted`. The sink's own result does not affect the return value.
    ///
    /// # Errors
    /// - `AlreadySubmitted` after a previous successful confirm.
    /// - `BudgetExceeded` when the remaining counter is negative; one error
    ///   notice is raised and the session stays `Idle`.
    pub fn confirm(&mut self) -> Result<[SubmissionRecord; 2], AllocationError> {
        self.ensure_idle()?;

        let records = match confirm_allocation(&self.policy, &self.state, &self.team, &self.child)
        {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    "event=allocation_confirm module=point_share status=rejected session_id={} remaining={}",
                    self.id,
                    self.state.remaining()
                );
                self.notices.notify(&Notice::error(err.to_string()));
                return Err(err);
            }
        };

        match self.sink.submit_points(&self.auth, &records) {
            Ok(()) => info!(
                "event=allocation_submit module=point_share status=ok session_id={} total={}",
                self.id,
                self.state.total()
            ),
            Err(err) => warn!(
                "event=allocation_submit module=point_share status=error session_id={} error={}",
                self.id, err
            ),
        }

        self.phase = SessionPhase::Submitted;
        self.state = AllocationState::new(&self.policy);
        Ok(records)
    }

    /// Discards the current allocation, as when the screen is left.
    pub fn reset(&mut self) {
        self.state = AllocationState::new(&self.policy);
        debug!(
            "event=session_reset module=point_share status=ok session_id={}",
            self.id
        );
    }

    fn ensure_idle(&self) -> Result<(), AllocationError> {
        match self.phase {
            SessionPhase::Idle => Ok(()),
            SessionPhase::Submitted => Err(AllocationError::AlreadySubmitted),
        }
    }

    fn apply(&mut self, update: AllocationUpdate) -> AllocationUpdate {
        self.state = update.state;
        debug!(
            "event=allocation_update module=point_share status=ok session_id={} field={} proposed={} accepted={} remaining={}",
            self.id,
            update.field,
            update.proposed,
            update.accepted,
            update.state.remaining()
        );
        update
    }
}
