//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose the share-points allocation flow to the UI via FRB.
//! - Keep the UI stateless: every call receives and returns the full view.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Incoming views are re-validated before the update rule runs.
//! - Calls use the default allocation policy.

use pointshare_core::{
    confirm_allocation, core_version as core_version_inner, encode_submission_payload,
    evaluate_update, init_logging as init_logging_inner, nudge_field, ping as ping_inner,
    AllocationError, AllocationField, AllocationPolicy, AllocationState, AllocationUpdate,
    ChildProfile, StepDirection, Team, Teammate,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Allocation snapshot held by the UI between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationView {
    pub story_one: u32,
    pub story_two: u32,
    pub illustration_one: u32,
    pub illustration_two: u32,
    /// Counter shown in the header.
    pub remaining: i64,
}

impl From<&AllocationState> for AllocationView {
    fn from(state: &AllocationState) -> Self {
        Self {
            story_one: state.story_one(),
            story_two: state.story_two(),
            illustration_one: state.illustration_one(),
            illustration_two: state.illustration_two(),
            remaining: state.remaining(),
        }
    }
}

impl AllocationView {
    fn restore(&self, policy: &AllocationPolicy) -> Result<AllocationState, AllocationError> {
        AllocationState::restore(
            policy,
            self.story_one,
            self.story_two,
            self.illustration_one,
            self.illustration_two,
            self.remaining,
        )
    }
}

/// Result envelope for allocation edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationResponse {
    pub ok: bool,
    /// New view on success; the unchanged input view on failure.
    pub view: AllocationView,
    /// Value stored for the edited field.
    pub accepted: Option<u32>,
    pub message: String,
}

impl AllocationResponse {
    fn success(update: AllocationUpdate) -> Self {
        let message = if update.was_clamped() {
            format!("{} capped at {}.", update.field, update.accepted)
        } else {
            String::new()
        };
        Self {
            ok: true,
            view: AllocationView::from(&update.state),
            accepted: Some(update.accepted),
            message,
        }
    }

    fn failure(view: AllocationView, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            view,
            accepted: None,
            message: message.into(),
        }
    }
}

/// Identifiers needed to build submission records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmContext {
    pub member_id: i64,
    pub first_submission_id: i64,
    pub second_submission_id: i64,
}

/// Result envelope for confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmResponse {
    pub ok: bool,
    /// JSON array for the points endpoint; set only when `ok`.
    pub payload_json: Option<String>,
    /// User-facing notice on rejection.
    pub message: String,
}

/// Returns the opening view of the share-points screen.
#[flutter_rust_bridge::frb(sync)]
pub fn allocation_initial() -> AllocationView {
    AllocationView::from(&AllocationState::new(&AllocationPolicy::default()))
}

/// Applies one proposed field value.
///
/// # FFI contract
/// - `field`: `story_one|story_two|illustration_one|illustration_two`.
/// - Out-of-range values are clamped, not rejected.
/// - Unknown field or invalid view returns `ok = false` with the input view.
#[flutter_rust_bridge::frb(sync)]
pub fn allocation_update(current: AllocationView, field: String, value: u32) -> AllocationResponse {
    let policy = AllocationPolicy::default();
    match parse_request(&policy, &current, &field) {
        Ok((state, field)) => {
            AllocationResponse::success(evaluate_update(&policy, &state, field, value))
        }
        Err(err) => AllocationResponse::failure(current, format!("allocation_update failed: {err}")),
    }
}

/// Steps one field up (`up = true`) or down by the policy step.
#[flutter_rust_bridge::frb(sync)]
pub fn allocation_nudge(current: AllocationView, field: String, up: bool) -> AllocationResponse {
    let policy = AllocationPolicy::default();
    let direction = if up {
        StepDirection::Up
    } else {
        StepDirection::Down
    };
    match parse_request(&policy, &current, &field) {
        Ok((state, field)) => {
            AllocationResponse::success(nudge_field(&policy, &state, field, direction))
        }
        Err(err) => AllocationResponse::failure(current, format!("allocation_nudge failed: {err}")),
    }
}

/// Validates the view and builds the submission payload.
///
/// # FFI contract
/// - Negative `remaining` returns `ok = false` with the budget notice.
/// - Success returns the JSON payload; sending it is the caller's job.
#[flutter_rust_bridge::frb(sync)]
pub fn allocation_confirm(current: AllocationView, context: ConfirmContext) -> ConfirmResponse {
    let policy = AllocationPolicy::default();
    let result = current
        .restore(&policy)
        .and_then(|state| {
            confirm_allocation(
                &policy,
                &state,
                &team_for(&context),
                &ChildProfile {
                    member_id: context.member_id,
                },
            )
        });

    match result {
        Ok(records) => match encode_submission_payload(&records) {
            Ok(payload) => {
                log::info!(
                    "event=ffi_allocation_confirm module=ffi status=ok member_id={}",
                    context.member_id
                );
                ConfirmResponse {
                    ok: true,
                    payload_json: Some(payload),
                    message: "Points ready to submit.".to_string(),
                }
            }
            Err(err) => rejected(format!("allocation_confirm failed: {err}")),
        },
        Err(err @ AllocationError::BudgetExceeded { .. }) => rejected(err.to_string()),
        Err(err) => rejected(format!("allocation_confirm failed: {err}")),
    }
}

fn rejected(message: String) -> ConfirmResponse {
    log::warn!("event=ffi_allocation_confirm module=ffi status=rejected");
    ConfirmResponse {
        ok: false,
        payload_json: None,
        message,
    }
}

fn parse_request(
    policy: &AllocationPolicy,
    current: &AllocationView,
    field: &str,
) -> Result<(AllocationState, AllocationField), AllocationError> {
    let field = AllocationField::parse(field)?;
    let state = current.restore(policy)?;
    Ok((state, field))
}

// Record building only reads submission ids from the team.
fn team_for(context: &ConfirmContext) -> Team {
    let teammate = |submission_id| Teammate {
        avatar_url: String::new(),
        img_url: String::new(),
        pages: Vec::new(),
        submission_id,
    };
    Team {
        child1: teammate(context.first_submission_id),
        child2: teammate(context.second_submission_id),
    }
}
