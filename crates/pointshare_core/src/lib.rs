//! Core domain logic for the share-points screen.
//! This crate is the single source of truth for point allocation invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod sink;

pub use config::{AllocationPolicy, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::allocation::{AllocationError, AllocationField, AllocationState};
pub use model::submission::{encode_submission_payload, SubmissionRecord};
pub use model::team::{
    AuthContext, ChildProfile, MemberId, Page, SubmissionId, SubmissionKind, Team, Teammate,
};
pub use service::allocation_rule::{
    evaluate_update, field_ceiling, nudge_field, remaining_after, update_field, AllocationUpdate,
    StepDirection,
};
pub use service::dashboard_service::{
    DashboardLoader, DashboardView, ProfileError, ProfileSource, UserInfo,
    PROFILE_LOADING_MESSAGE,
};
pub use service::point_share_service::{confirm_allocation, PointShareSession, SessionPhase};
pub use sink::notice::{Notice, NoticeLevel, NoticeSink};
pub use sink::submission::{SinkError, SinkResult, SubmissionSink};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
