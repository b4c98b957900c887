//! Submission sink contract for finalized point splits.

use crate::model::submission::SubmissionRecord;
use crate::model::team::AuthContext;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SinkResult<T> = Result<T, SinkError>;

/// Failure reported by a submission sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The backend refused the payload.
    Rejected(String),
    /// The backend could not be reached.
    Unavailable(String),
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(message) => write!(f, "submission rejected: {message}"),
            Self::Unavailable(message) => write!(f, "submission sink unavailable: {message}"),
        }
    }
}

impl Error for SinkError {}

/// Receives the two records of one confirmed allocation.
///
/// Implementations own transport, retries and user feedback on failure.
pub trait SubmissionSink {
    fn submit_points(&self, auth: &AuthContext, records: &[SubmissionRecord; 2])
        -> SinkResult<()>;
}

impl<T: SubmissionSink + ?Sized> SubmissionSink for &T {
    fn submit_points(
        &self,
        auth: &AuthContext,
        records: &[SubmissionRecord; 2],
    ) -> SinkResult<()> {
        (**self).submit_points(auth, records)
    }
}
