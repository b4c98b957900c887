//! Finalized per-teammate point records.

use crate::model::team::{MemberId, SubmissionId};
use serde::{Deserialize, Serialize};

/// Points awarded to one teammate's submission pair.
///
/// Serialized with the scoring backend's field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(rename = "WritingPoints")]
    pub writing_points: u32,
    #[serde(rename = "DrawingPoints")]
    pub drawing_points: u32,
    /// The allocating child.
    #[serde(rename = "MemberID")]
    pub member_id: MemberId,
    /// The teammate submission receiving the points.
    #[serde(rename = "SubmissionID")]
    pub submission_id: SubmissionId,
}

/// Encodes the two records as the JSON array the backend accepts.
pub fn encode_submission_payload(records: &[SubmissionRecord; 2]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}
