//! Team, child and auth context injected into a share-points session.
//!
//! These records come from the application's global state and are treated as
//! opaque pass-through data. Serde names follow the backend's JSON.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// Backend identifier of a child member.
pub type MemberId = i64;
/// Backend identifier of a submission.
pub type SubmissionId = i64;

/// One page of a written story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(rename = "PageURL")]
    pub page_url: String,
}

/// A teammate's submission as seen on the share-points screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teammate {
    #[serde(rename = "AvatarURL")]
    pub avatar_url: String,
    /// Drawing image.
    #[serde(rename = "ImgURL")]
    pub img_url: String,
    /// Story pages in reading order.
    #[serde(rename = "Pages", default)]
    pub pages: Vec<Page>,
    #[serde(rename = "SubmissionID")]
    pub submission_id: SubmissionId,
}

impl Teammate {
    /// First story page, shown as the story thumbnail.
    pub fn cover_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// Image URLs a submission viewer opens for one category.
    pub fn viewer_content(&self, kind: SubmissionKind) -> Vec<&str> {
        match kind {
            SubmissionKind::Drawing => vec![self.img_url.as_str()],
            SubmissionKind::Writing => self
                .pages
                .iter()
                .map(|page| page.page_url.as_str())
                .collect(),
        }
    }
}

/// Submission category a field scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Writing,
    Drawing,
}

/// The two teammates whose submissions receive points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub child1: Teammate,
    pub child2: Teammate,
}

/// The child allocating the points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildProfile {
    #[serde(rename = "memberId")]
    pub member_id: MemberId,
}

/// Authenticated-user context forwarded to the submission sink.
///
/// The access token is opaque to core and never printed.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct AuthContext {
    pub is_authenticated: bool,
    pub access_token: Option<String>,
}

impl AuthContext {
    pub fn authenticated(access_token: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            access_token: Some(access_token.into()),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }
}

impl Debug for AuthContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("is_authenticated", &self.is_authenticated)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
