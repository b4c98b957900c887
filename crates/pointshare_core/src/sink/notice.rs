//! User-visible notice channel.

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
}

/// One message raised toward the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Displays notices to the user (toast, banner, dialog).
pub trait NoticeSink {
    fn notify(&self, notice: &Notice);
}

impl<T: NoticeSink + ?Sized> NoticeSink for &T {
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice)
    }
}
