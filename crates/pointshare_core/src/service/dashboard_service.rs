//! Child dashboard profile loading.
//!
//! # Responsibility
//! - Decide what the child dashboard shows for the current auth state.
//! - Fetch the signed-in user's profile once, off the caller's thread.
//!
//! # Invariants
//! - A fetch completing after `unmount()` never updates the loader.
//! - A failed fetch degrades to "no profile"; it is logged, not surfaced.
//! - Unmounting does not cancel the underlying request.

use crate::model::team::AuthContext;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

/// Message shown while the profile is being fetched.
pub const PROFILE_LOADING_MESSAGE: &str = "Fetching userProfile...";

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Profile lookup failure reported by a `ProfileSource`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileError(pub String);

impl Display for ProfileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "profile lookup failed: {}", self.0)
    }
}

impl Error for ProfileError {}

/// Supplies the signed-in user's profile, usually from the identity provider.
pub trait ProfileSource: Send + Sync {
    fn get_user(&self) -> Result<UserInfo, ProfileError>;
}

/// What the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    /// Not authenticated: nothing is shown.
    SignedOut,
    /// Authenticated, profile not available yet.
    Loading { message: &'static str },
    /// Authenticated with a loaded profile.
    Ready(UserInfo),
}

/// Dashboard loader for one mounted dashboard.
pub struct DashboardLoader {
    auth: AuthContext,
    subscribed: Arc<AtomicBool>,
    user_info: Arc<Mutex<Option<UserInfo>>>,
}

impl DashboardLoader {
    /// Mounts a loader for the given auth state.
    pub fn mount(auth: AuthContext) -> Self {
        Self {
            auth,
            subscribed: Arc::new(AtomicBool::new(true)),
            user_info: Arc::new(Mutex::new(None)),
        }
    }

    /// Current view derived from auth state and loaded profile.
    pub fn view(&self) -> DashboardView {
        if !self.auth.is_authenticated {
            return DashboardView::SignedOut;
        }
        match self.current_profile() {
            Some(info) => DashboardView::Ready(info),
            None => DashboardView::Loading {
                message: PROFILE_LOADING_MESSAGE,
            },
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscribed.load(Ordering::SeqCst)
    }

    /// Starts the profile fetch on a background thread.
    ///
    /// The handle yields `true` when the result was applied and `false` when
    /// it was dropped because the loader had been unmounted.
    pub fn spawn_fetch(&self, source: Arc<dyn ProfileSource>) -> JoinHandle<bool> {
        let subscription = ProfileSubscription {
            subscribed: Arc::clone(&self.subscribed),
            user_info: Arc::clone(&self.user_info),
        };
        std::thread::spawn(move || subscription.deliver(source.get_user()))
    }

    /// Marks the dashboard as torn down.
    pub fn unmount(&self) {
        self.subscribed.store(false, Ordering::SeqCst);
    }

    fn current_profile(&self) -> Option<UserInfo> {
        self.user_info
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for DashboardLoader {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Delivery side of one profile fetch.
struct ProfileSubscription {
    subscribed: Arc<AtomicBool>,
    user_info: Arc<Mutex<Option<UserInfo>>>,
}

impl ProfileSubscription {
    fn deliver(self, result: Result<UserInfo, ProfileError>) -> bool {
        let mut slot = self
            .user_info
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !self.subscribed.load(Ordering::SeqCst) {
            info!("event=profile_fetch module=dashboard status=dropped reason=unmounted");
            return false;
        }
        match result {
            Ok(info) => {
                info!("event=profile_fetch module=dashboard status=ok");
                *slot = Some(info);
            }
            Err(err) => {
                warn!("event=profile_fetch module=dashboard status=error error={err}");
                *slot = None;
            }
        }
        true
    }
}
