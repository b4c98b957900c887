use pointshare_core::{
    AuthContext, DashboardLoader, DashboardView, ProfileError, ProfileSource, UserInfo,
    PROFILE_LOADING_MESSAGE,
};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};

struct FixedSource(Result<UserInfo, ProfileError>);

impl ProfileSource for FixedSource {
    fn get_user(&self) -> Result<UserInfo, ProfileError> {
        self.0.clone()
    }
}

/// Blocks inside `get_user` until the test releases it.
struct GatedSource {
    release: Mutex<Receiver<()>>,
}

impl ProfileSource for GatedSource {
    fn get_user(&self) -> Result<UserInfo, ProfileError> {
        let release = self.release.lock().expect("gate lock");
        release.recv().map_err(|err| ProfileError(err.to_string()))?;
        Ok(user())
    }
}

fn user() -> UserInfo {
    UserInfo {
        sub: "00u-child".to_string(),
        name: Some("Ada".to_string()),
        email: Some("ada@example.test".to_string()),
    }
}

#[test]
fn authenticated_dashboard_loads_then_shows_profile() {
    let loader = DashboardLoader::mount(AuthContext::authenticated("token"));
    assert_eq!(
        loader.view(),
        DashboardView::Loading {
            message: PROFILE_LOADING_MESSAGE
        }
    );

    let applied = loader
        .spawn_fetch(Arc::new(FixedSource(Ok(user()))))
        .join()
        .expect("fetch thread should not panic");

    assert!(applied);
    assert_eq!(loader.view(), DashboardView::Ready(user()));
}

#[test]
fn failed_fetch_degrades_to_loading_view() {
    let loader = DashboardLoader::mount(AuthContext::authenticated("token"));

    let applied = loader
        .spawn_fetch(Arc::new(FixedSource(Err(ProfileError(
            "network down".to_string(),
        )))))
        .join()
        .expect("fetch thread should not panic");

    assert!(applied);
    assert_eq!(
        loader.view(),
        DashboardView::Loading {
            message: PROFILE_LOADING_MESSAGE
        }
    );
}

#[test]
fn signed_out_dashboard_ignores_profile() {
    let loader = DashboardLoader::mount(AuthContext::signed_out());

    loader
        .spawn_fetch(Arc::new(FixedSource(Ok(user()))))
        .join()
        .expect("fetch thread should not panic");

    assert_eq!(loader.view(), DashboardView::SignedOut);
}

#[test]
fn late_profile_after_unmount_is_dropped() {
    let (release_tx, release_rx) = channel();
    let loader = DashboardLoader::mount(AuthContext::authenticated("token"));
    let handle = loader.spawn_fetch(Arc::new(GatedSource {
        release: Mutex::new(release_rx),
    }));

    loader.unmount();
    assert!(!loader.is_mounted());
    release_tx.send(()).expect("fetch thread is waiting");

    let applied = handle.join().expect("fetch thread should not panic");
    assert!(!applied);
    assert_eq!(
        loader.view(),
        DashboardView::Loading {
            message: PROFILE_LOADING_MESSAGE
        }
    );
}

#[test]
fn user_info_decodes_with_optional_fields_missing() {
    let info: UserInfo =
        serde_json::from_value(serde_json::json!({ "sub": "00u-child" })).expect("decodes");
    assert_eq!(info.sub, "00u-child");
    assert!(info.name.is_none());
    assert!(info.email.is_none());
}
