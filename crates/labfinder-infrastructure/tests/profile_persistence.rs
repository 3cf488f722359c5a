//! Profile persistence through the file-backed store.

use std::fs;
use std::sync::Arc;

use labfinder_core::profile::{PROFILE_KEY, ProfileSession, ProfileStore, SessionState};
use labfinder_core::user::UserProfile;
use labfinder_infrastructure::{FileKeyValueStore, LabFinderPaths};
use tempfile::TempDir;

fn open_session(paths: &LabFinderPaths) -> ProfileSession {
    let backend = Arc::new(FileKeyValueStore::new(paths.local_storage_file().unwrap()));
    ProfileSession::open(ProfileStore::new(backend))
}

fn jo() -> UserProfile {
    UserProfile {
        name: "Jo".to_string(),
        age: 31,
        email: "jo@x.com".to_string(),
        phone: "5551234567".to_string(),
    }
}

#[test]
fn profile_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let paths = LabFinderPaths::new(Some(temp_dir.path().to_path_buf()));

    let mut session = open_session(&paths);
    assert_eq!(session.state(), SessionState::Empty);
    session.set_profile(jo()).unwrap();
    drop(session);

    let restarted = open_session(&paths);
    assert_eq!(restarted.state(), SessionState::Populated);
    assert_eq!(restarted.profile(), Some(&jo()));
}

#[test]
fn logout_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let paths = LabFinderPaths::new(Some(temp_dir.path().to_path_buf()));

    let mut session = open_session(&paths);
    session.set_profile(jo()).unwrap();
    session.logout().unwrap();
    session.logout().unwrap();
    drop(session);

    assert_eq!(open_session(&paths).state(), SessionState::Empty);
}

#[test]
fn stored_record_is_plain_profile_json() {
    let temp_dir = TempDir::new().unwrap();
    let paths = LabFinderPaths::new(Some(temp_dir.path().to_path_buf()));
    open_session(&paths).set_profile(jo()).unwrap();

    let file: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(paths.local_storage_file().unwrap()).unwrap())
            .unwrap();
    let record: serde_json::Value =
        serde_json::from_str(file[PROFILE_KEY].as_str().unwrap()).unwrap();
    assert_eq!(
        record,
        serde_json::json!({"name":"Jo","age":31,"email":"jo@x.com","phone":"5551234567"})
    );
}

#[test]
fn malformed_record_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let paths = LabFinderPaths::new(Some(temp_dir.path().to_path_buf()));
    fs::write(
        paths.local_storage_file().unwrap(),
        serde_json::json!({ PROFILE_KEY: "{" }).to_string(),
    )
    .unwrap();

    let session = open_session(&paths);
    assert!(session.is_ready());
    assert!(!session.is_complete());
}
