//! A search made before sign-up resumes on the results page exactly once.

use labfinder_application::pages::{SearchForm, View};
use labfinder_application::{LabFinderApp, build_app};
use labfinder_core::config::AppConfig;
use labfinder_core::navigation::Route;
use labfinder_core::user::{ProfileForm, SignUpForm};
use labfinder_infrastructure::LabFinderPaths;
use tempfile::TempDir;

fn app_in(temp_dir: &TempDir) -> LabFinderApp {
    let paths = LabFinderPaths::new(Some(temp_dir.path().to_path_buf()));
    let config = AppConfig {
        simulated_latency_ms: 0,
        ..AppConfig::default()
    };
    build_app(&paths, config).unwrap()
}

fn sign_up_form() -> SignUpForm {
    SignUpForm {
        profile: ProfileForm {
            name: "Jo".to_string(),
            age: Some(31),
            email: "jo@x.com".to_string(),
            phone: "5551234567".to_string(),
        },
        password: "hunter22".to_string(),
    }
}

#[tokio::test]
async fn sign_up_resumes_pending_search_once() {
    let temp_dir = TempDir::new().unwrap();
    let mut app = app_in(&temp_dir);
    assert!(!app.session().is_complete());

    *app.search_form_mut() = SearchForm {
        test: "CBC".to_string(),
        location: "Boston".to_string(),
    };
    app.submit_search().unwrap();
    assert!(app.dialog().is_some());

    app.sign_up(sign_up_form()).await.unwrap();
    assert!(app.session().is_complete());
    assert_eq!(app.current_route(), &Route::bare_results());

    let View::Results(view) = app.render() else {
        panic!("expected the results page");
    };
    assert_eq!(view.test, "CBC");
    assert_eq!(view.location, "Boston");
    assert_eq!(app.current_route(), &Route::results("CBC", "Boston"));
    assert_eq!(
        app.current_route().path(),
        "/results?test=CBC&location=Boston"
    );

    app.load_results().await.unwrap();
    let View::Results(view) = app.render() else {
        panic!("expected the results page");
    };
    assert!(!view.labs.unwrap().is_empty());

    // The intent is gone: a bare results page has nothing left to show
    app.navigate(Route::Home);
    app.navigate(Route::bare_results());
    assert!(app.render().is_blank());
}

#[tokio::test]
async fn signed_up_profile_is_durable() {
    let temp_dir = TempDir::new().unwrap();
    let mut app = app_in(&temp_dir);
    app.open_sign_in(Route::Home);
    app.sign_up(sign_up_form()).await.unwrap();
    drop(app);

    let reopened = app_in(&temp_dir);
    assert_eq!(reopened.session().profile().unwrap().name, "Jo");
}

#[tokio::test]
async fn logout_then_protected_page_redirects_to_profile_creation() {
    let temp_dir = TempDir::new().unwrap();
    let mut app = app_in(&temp_dir);
    app.open_sign_in(Route::Home);
    app.sign_up(sign_up_form()).await.unwrap();
    app.logout().unwrap();

    app.navigate(Route::Bookings);
    assert!(matches!(app.render(), View::Profile(_)));
    assert_eq!(app.current_route(), &Route::Profile);

    let reopened = app_in(&temp_dir);
    assert!(!reopened.session().is_complete());
}
