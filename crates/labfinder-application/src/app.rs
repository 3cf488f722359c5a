//! The application root: owns the profile session and routes between pages.
//!
//! `LabFinderApp` is the single writable owner of the [`ProfileSession`].
//! Pages see it read-only through the views they render into. Every page
//! that needs a complete profile passes through the one [`ProfileGuard`]
//! held here, so no page repeats the check.

use std::sync::Arc;

use labfinder_core::LabFinderError;
use labfinder_core::config::AppConfig;
use labfinder_core::error::Result;
use labfinder_core::location::GeolocationProvider;
use labfinder_core::navigation::{History, Navigator, Route};
use labfinder_core::notification::Toast;
use labfinder_core::profile::{GuardDecision, ProfileGuard, ProfileSession};
use labfinder_core::search::{DistanceFilter, IntentCache, LabDirectory, SortOption};
use labfinder_core::user::{
    ProfileForm, SignInForm, SignUpForm, UserProfile, ValidationErrors,
};
use tokio_util::sync::CancellationToken;

use crate::pages::{
    AboutView, BookingsView, DialogTab, HomeView, ProfileFormMode, ProfileFormView, ResultsPage,
    SearchForm, SignInDialog, View,
};
use crate::scope::ViewScope;
use crate::toasts::ToastQueue;

pub struct LabFinderApp {
    config: AppConfig,
    session: ProfileSession,
    intents: IntentCache,
    history: History,
    guard: ProfileGuard,
    directory: Arc<dyn LabDirectory>,
    geolocation: Arc<dyn GeolocationProvider>,
    toasts: ToastQueue,
    /// Work started by the current page
    scope: ViewScope,
    search: SearchForm,
    dialog: Option<SignInDialog>,
    form_errors: ValidationErrors,
    results: Option<ResultsPage>,
}

impl LabFinderApp {
    /// Creates the application on the home page.
    ///
    /// The session is initialized here if it was not already, so nothing
    /// renders before the stored profile has been read.
    pub fn new(
        mut session: ProfileSession,
        intents: IntentCache,
        directory: Arc<dyn LabDirectory>,
        geolocation: Arc<dyn GeolocationProvider>,
        config: AppConfig,
    ) -> Self {
        session.initialize();
        Self {
            config,
            session,
            intents,
            history: History::default(),
            guard: ProfileGuard::new(),
            directory,
            geolocation,
            toasts: ToastQueue::default(),
            scope: ViewScope::new(),
            search: SearchForm::default(),
            dialog: None,
            form_errors: ValidationErrors::default(),
            results: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &ProfileSession {
        &self.session
    }

    pub fn current_route(&self) -> &Route {
        self.history.current()
    }

    /// Cancels whatever the current page is waiting on.
    pub fn view_token(&mut self) -> CancellationToken {
        self.active_scope().token()
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn navigate(&mut self, route: Route) {
        let previous = self.history.current().clone();
        self.history.push(route);
        self.entered_from(&previous);
    }

    /// Goes back one history entry. Returns false on the first page.
    pub fn back(&mut self) -> bool {
        let previous = self.history.current().clone();
        let moved = self.history.back();
        self.entered_from(&previous);
        moved
    }

    /// Tears down the previous page's state once the route changed.
    fn entered_from(&mut self, previous: &Route) {
        let current = self.history.current();
        if current == previous {
            return;
        }
        tracing::info!(from = %previous, to = %current, "Navigated");

        self.scope.cancel();
        self.scope = ViewScope::new();
        self.guard = ProfileGuard::new();
        self.dialog = None;
        self.form_errors = ValidationErrors::default();
        if !matches!(current, Route::Results { .. }) {
            self.results = None;
        }
    }

    /// A scope for new work on the current page. Work cancelled while the
    /// page stayed open (e.g. by Ctrl-C) does not block later work.
    fn active_scope(&mut self) -> ViewScope {
        if self.scope.is_cancelled() {
            self.scope = ViewScope::new();
        }
        self.scope.clone()
    }

    /// Runs the profile guard for the current page, redirecting at most once.
    /// A redirect tears the current page down like any other navigation.
    fn check_profile(&mut self) -> GuardDecision {
        let previous = self.history.current().clone();
        let history = &mut self.history;
        let destination = self.guard.destination().clone();
        let decision = self
            .guard
            .require_complete_profile(&self.session, || history.push(destination));
        self.entered_from(&previous);
        decision
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Renders the current page, following a guard redirect if one fired.
    pub fn render(&mut self) -> View {
        let before = self.history.current().clone();
        let view = self.render_page();
        if self.history.current() != &before && view.is_blank() {
            return self.render_page();
        }
        view
    }

    /// Renders the current page once. A guarded page whose profile check
    /// fails renders [`View::Blank`].
    pub fn render_page(&mut self) -> View {
        let route = self.history.current().clone();

        if route.requires_profile() && self.check_profile() != GuardDecision::Allow {
            return View::Blank;
        }

        match route {
            Route::Home => View::Home(HomeView::new(
                self.config.brand_name.clone(),
                self.session.profile().map(|p| p.first_name().to_string()),
                self.search.clone(),
                self.dialog.clone(),
            )),
            Route::About => View::About(AboutView::new()),
            Route::Profile => View::Profile(ProfileFormView {
                mode: ProfileFormMode::Create,
                form: ProfileForm::default(),
                errors: self.form_errors.clone(),
            }),
            Route::ProfileEdit => View::Profile(ProfileFormView {
                mode: ProfileFormMode::Edit,
                form: self
                    .session
                    .profile()
                    .map(ProfileForm::from_profile)
                    .unwrap_or_default(),
                errors: self.form_errors.clone(),
            }),
            Route::Bookings => match self.session.profile() {
                Some(profile) => View::Bookings(BookingsView {
                    profile: profile.clone(),
                }),
                None => View::Blank,
            },
            Route::Results { test, location } => self.render_results(test, location),
        }
    }

    fn render_results(&mut self, test: Option<String>, location: Option<String>) -> View {
        let (test, location) = match (test, location) {
            (Some(test), Some(location)) => (test, location),
            _ => match self.intents.take() {
                Ok(Some(intent)) => {
                    tracing::info!(test = %intent.test, location = %intent.location, "Resuming pending search");
                    self.history
                        .replace(Route::results(intent.test.clone(), intent.location.clone()));
                    (intent.test, intent.location)
                }
                Ok(None) => return View::Blank,
                Err(e) => {
                    tracing::warn!(error = %e, "Pending search unavailable");
                    return View::Blank;
                }
            },
        };

        let page = match self.results.take() {
            Some(page) if page.shows(&test, &location) => page,
            _ => ResultsPage::new(test, location),
        };
        let view = page.view();
        self.results = Some(page);
        View::Results(view)
    }

    // ========================================================================
    // Home / search form
    // ========================================================================

    pub fn search_form(&self) -> &SearchForm {
        &self.search
    }

    pub fn search_form_mut(&mut self) -> &mut SearchForm {
        &mut self.search
    }

    /// Fills the location field from the geolocation provider.
    ///
    /// Failures only produce a toast; the session is never touched.
    pub async fn detect_location(&mut self) -> Result<()> {
        if !self.geolocation.is_supported() {
            self.toasts.push(Toast::error(
                "Geolocation not supported",
                "Your browser doesn't support location detection. Please enter your location manually.",
            ));
            return Ok(());
        }

        let scope = self.active_scope();
        let geolocation = self.geolocation.clone();
        match scope.run(async move { geolocation.current_position().await }).await? {
            Ok(position) => {
                self.search.location = position.to_string();
                self.toasts.push(Toast::info(
                    "Location detected",
                    "We've detected your current location.",
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Location detection failed");
                self.toasts.push(Toast::error(
                    "Location detection failed",
                    "We couldn't detect your location. Please enter it manually.",
                ));
            }
        }
        Ok(())
    }

    /// Submits the search form.
    ///
    /// Without a complete profile the search is parked as the pending search
    /// and the sign-in dialog opens, redirecting to the results page after.
    pub fn submit_search(&mut self) -> Result<()> {
        let intent = match self.search.check() {
            Ok(intent) => intent,
            Err(toast) => {
                self.toasts.push(toast);
                return Ok(());
            }
        };

        if !self.session.is_complete() {
            self.intents.record(&intent)?;
            self.open_sign_in(Route::bare_results());
            return Ok(());
        }

        self.navigate(Route::results(intent.test, intent.location));
        Ok(())
    }

    // ========================================================================
    // Sign-in dialog
    // ========================================================================

    pub fn dialog(&self) -> Option<&SignInDialog> {
        self.dialog.as_ref()
    }

    pub fn open_sign_in(&mut self, redirect: Route) {
        self.dialog = Some(SignInDialog::new(redirect));
    }

    pub fn switch_dialog_tab(&mut self, tab: DialogTab) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.switch_to(tab);
        }
    }

    pub fn close_sign_in(&mut self) {
        self.dialog = None;
    }

    /// Signs in with any well-formed credentials.
    ///
    /// There is no account lookup: the session receives a placeholder
    /// profile carrying the entered email.
    pub async fn sign_in(&mut self, form: SignInForm) -> Result<()> {
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(errors) => return Err(self.reject_dialog(errors)),
        };
        self.finish_sign_in(
            UserProfile::placeholder(credentials.email),
            Toast::info(
                "Signed in successfully",
                format!("Welcome back to {}!", self.config.brand_name),
            ),
            "Error signing in",
            "Please check your credentials and try again",
        )
        .await
    }

    /// Creates an account from the sign-up tab.
    pub async fn sign_up(&mut self, form: SignUpForm) -> Result<()> {
        let profile = match form.validate() {
            Ok(profile) => profile,
            Err(errors) => return Err(self.reject_dialog(errors)),
        };
        self.finish_sign_in(
            profile,
            Toast::info(
                "Account created successfully",
                format!("Welcome to {}!", self.config.brand_name),
            ),
            "Error creating account",
            "Please try again later",
        )
        .await
    }

    fn reject_dialog(&mut self, errors: ValidationErrors) -> LabFinderError {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.errors = errors.clone();
        }
        LabFinderError::Validation(errors)
    }

    async fn finish_sign_in(
        &mut self,
        profile: UserProfile,
        success: Toast,
        failure_title: &str,
        failure_description: &str,
    ) -> Result<()> {
        let scope = self.active_scope();
        scope.delay(self.config.simulated_latency()).await?;

        if let Err(e) = self.session.set_profile(profile) {
            tracing::error!(error = %e, "Failed to store profile");
            self.toasts.push(Toast::error(failure_title, failure_description));
            return Err(e);
        }

        self.toasts.push(success);
        let redirect = self
            .dialog
            .take()
            .map(|dialog| dialog.redirect)
            .unwrap_or_default();
        self.navigate(redirect);
        Ok(())
    }

    // ========================================================================
    // Profile pages
    // ========================================================================

    /// Submits the profile creation form.
    pub async fn create_profile(&mut self, form: ProfileForm) -> Result<()> {
        self.save_profile_form(
            form,
            Toast::info(
                "Profile created successfully",
                "Welcome to Medical Lab Finder!",
            ),
            "Error creating profile",
        )
        .await
    }

    /// Submits the profile edit form, replacing the profile wholesale.
    ///
    /// Goes through the guard like rendering the edit page does.
    pub async fn update_profile(&mut self, form: ProfileForm) -> Result<()> {
        if self.check_profile() != GuardDecision::Allow {
            return Ok(());
        }
        self.save_profile_form(
            form,
            Toast::info(
                "Profile updated successfully",
                "Your profile information has been updated.",
            ),
            "Error updating profile",
        )
        .await
    }

    async fn save_profile_form(
        &mut self,
        form: ProfileForm,
        success: Toast,
        failure_title: &str,
    ) -> Result<()> {
        let profile = match form.validate() {
            Ok(profile) => profile,
            Err(errors) => {
                self.form_errors = errors.clone();
                return Err(LabFinderError::Validation(errors));
            }
        };

        let scope = self.active_scope();
        scope.delay(self.config.simulated_latency()).await?;

        if let Err(e) = self.session.set_profile(profile) {
            tracing::error!(error = %e, "Failed to store profile");
            self.toasts
                .push(Toast::error(failure_title, "Please try again later"));
            return Err(e);
        }

        self.toasts.push(success);
        self.navigate(Route::Home);
        Ok(())
    }

    /// Clears the profile from memory and storage and returns home.
    pub fn logout(&mut self) -> Result<()> {
        self.session.logout()?;
        self.navigate(Route::Home);
        Ok(())
    }

    // ========================================================================
    // Results page
    // ========================================================================

    /// Loads labs for the results page currently shown.
    ///
    /// Does nothing unless a results page is waiting for its labs. Labs that
    /// arrive after the page was left are dropped.
    pub async fn load_results(&mut self) -> Result<()> {
        let Some(page) = self.results.as_ref().filter(|page| page.is_loading()) else {
            return Ok(());
        };
        let test = page.test().to_string();
        let location = page.location().to_string();

        let scope = self.active_scope();
        let directory = self.directory.clone();
        let (query_test, query_location) = (test.clone(), location.clone());
        let labs = scope
            .run(async move { directory.find_labs(&query_test, &query_location).await })
            .await??;

        match self.results.as_mut() {
            Some(page) if page.shows(&test, &location) => {
                tracing::info!(count = labs.len(), %test, %location, "Labs loaded");
                page.loaded(labs);
                Ok(())
            }
            _ => {
                tracing::debug!(%test, %location, "Dropping labs for a closed results page");
                Err(LabFinderError::cancelled("the results page was closed"))
            }
        }
    }

    pub fn sort_results(&mut self, sort: SortOption) {
        if let Some(results) = self.results.as_mut().and_then(ResultsPage::results_mut) {
            results.sort_by(sort);
        }
    }

    pub fn filter_results(&mut self, filter: DistanceFilter) {
        if let Some(results) = self.results.as_mut().and_then(ResultsPage::results_mut) {
            results.filter_by(filter);
        }
    }

    /// The "Book Appointment" button. Booking is not implemented, so this
    /// only tells the visitor how to book by phone.
    pub fn book(&mut self, lab_id: &str) -> Result<()> {
        let lab = self
            .results
            .as_ref()
            .and_then(ResultsPage::results)
            .and_then(|results| results.all().iter().find(|lab| lab.id == lab_id))
            .ok_or_else(|| LabFinderError::not_found("lab", lab_id))?;

        let toast = Toast::info(
            "Online booking coming soon",
            format!("Call {} at {} to book your appointment.", lab.name, lab.phone),
        );
        tracing::info!(lab = %lab.id, "Booking requested");
        self.toasts.push(toast);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use labfinder_core::location::Coordinates;
    use labfinder_core::profile::{PROFILE_KEY, ProfileStore};
    use labfinder_core::search::{Lab, PENDING_SEARCH_KEY, SearchIntent};
    use labfinder_core::storage::{KeyValueStore, MemoryKeyValueStore};
    use std::time::Duration;

    fn lab(id: &str, distance: f64, price: f64) -> Lab {
        Lab {
            id: id.to_string(),
            name: format!("Lab {}", id),
            address: "1 Main St".to_string(),
            distance,
            rating: 4.0,
            review_count: 3,
            test_price: price,
            opening_hours: "Mon-Fri".to_string(),
            phone: "(555) 000-0001".to_string(),
            logo_url: None,
            accreditations: vec![],
            services: vec![],
        }
    }

    struct StaticDirectory {
        latency: Duration,
    }

    #[async_trait]
    impl LabDirectory for StaticDirectory {
        async fn find_labs(&self, _test: &str, _location: &str) -> Result<Vec<Lab>> {
            tokio::time::sleep(self.latency).await;
            Ok(vec![lab("a", 8.0, 40.0), lab("b", 3.0, 60.0), lab("c", 15.0, 20.0)])
        }
    }

    struct FixedGeolocation(Option<Result<Coordinates>>);

    #[async_trait]
    impl GeolocationProvider for FixedGeolocation {
        fn is_supported(&self) -> bool {
            self.0.is_some()
        }

        async fn current_position(&self) -> Result<Coordinates> {
            match &self.0 {
                Some(result) => result.clone(),
                None => Err(LabFinderError::geolocation("unsupported")),
            }
        }
    }

    struct Harness {
        local: Arc<MemoryKeyValueStore>,
        session_storage: Arc<MemoryKeyValueStore>,
        app: LabFinderApp,
    }

    fn harness_with(
        local: MemoryKeyValueStore,
        geolocation: FixedGeolocation,
        latency: Duration,
    ) -> Harness {
        let local = Arc::new(local);
        let session_storage = Arc::new(MemoryKeyValueStore::new());
        let config = AppConfig {
            simulated_latency_ms: 0,
            ..AppConfig::default()
        };
        let app = LabFinderApp::new(
            ProfileSession::new(ProfileStore::new(local.clone())),
            IntentCache::new(session_storage.clone()),
            Arc::new(StaticDirectory { latency }),
            Arc::new(geolocation),
            config,
        );
        Harness {
            local,
            session_storage,
            app,
        }
    }

    fn harness() -> Harness {
        harness_with(
            MemoryKeyValueStore::new(),
            FixedGeolocation(Some(Ok(Coordinates::new(42.3601, -71.0589)))),
            Duration::ZERO,
        )
    }

    fn signed_in() -> Harness {
        let record = r#"{"name":"Jo Smith","age":31,"email":"jo@x.com","phone":"5551234567"}"#;
        harness_with(
            MemoryKeyValueStore::with_entry(PROFILE_KEY, record),
            FixedGeolocation(Some(Ok(Coordinates::new(42.3601, -71.0589)))),
            Duration::ZERO,
        )
    }

    fn valid_profile_form() -> ProfileForm {
        ProfileForm {
            name: "Jo".to_string(),
            age: Some(31),
            email: "jo@x.com".to_string(),
            phone: "5551234567".to_string(),
        }
    }

    #[test]
    fn test_new_app_has_ready_session() {
        let h = harness();
        assert!(h.app.session().is_ready());
        assert_eq!(h.app.current_route(), &Route::Home);
    }

    #[test]
    fn test_guarded_page_redirects_once_to_profile() {
        let mut h = harness();
        h.app.navigate(Route::Bookings);

        assert!(h.app.render_page().is_blank());
        assert_eq!(h.app.current_route(), &Route::Profile);
    }

    #[test]
    fn test_render_follows_redirect() {
        let mut h = harness();
        h.app.navigate(Route::ProfileEdit);

        match h.app.render() {
            View::Profile(view) => assert_eq!(view.mode, ProfileFormMode::Create),
            other => panic!("expected profile creation, got {:?}", other),
        }
    }

    #[test]
    fn test_guard_allows_complete_profile() {
        let mut h = signed_in();
        h.app.navigate(Route::Bookings);
        match h.app.render() {
            View::Bookings(view) => assert_eq!(view.profile.email, "jo@x.com"),
            other => panic!("expected bookings, got {:?}", other),
        }

        h.app.navigate(Route::ProfileEdit);
        match h.app.render() {
            View::Profile(view) => {
                assert_eq!(view.mode, ProfileFormMode::Edit);
                assert_eq!(view.form.name, "Jo Smith");
            }
            other => panic!("expected profile edit, got {:?}", other),
        }
    }

    #[test]
    fn test_home_greets_by_first_name() {
        let mut h = signed_in();
        match h.app.render() {
            View::Home(view) => assert_eq!(view.greeting.as_deref(), Some("Jo")),
            other => panic!("expected home, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_search_requires_both_fields() {
        let mut h = harness();
        h.app.submit_search().unwrap();
        h.app.search_form_mut().test = "CBC".to_string();
        h.app.submit_search().unwrap();

        let titles: Vec<_> = h.app.drain_toasts().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Test name required", "Location required"]);
        assert!(h.app.dialog().is_none());
        assert_eq!(h.session_storage.get(PENDING_SEARCH_KEY).unwrap(), None);
    }

    #[test]
    fn test_submit_search_without_profile_parks_intent() {
        let mut h = harness();
        *h.app.search_form_mut() = SearchForm {
            test: "CBC".to_string(),
            location: "Boston".to_string(),
        };
        h.app.submit_search().unwrap();

        assert_eq!(h.app.current_route(), &Route::Home);
        assert_eq!(h.app.dialog().unwrap().redirect, Route::bare_results());
        let parked: SearchIntent =
            serde_json::from_str(&h.session_storage.get(PENDING_SEARCH_KEY).unwrap().unwrap())
                .unwrap();
        assert_eq!(parked, SearchIntent::new("CBC", "Boston"));
    }

    #[test]
    fn test_submit_search_with_profile_navigates() {
        let mut h = signed_in();
        *h.app.search_form_mut() = SearchForm {
            test: "Lipid Panel".to_string(),
            location: "Austin, TX".to_string(),
        };
        h.app.submit_search().unwrap();
        assert_eq!(
            h.app.current_route(),
            &Route::results("Lipid Panel", "Austin, TX")
        );
    }

    #[tokio::test]
    async fn test_detect_location_fills_form() {
        let mut h = harness();
        h.app.detect_location().await.unwrap();
        assert_eq!(h.app.search_form().location, "42.3601, -71.0589");
        assert_eq!(h.app.drain_toasts()[0].title, "Location detected");
    }

    #[tokio::test]
    async fn test_detect_location_failures_only_toast() {
        let mut h = harness_with(
            MemoryKeyValueStore::new(),
            FixedGeolocation(None),
            Duration::ZERO,
        );
        h.app.detect_location().await.unwrap();
        assert_eq!(h.app.drain_toasts()[0].title, "Geolocation not supported");

        let mut h = harness_with(
            MemoryKeyValueStore::new(),
            FixedGeolocation(Some(Err(LabFinderError::geolocation("denied")))),
            Duration::ZERO,
        );
        h.app.detect_location().await.unwrap();
        let toast = &h.app.drain_toasts()[0];
        assert_eq!(toast.title, "Location detection failed");
        assert!(toast.is_error());
        assert!(h.app.search_form().location.is_empty());
        assert!(!h.app.session().is_complete());
    }

    #[tokio::test]
    async fn test_sign_in_stores_placeholder_profile() {
        let mut h = harness();
        h.app.open_sign_in(Route::Bookings);
        h.app
            .sign_in(SignInForm {
                email: "jo@x.com".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            h.app.session().profile(),
            Some(&UserProfile::placeholder("jo@x.com"))
        );
        assert!(h.local.get(PROFILE_KEY).unwrap().is_some());
        assert!(h.app.dialog().is_none());
        assert_eq!(h.app.current_route(), &Route::Bookings);
        assert_eq!(h.app.drain_toasts()[0].title, "Signed in successfully");
    }

    #[tokio::test]
    async fn test_rejected_sign_in_keeps_session_empty() {
        let mut h = harness();
        h.app.open_sign_in(Route::Home);
        let err = h
            .app
            .sign_in(SignInForm {
                email: "nope".to_string(),
                password: "123".to_string(),
            })
            .await
            .unwrap_err();

        let errors = err.validation_errors().unwrap();
        assert_eq!(
            errors.for_field("email"),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            errors.for_field("password"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(h.app.dialog().unwrap().errors.len(), 2);
        assert!(!h.app.session().is_complete());
        assert_eq!(h.local.get(PROFILE_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_profile_then_edit() {
        let mut h = harness();
        h.app.navigate(Route::Profile);
        h.app.create_profile(valid_profile_form()).await.unwrap();
        assert_eq!(h.app.current_route(), &Route::Home);
        assert_eq!(
            h.app.drain_toasts()[0].title,
            "Profile created successfully"
        );

        h.app.navigate(Route::ProfileEdit);
        let mut edited = valid_profile_form();
        edited.name = "Joanna".to_string();
        h.app.update_profile(edited).await.unwrap();
        assert_eq!(h.app.session().profile().unwrap().name, "Joanna");
        assert_eq!(
            h.app.drain_toasts()[0].title,
            "Profile updated successfully"
        );
    }

    #[tokio::test]
    async fn test_denied_update_tears_down_edit_page() {
        let mut h = harness();
        h.app.navigate(Route::ProfileEdit);
        let edit_token = h.app.view_token();

        h.app.update_profile(valid_profile_form()).await.unwrap();
        assert_eq!(h.app.current_route(), &Route::Profile);
        assert!(edit_token.is_cancelled());
        assert!(!h.app.session().is_complete());
        assert!(h.app.toasts().is_empty());

        match h.app.render() {
            View::Profile(view) => {
                assert_eq!(view.mode, ProfileFormMode::Create);
                assert!(view.errors.is_empty());
            }
            other => panic!("expected profile creation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_profile_form_shows_field_errors() {
        let mut h = harness();
        h.app.navigate(Route::Profile);
        let mut form = valid_profile_form();
        form.age = Some(0);
        assert!(h.app.create_profile(form).await.unwrap_err().is_validation());

        match h.app.render() {
            View::Profile(view) => {
                assert_eq!(view.errors.for_field("age"), Some("Age must be at least 1"))
            }
            other => panic!("expected profile form, got {:?}", other),
        }
        assert!(!h.app.session().is_complete());
    }

    #[test]
    fn test_logout_clears_and_goes_home() {
        let mut h = signed_in();
        h.app.navigate(Route::Bookings);
        h.app.logout().unwrap();

        assert_eq!(h.app.current_route(), &Route::Home);
        assert!(!h.app.session().is_complete());
        assert_eq!(h.local.get(PROFILE_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_results_sort_filter_and_empty_message() {
        let mut h = signed_in();
        h.app.navigate(Route::results("CBC", "Boston"));
        let View::Results(view) = h.app.render() else {
            panic!("expected results");
        };
        assert!(view.is_loading());

        h.app.load_results().await.unwrap();
        h.app.sort_results(SortOption::PriceAsc);
        h.app.filter_results(DistanceFilter::WithinKm(10));
        let View::Results(view) = h.app.render() else {
            panic!("expected results");
        };
        let ids: Vec<_> = view.labs.unwrap().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["a", "b"]);

        h.app.filter_results(DistanceFilter::WithinKm(1));
        let View::Results(view) = h.app.render() else {
            panic!("expected results");
        };
        assert_eq!(
            view.empty_message(),
            Some("No labs found matching your criteria. Try adjusting your filters.")
        );
    }

    #[test]
    fn test_results_without_query_or_intent_is_blank() {
        let mut h = signed_in();
        h.app.navigate(Route::bare_results());
        assert!(h.app.render().is_blank());
        assert_eq!(h.app.current_route(), &Route::bare_results());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_load_is_discarded_and_retryable() {
        let mut h = harness_with(
            MemoryKeyValueStore::with_entry(
                PROFILE_KEY,
                r#"{"name":"Jo","age":31,"email":"jo@x.com","phone":"5551234567"}"#,
            ),
            FixedGeolocation(None),
            Duration::from_secs(5),
        );
        h.app.navigate(Route::results("CBC", "Boston"));
        h.app.render();

        let token = h.app.view_token();
        let (result, _) = tokio::join!(h.app.load_results(), async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            token.cancel();
        });
        assert!(result.unwrap_err().is_cancelled());

        // The page is still loading; a retry on the same page works
        h.app.load_results().await.unwrap();
        let View::Results(view) = h.app.render() else {
            panic!("expected results");
        };
        assert_eq!(view.labs.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_book_only_toasts() {
        let mut h = signed_in();
        h.app.navigate(Route::results("CBC", "Boston"));
        h.app.render();
        h.app.load_results().await.unwrap();

        h.app.book("b").unwrap();
        let toast = &h.app.drain_toasts()[0];
        assert!(toast.description.contains("Lab b"));
        assert!(h.app.book("zzz").unwrap_err().is_not_found());
    }
}
