//! Process-wide session: who is signed in, which profile is active, and
//! whether onboarding has been completed. Nothing survives the process.

use crate::types::{Profile, User};
use std::time::Duration;
use tracing::{info, warn};

pub const DEMO_USER_NAME: &str = "Demo User";

pub fn demo_profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: "1".into(),
            name: "TechCorp Inc.".into(),
            logo: "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?fit=crop&w=40&h=40"
                .into(),
            industry: "Technology".into(),
            products_count: 12,
            insights: 243,
        },
        Profile {
            id: "2".into(),
            name: "Innovate Solutions".into(),
            logo: "https://images.unsplash.com/photo-1605810230434-7631ac76ec81?fit=crop&w=40&h=40"
                .into(),
            industry: "Consulting".into(),
            products_count: 5,
            insights: 118,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    NotOnboarded,
    Onboarded,
}

#[derive(Debug)]
pub struct Session {
    auth_delay: Duration,
    is_authenticated: bool,
    user: Option<User>,
    active_profile: Option<Profile>,
    profiles: Vec<Profile>,
    is_onboarded: bool,
}

impl Session {
    pub fn new(auth_delay: Duration) -> Self {
        Self::with_profiles(auth_delay, demo_profiles())
    }

    pub fn with_profiles(auth_delay: Duration, profiles: Vec<Profile>) -> Self {
        Self {
            auth_delay,
            is_authenticated: false,
            user: None,
            active_profile: None,
            profiles,
            is_onboarded: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_onboarded(&self) -> bool {
        self.is_onboarded
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.active_profile.as_ref()
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn state(&self) -> SessionState {
        match (self.is_authenticated, self.is_onboarded) {
            (false, _) => SessionState::LoggedOut,
            (true, false) => SessionState::NotOnboarded,
            (true, true) => SessionState::Onboarded,
        }
    }

    /// Signs in without checking credentials and selects the first profile.
    pub async fn login(&mut self, email: &str, _password: &str) {
        tokio::time::sleep(self.auth_delay).await;
        self.is_authenticated = true;
        self.user = Some(User {
            name: DEMO_USER_NAME.into(),
            email: email.into(),
        });
        self.active_profile = self.profiles.first().cloned();
        info!(email, profile = ?self.active_profile.as_ref().map(|p| &p.name), "logged in");
    }

    /// Creates an account. No profile is selected and onboarding is still pending.
    pub async fn register(&mut self, email: &str, _password: &str, name: &str) {
        tokio::time::sleep(self.auth_delay).await;
        self.is_authenticated = true;
        self.user = Some(User {
            name: name.into(),
            email: email.into(),
        });
        info!(email, name, "registered");
    }

    pub fn logout(&mut self) {
        self.is_authenticated = false;
        self.user = None;
        self.active_profile = None;
        self.is_onboarded = false;
        info!("logged out");
    }

    /// Replaces the active profile. Membership in [`Session::profiles`] is not checked.
    pub fn set_active_profile(&mut self, profile: Profile) {
        info!(id = %profile.id, name = %profile.name, "active profile switched");
        self.active_profile = Some(profile);
    }

    /// Marks onboarding done. Only meaningful while signed in; returns
    /// whether the flag was set.
    pub fn complete_onboarding(&mut self) -> bool {
        if !self.is_authenticated {
            warn!("complete_onboarding ignored: not authenticated");
            return false;
        }
        self.is_onboarded = true;
        info!("onboarding completed");
        true
    }

    /// Where a request for `route` actually lands given the current state.
    pub fn resolve_route(&self, route: Route) -> Route {
        match route {
            Route::Entry if self.is_authenticated => {
                if self.is_onboarded {
                    Route::Dashboard
                } else {
                    Route::Onboarding(1)
                }
            }
            Route::Entry | Route::NotFound => route,
            _ if !self.is_authenticated => Route::Entry,
            Route::Onboarding(_) => route,
            _ if !self.is_onboarded => Route::Onboarding(1),
            _ => route,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Entry,
    Onboarding(u8),
    Dashboard,
    Products,
    Innovation,
    Analytics,
    Settings,
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        match path {
            "" => Self::Entry,
            "/dashboard" => Self::Dashboard,
            "/products" => Self::Products,
            "/innovation" => Self::Innovation,
            "/analytics" => Self::Analytics,
            "/settings" => Self::Settings,
            other => other
                .strip_prefix("/onboarding/step-")
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=crate::pages::onboarding::STEP_COUNT).contains(n))
                .map(Self::Onboarding)
                .unwrap_or(Self::NotFound),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Entry => "/".into(),
            Self::Onboarding(n) => format!("/onboarding/step-{n}"),
            Self::Dashboard => "/dashboard".into(),
            Self::Products => "/products".into(),
            Self::Innovation => "/innovation".into(),
            Self::Analytics => "/analytics".into(),
            Self::Settings => "/settings".into(),
            Self::NotFound => "/404".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn session() -> Session {
        Session::new(Duration::from_millis(1000))
    }

    #[tokio::test(start_paused = true)]
    async fn login_selects_first_profile() {
        let mut s = session();
        let start = Instant::now();
        s.login("ceo@techcorp.io", "hunter2").await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert!(s.is_authenticated());
        assert_eq!(s.active_profile(), Some(&demo_profiles()[0]));
        let user = s.user().unwrap();
        assert_eq!(user.name, DEMO_USER_NAME);
        assert_eq!(user.email, "ceo@techcorp.io");
        assert_eq!(s.state(), SessionState::NotOnboarded);
    }

    #[tokio::test(start_paused = true)]
    async fn login_accepts_any_credentials() {
        for (email, pw) in [("", ""), ("x", "y"), ("a@b.c", "correct horse")] {
            let mut s = session();
            s.login(email, pw).await;
            assert!(s.is_authenticated());
            assert_eq!(s.active_profile().unwrap().id, "1");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn register_leaves_profile_and_onboarding_unset() {
        let mut s = session();
        s.register("new@co.io", "pw", "Ada").await;
        assert!(s.is_authenticated());
        assert_eq!(s.user().unwrap().name, "Ada");
        assert!(s.active_profile().is_none());
        assert!(!s.is_onboarded());
    }

    #[tokio::test(start_paused = true)]
    async fn onboarding_does_not_survive_logout() {
        let mut s = session();
        s.login("a@b.c", "pw").await;
        assert!(s.complete_onboarding());
        assert_eq!(s.state(), SessionState::Onboarded);
        s.logout();
        assert!(!s.is_onboarded());
        assert!(s.user().is_none());
        assert!(s.active_profile().is_none());
        assert_eq!(s.state(), SessionState::LoggedOut);
    }

    #[test]
    fn complete_onboarding_requires_login() {
        let mut s = session();
        assert!(!s.complete_onboarding());
        assert!(!s.is_onboarded());
    }

    #[tokio::test(start_paused = true)]
    async fn set_active_profile_skips_membership_check() {
        let mut s = session();
        s.login("a@b.c", "pw").await;
        let mut outsider = demo_profiles()[1].clone();
        outsider.id = "99".into();
        s.set_active_profile(outsider.clone());
        assert_eq!(s.active_profile(), Some(&outsider));
        assert_eq!(s.profiles().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn guards_follow_session_state() {
        let mut s = session();
        assert_eq!(s.resolve_route(Route::Dashboard), Route::Entry);
        assert_eq!(s.resolve_route(Route::Onboarding(2)), Route::Entry);
        assert_eq!(s.resolve_route(Route::Entry), Route::Entry);
        assert_eq!(s.resolve_route(Route::NotFound), Route::NotFound);

        s.register("a@b.c", "pw", "A").await;
        for r in [
            Route::Dashboard,
            Route::Products,
            Route::Innovation,
            Route::Analytics,
            Route::Settings,
        ] {
            assert_eq!(s.resolve_route(r), Route::Onboarding(1));
        }
        assert_eq!(s.resolve_route(Route::Onboarding(3)), Route::Onboarding(3));
        assert_eq!(s.resolve_route(Route::Entry), Route::Onboarding(1));

        s.complete_onboarding();
        assert_eq!(s.resolve_route(Route::Analytics), Route::Analytics);
        assert_eq!(s.resolve_route(Route::Entry), Route::Dashboard);
    }

    #[test]
    fn route_paths_parse_back() {
        for r in [
            Route::Entry,
            Route::Onboarding(1),
            Route::Onboarding(4),
            Route::Dashboard,
            Route::Products,
            Route::Innovation,
            Route::Analytics,
            Route::Settings,
        ] {
            assert_eq!(Route::parse(&r.path()), r);
        }
        assert_eq!(Route::parse("/onboarding/step-5"), Route::NotFound);
        assert_eq!(Route::parse("/nowhere"), Route::NotFound);
    }
}
