//! Application shell: owns the session and the notification queue, hands the
//! backend to pages, and routes every navigation through the session guard.

use crate::config::Config;
use crate::notify::Notifier;
use crate::service::Backend;
use crate::service::mock::MockBackend;
use crate::session::{Route, Session};
use std::sync::Arc;
use tracing::debug;

pub struct App {
    pub backend: Arc<dyn Backend>,
    pub session: Session,
    pub notifier: Notifier,
    route: Route,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, session: Session) -> Self {
        Self {
            backend,
            session,
            notifier: Notifier::new(),
            route: Route::Entry,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            Arc::new(MockBackend::from_config(cfg)),
            Session::new(cfg.latency.auth()),
        )
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Navigates to `path`, applying redirects. Returns where we ended up.
    pub fn navigate(&mut self, path: &str) -> Route {
        self.go(Route::parse(path))
    }

    pub fn go(&mut self, requested: Route) -> Route {
        let landed = self.session.resolve_route(requested);
        if landed != requested {
            debug!(from = %requested.path(), to = %landed.path(), "redirected");
        }
        self.route = landed;
        landed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyConfig;
    use crate::pages::onboarding::OnboardingWizard;
    use crate::pages::products::ProductsPage;
    use crate::session::SessionState;
    use crate::types::{NewProduct, ProductStatus};

    fn app() -> App {
        let cfg = Config {
            latency: LatencyConfig::instant(),
            ..Default::default()
        };
        App::from_config(&cfg)
    }

    #[tokio::test]
    async fn navigation_obeys_guards() {
        let mut app = app();
        assert_eq!(app.navigate("/analytics"), Route::Entry);

        app.session.login("a@b.c", "pw").await;
        assert_eq!(app.navigate("/analytics"), Route::Onboarding(1));
        assert_eq!(app.navigate("/onboarding/step-2"), Route::Onboarding(2));

        app.session.complete_onboarding();
        assert_eq!(app.navigate("/analytics"), Route::Analytics);
        assert_eq!(app.route(), Route::Analytics);

        app.session.logout();
        assert_eq!(app.navigate("/settings"), Route::Entry);
        assert_eq!(app.navigate("/missing"), Route::NotFound);
    }

    #[tokio::test]
    async fn registered_account_walks_through_onboarding() {
        let mut app = app();
        app.session.register("new@b.c", "pw", "New Account").await;
        assert_eq!(app.session.state(), SessionState::NotOnboarded);
        assert!(app.session.active_profile().is_none());

        let mut wizard = OnboardingWizard::seeded(5);
        wizard.enter(app.navigate("/dashboard"));
        assert_eq!(wizard.title(), "Company Details");
        wizard.next(&mut app.session);
        assert_eq!(wizard.previous(), Route::Onboarding(1));

        let mut next = Route::Onboarding(1);
        while let Route::Onboarding(_) = next {
            next = wizard.next(&mut app.session);
        }
        assert_eq!(app.go(next), Route::Dashboard);
        assert_eq!(app.session.state(), SessionState::Onboarded);

        let mut products = ProductsPage::new(app.backend.clone());
        assert!(products.load(&mut app.notifier).await);
        let widget = NewProduct {
            name: "Widget".into(),
            category: "Hardware".into(),
            status: ProductStatus::Active,
        };
        let added = products.add(widget, &mut app.notifier).await.unwrap();
        assert!(products.delete(&added.id).is_some());
        assert_eq!(products.products().len(), 5);

        let toast = app.notifier.active()[0].id;
        assert!(app.notifier.dismiss(toast));
        assert_eq!(app.notifier.errors().count(), 0);

        app.session.logout();
        assert_eq!(app.session.state(), SessionState::LoggedOut);
        assert_eq!(app.navigate("/products"), Route::Entry);
    }
}
