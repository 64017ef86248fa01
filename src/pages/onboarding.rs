//! Four-step setup wizard that gates first access to the main pages.
//!
//! Each step keeps its form state here. Nothing is sent to the backend; the
//! state lives as long as the wizard does.

use crate::session::{Route, Session};
use crate::store::{InMemoryRepository, Repository, random_id, today, toggle_connection};
use crate::types::{DataSource, DataSourceKind, Product, ProductStatus};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

pub const STEP_COUNT: u8 = 4;
pub const STEP_TITLES: [&str; STEP_COUNT as usize] =
    ["Company Details", "Products", "Data Sources", "Preferences"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDetails {
    pub name: String,
    pub industry: String,
    pub size: String,
    pub description: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub notifications: bool,
    pub weekly_reports: bool,
    pub automated_insights: bool,
    pub insight_priority: String,
    pub analytics_view: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            weekly_reports: true,
            automated_insights: true,
            insight_priority: "balanced".into(),
            analytics_view: "detailed".into(),
        }
    }
}

fn starter_products() -> Vec<Product> {
    vec![Product {
        id: "1".into(),
        name: "Analytics Dashboard".into(),
        category: "Software".into(),
        status: ProductStatus::Active,
        insights: 0,
        last_updated: today(),
    }]
}

fn starter_sources() -> Vec<DataSource> {
    [
        ("1", "Google Analytics", DataSourceKind::Analytics),
        ("2", "Salesforce", DataSourceKind::Crm),
        ("3", "Shopify", DataSourceKind::Sales),
        ("4", "Custom API", DataSourceKind::Custom),
    ]
    .into_iter()
    .map(|(id, name, kind)| DataSource {
        id: id.into(),
        name: name.into(),
        connected: false,
        kind,
    })
    .collect()
}

pub struct OnboardingWizard {
    step: u8,
    rng: StdRng,
    pub company: CompanyDetails,
    pub products: InMemoryRepository<Product>,
    pub data_sources: InMemoryRepository<DataSource>,
    pub preferences: Preferences,
}

impl OnboardingWizard {
    pub fn new(rng: StdRng) -> Self {
        Self {
            step: 1,
            rng,
            company: CompanyDetails::default(),
            products: InMemoryRepository::new(starter_products()),
            data_sources: InMemoryRepository::new(starter_sources()),
            preferences: Preferences::default(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn title(&self) -> &'static str {
        STEP_TITLES[usize::from(self.step - 1)]
    }

    pub fn is_last_step(&self) -> bool {
        self.step == STEP_COUNT
    }

    /// Syncs the wizard to the step the router landed on.
    pub fn enter(&mut self, route: Route) {
        match route {
            Route::Onboarding(n) if (1..=STEP_COUNT).contains(&n) => self.step = n,
            _ => {}
        }
    }

    /// Advances one step. Past the last step onboarding is completed on the
    /// session and the dashboard is returned.
    pub fn next(&mut self, session: &mut Session) -> Route {
        if self.step < STEP_COUNT {
            self.step += 1;
            debug!(step = self.step, "onboarding step");
            return Route::Onboarding(self.step);
        }
        session.complete_onboarding();
        info!(
            company = %self.company.name,
            products = self.products.len(),
            connected = self.data_sources.all().iter().filter(|d| d.connected).count(),
            "onboarding finished"
        );
        Route::Dashboard
    }

    pub fn previous(&mut self) -> Route {
        if self.step > 1 {
            self.step -= 1;
        }
        Route::Onboarding(self.step)
    }

    /// Step 2. Name and category are both required; returns the new id.
    pub fn add_product(&mut self, name: &str, category: &str) -> Option<String> {
        if name.is_empty() || category.is_empty() {
            return None;
        }
        let product = Product {
            id: random_id(&mut self.rng),
            name: name.into(),
            category: category.into(),
            status: ProductStatus::Active,
            insights: 0,
            last_updated: today(),
        };
        let id = product.id.clone();
        self.products.add(product).then_some(id)
    }

    pub fn delete_product(&mut self, id: &str) -> bool {
        self.products.remove(id).is_some()
    }

    /// Step 3. Returns the new connected flag.
    pub fn toggle_source(&mut self, id: &str) -> Option<bool> {
        toggle_connection(&mut self.data_sources, id)
    }

    /// Step 3. A custom API starts out connected; name and URL are required.
    pub fn add_custom_source(&mut self, name: &str, url: &str) -> Option<String> {
        if name.is_empty() || url.is_empty() {
            return None;
        }
        let source = DataSource {
            id: random_id(&mut self.rng),
            name: name.into(),
            connected: true,
            kind: DataSourceKind::Custom,
        };
        let id = source.id.clone();
        debug!(%id, name, url, "custom data source added");
        self.data_sources.add(source).then_some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn step_two_add_and_delete() {
        let mut w = OnboardingWizard::seeded(11);
        assert_eq!(w.products.len(), 1);
        let id = w.add_product("Widget", "Hardware").unwrap();
        assert_eq!(w.products.len(), 2);
        let added = w.products.get(&id).unwrap();
        assert_eq!(added.status, ProductStatus::Active);
        assert_eq!(added.insights, 0);
        assert_eq!(added.last_updated, today());
        assert_eq!(added.category, "Hardware");

        assert!(w.delete_product(&id));
        assert_eq!(w.products.len(), 1);
        assert_eq!(w.products.all()[0].name, "Analytics Dashboard");
    }

    #[test]
    fn step_two_requires_name_and_category() {
        let mut w = OnboardingWizard::seeded(11);
        assert!(w.add_product("", "Hardware").is_none());
        assert!(w.add_product("Widget", "").is_none());
        assert_eq!(w.products.len(), 1);
    }

    #[test]
    fn step_three_toggle_round_trip() {
        let mut w = OnboardingWizard::seeded(11);
        assert!(w.data_sources.all().iter().all(|d| !d.connected));
        assert_eq!(w.toggle_source("3"), Some(true));
        assert_eq!(w.toggle_source("3"), Some(false));
        assert!(!w.data_sources.get("3").unwrap().connected);
    }

    #[test]
    fn custom_source_starts_connected() {
        let mut w = OnboardingWizard::seeded(11);
        assert!(w.add_custom_source("Warehouse", "").is_none());
        let id = w.add_custom_source("Warehouse", "https://dw.internal/api").unwrap();
        let ds = w.data_sources.get(&id).unwrap();
        assert!(ds.connected);
        assert_eq!(ds.kind, DataSourceKind::Custom);
        assert_eq!(w.data_sources.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn walking_all_steps_completes_onboarding() {
        let mut s = Session::new(Duration::ZERO);
        s.register("a@b.c", "pw", "A").await;
        let mut w = OnboardingWizard::seeded(1);
        assert_eq!(w.title(), "Company Details");
        assert_eq!(w.previous(), Route::Onboarding(1));
        assert_eq!(w.next(&mut s), Route::Onboarding(2));
        assert_eq!(w.next(&mut s), Route::Onboarding(3));
        assert_eq!(w.previous(), Route::Onboarding(2));
        assert_eq!(w.next(&mut s), Route::Onboarding(3));
        assert_eq!(w.next(&mut s), Route::Onboarding(4));
        assert!(w.is_last_step());
        assert!(!s.is_onboarded());
        assert_eq!(w.next(&mut s), Route::Dashboard);
        assert!(s.is_onboarded());
    }

    #[test]
    fn enter_follows_router() {
        let mut w = OnboardingWizard::seeded(1);
        w.enter(Route::Onboarding(3));
        assert_eq!(w.step(), 3);
        assert_eq!(w.title(), "Data Sources");
        w.enter(Route::Dashboard);
        assert_eq!(w.step(), 3);
    }
}
