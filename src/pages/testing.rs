//! Backend doubles for page tests.

use crate::config::LatencyConfig;
use crate::error::{Error, Result};
use crate::service::Backend;
use crate::service::mock::MockBackend;
use crate::types::{
    ChartData, DataSource, InsightMetric, NewProduct, OrganizationSettings, Product, UserSettings,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub fn mock() -> Arc<dyn Backend> {
    Arc::new(MockBackend::new(LatencyConfig::default(), Some(7)))
}

/// Delegates to a seeded [`MockBackend`] but rejects the endpoints named in
/// `failing` while `armed` is set.
pub struct FlakyBackend {
    inner: MockBackend,
    failing: Vec<&'static str>,
    armed: AtomicBool,
}

impl FlakyBackend {
    pub fn new(failing: &[&'static str]) -> Self {
        Self {
            inner: MockBackend::new(LatencyConfig::default(), Some(7)),
            failing: failing.to_vec(),
            armed: AtomicBool::new(true),
        }
    }

    pub fn healthy(failing: &[&'static str]) -> Self {
        let b = Self::new(failing);
        b.armed.store(false, Ordering::SeqCst);
        b
    }

    pub fn arm(&self, on: bool) {
        self.armed.store(on, Ordering::SeqCst);
    }

    fn check(&self, endpoint: &str) -> Result<()> {
        if self.armed.load(Ordering::SeqCst) && self.failing.iter().any(|f| *f == endpoint) {
            return Err(Error::fetch(format!("{endpoint} unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for FlakyBackend {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.check("products")?;
        self.inner.fetch_products().await
    }

    async fn add_new_product(&self, product: NewProduct) -> Result<Product> {
        self.check("add_product")?;
        self.inner.add_new_product(product).await
    }

    async fn fetch_metrics(&self) -> Result<Vec<InsightMetric>> {
        self.check("metrics")?;
        self.inner.fetch_metrics().await
    }

    async fn fetch_chart_data(&self, key: &str) -> Result<Vec<ChartData>> {
        let data = self.inner.fetch_chart_data(key).await?;
        self.check(key)?;
        Ok(data)
    }

    async fn fetch_data_sources(&self) -> Result<Vec<DataSource>> {
        self.check("data_sources")?;
        self.inner.fetch_data_sources().await
    }

    async fn send_chat_message(&self, message: &str) -> Result<String> {
        self.check("chat")?;
        self.inner.send_chat_message(message).await
    }

    async fn update_user_settings(&self, settings: &UserSettings) -> Result<bool> {
        self.check("user_settings")?;
        self.inner.update_user_settings(settings).await
    }

    async fn update_organization_settings(
        &self,
        settings: &OrganizationSettings,
    ) -> Result<bool> {
        self.check("organization_settings")?;
        self.inner.update_organization_settings(settings).await
    }
}
