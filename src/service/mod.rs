//! Backend boundary. Everything the pages fetch goes through [`Backend`];
//! [`mock::MockBackend`] is the only implementation shipped.

pub mod mock;

use crate::error::Result;
use crate::types::{
    ChartData, DataSource, InsightMetric, NewProduct, OrganizationSettings, Product, UserSettings,
};
use async_trait::async_trait;

#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;

    /// Looks the product up in the full listing; there is no per-id endpoint.
    async fn fetch_product_by_id(&self, id: &str) -> Result<Option<Product>> {
        let products = self.fetch_products().await?;
        Ok(products.into_iter().find(|p| p.id == id))
    }

    /// Returns the created product. Nothing is stored server-side; callers
    /// insert the result into their own list.
    async fn add_new_product(&self, product: NewProduct) -> Result<Product>;

    async fn fetch_metrics(&self) -> Result<Vec<InsightMetric>>;

    /// Unknown keys yield an empty series.
    async fn fetch_chart_data(&self, key: &str) -> Result<Vec<ChartData>>;

    async fn fetch_data_sources(&self) -> Result<Vec<DataSource>>;

    async fn send_chat_message(&self, message: &str) -> Result<String>;

    async fn update_user_settings(&self, settings: &UserSettings) -> Result<bool>;

    async fn update_organization_settings(&self, settings: &OrganizationSettings)
    -> Result<bool>;
}
