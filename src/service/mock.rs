use super::Backend;
use crate::config::{Config, LatencyConfig};
use crate::error::{Error, Result};
use crate::store::{random_id, today};
use crate::types::{
    ChartData, ChartSeries, DataSource, DataSourceKind, InsightMetric, MetricValue, NewProduct,
    OrganizationSettings, Product, ProductStatus, Trend, UserSettings,
};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

pub const CHAT_RESPONSES: [&str; 5] = [
    "Based on your product data, I suggest focusing on improving mobile app user retention. Recent insights show a 15% drop-off after the first week.",
    "Looking at your market analysis, there's an opportunity to expand into the healthcare vertical. Three of your competitors have recently launched products in this space.",
    "Your customer feedback indicates a strong desire for integration with major CRM platforms. This could be a quick win for your product roadmap.",
    "The latest market trends show increased demand for AI-powered analytics features. Your current offering could be enhanced with predictive analysis capabilities.",
    "Comparing your product performance against benchmarks, your onboarding flow shows higher friction than industry standards. Consider simplifying the first-time user experience.",
];

/// In-process backend: canned payloads after a simulated network delay.
pub struct MockBackend {
    latency: LatencyConfig,
    rng: Mutex<StdRng>,
}

impl MockBackend {
    pub fn new(latency: LatencyConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            latency,
            rng: Mutex::new(rng),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.latency.clone(), cfg.mock.seed)
    }

    async fn delay(&self, ms: u64) {
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| Error::fetch("mock rng lock poisoned"))?;
        Ok(f(&mut rng))
    }
}

fn product(
    id: &str,
    name: &str,
    category: &str,
    status: ProductStatus,
    insights: u32,
    last_updated: &str,
) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        category: category.into(),
        status,
        insights,
        last_updated: last_updated.into(),
    }
}

fn catalog() -> Vec<Product> {
    use ProductStatus::*;
    vec![
        product("1", "Analytics Dashboard", "Software", Active, 24, "2025-02-15"),
        product("2", "Mobile App", "Software", Active, 18, "2025-02-10"),
        product("3", "Cloud Storage", "Service", Pending, 7, "2025-02-05"),
        product("4", "Marketing Platform", "Software", Active, 32, "2025-01-28"),
        product("5", "Smart Speaker", "Hardware", Archived, 15, "2024-12-12"),
    ]
}

fn metric(
    title: &str,
    value: MetricValue,
    change: f64,
    trend: Trend,
    description: &str,
) -> InsightMetric {
    InsightMetric {
        title: title.into(),
        value,
        change: Some(change),
        trend: Some(trend),
        description: description.into(),
    }
}

fn metrics() -> Vec<InsightMetric> {
    vec![
        metric(
            "Total Products",
            MetricValue::Number(15.0),
            2.0,
            Trend::Up,
            "Total number of products in your portfolio",
        ),
        metric(
            "Active Insights",
            MetricValue::Number(87.0),
            12.0,
            Trend::Up,
            "Current active insights across all products",
        ),
        metric(
            "Market Growth",
            MetricValue::Text("12.4%".into()),
            -1.2,
            Trend::Down,
            "Year-over-year market growth rate",
        ),
        metric(
            "Customer Satisfaction",
            MetricValue::Number(94.0),
            3.0,
            Trend::Up,
            "Average customer satisfaction score",
        ),
    ]
}

fn series(series: ChartSeries) -> Vec<ChartData> {
    let points: &[(&str, f64)] = match series {
        ChartSeries::CategoryDistribution => {
            &[("Software", 65.0), ("Hardware", 15.0), ("Service", 20.0)]
        }
        ChartSeries::InsightTrend => &[
            ("Jan", 42.0),
            ("Feb", 56.0),
            ("Mar", 48.0),
            ("Apr", 63.0),
            ("May", 78.0),
        ],
        ChartSeries::ProductPerformance => &[
            ("Analytics Dashboard", 78.0),
            ("Mobile App", 65.0),
            ("Cloud Storage", 54.0),
            ("Marketing Platform", 82.0),
            ("Smart Speaker", 43.0),
        ],
    };
    points
        .iter()
        .map(|&(name, value)| ChartData::new(name, value))
        .collect()
}

fn data_sources() -> Vec<DataSource> {
    let source = |id: &str, name: &str, connected, kind| DataSource {
        id: id.into(),
        name: name.into(),
        connected,
        kind,
    };
    vec![
        source("1", "Google Analytics", true, DataSourceKind::Analytics),
        source("2", "Salesforce", true, DataSourceKind::Crm),
        source("3", "Shopify", false, DataSourceKind::Sales),
        source("4", "Custom API", true, DataSourceKind::Custom),
    ]
}

#[async_trait]
impl Backend for MockBackend {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.delay(self.latency.products_ms).await;
        Ok(catalog())
    }

    async fn add_new_product(&self, new: NewProduct) -> Result<Product> {
        self.delay(self.latency.add_product_ms).await;
        let id = self.with_rng(|rng| random_id(rng))?;
        debug!(%id, name = %new.name, "mock product created");
        Ok(Product {
            id,
            name: new.name,
            category: new.category,
            status: new.status,
            insights: 0,
            last_updated: today(),
        })
    }

    async fn fetch_metrics(&self) -> Result<Vec<InsightMetric>> {
        self.delay(self.latency.metrics_ms).await;
        Ok(metrics())
    }

    async fn fetch_chart_data(&self, key: &str) -> Result<Vec<ChartData>> {
        self.delay(self.latency.chart_ms).await;
        match ChartSeries::from_key(key) {
            Some(s) => Ok(series(s)),
            None => {
                debug!(key, "unknown chart series");
                Ok(Vec::new())
            }
        }
    }

    async fn fetch_data_sources(&self) -> Result<Vec<DataSource>> {
        self.delay(self.latency.data_sources_ms).await;
        Ok(data_sources())
    }

    async fn send_chat_message(&self, message: &str) -> Result<String> {
        self.delay(self.latency.chat_ms).await;
        let idx = self.with_rng(|rng| rng.gen_range(0..CHAT_RESPONSES.len()))?;
        debug!(len = message.len(), idx, "assistant reply selected");
        Ok(CHAT_RESPONSES[idx].to_string())
    }

    async fn update_user_settings(&self, settings: &UserSettings) -> Result<bool> {
        self.delay(self.latency.settings_ms).await;
        debug!(?settings, "user settings updated");
        Ok(true)
    }

    async fn update_organization_settings(
        &self,
        settings: &OrganizationSettings,
    ) -> Result<bool> {
        self.delay(self.latency.settings_ms).await;
        debug!(?settings, "organization settings updated");
        Ok(true)
    }
}
