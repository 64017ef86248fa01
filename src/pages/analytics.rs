use super::guarded_fetch;
use crate::notify::Notifier;
use crate::service::Backend;
use crate::types::{ChartData, ChartSeries, InsightMetric, Product};
use std::sync::Arc;
use tracing::info;

pub const TOP_PRODUCTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "Last 7 days",
            Self::Month => "Last 30 days",
            Self::Quarter => "Last quarter",
            Self::Year => "Last year",
        }
    }
}

/// Products ordered by insight count, highest first, truncated to `n`.
pub fn top_by_insights(mut products: Vec<Product>, n: usize) -> Vec<Product> {
    products.sort_by(|a, b| b.insights.cmp(&a.insights));
    products.truncate(n);
    products
}

pub struct AnalyticsPage {
    backend: Arc<dyn Backend>,
    pub is_loading: bool,
    pub time_range: TimeRange,
    pub metrics: Vec<InsightMetric>,
    pub category_distribution: Vec<ChartData>,
    pub insight_trend: Vec<ChartData>,
    pub product_performance: Vec<ChartData>,
    pub top_products: Vec<Product>,
}

impl AnalyticsPage {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            is_loading: true,
            time_range: TimeRange::default(),
            metrics: Vec::new(),
            category_distribution: Vec::new(),
            insight_trend: Vec::new(),
            product_performance: Vec::new(),
            top_products: Vec::new(),
        }
    }

    pub fn set_time_range(&mut self, range: TimeRange) {
        self.time_range = range;
    }

    /// Pulls every panel at once. Either all panels update or none do.
    pub async fn load(&mut self, notifier: &mut Notifier) -> bool {
        self.pull(notifier, "Failed to load analytics data").await
    }

    pub async fn refresh(&mut self, notifier: &mut Notifier) -> bool {
        notifier.success("Refreshing data", "Fetching the latest analytics data");
        let ok = self.pull(notifier, "Failed to refresh analytics data").await;
        if ok {
            notifier.success("Data refreshed", "Analytics data has been updated");
        }
        ok
    }

    async fn pull(&mut self, notifier: &mut Notifier, failure: &str) -> bool {
        let backend = Arc::clone(&self.backend);
        let batch = guarded_fetch(&mut self.is_loading, notifier, failure, async {
            tokio::try_join!(
                backend.fetch_metrics(),
                backend.fetch_chart_data(ChartSeries::CategoryDistribution.key()),
                backend.fetch_chart_data(ChartSeries::InsightTrend.key()),
                backend.fetch_chart_data(ChartSeries::ProductPerformance.key()),
                backend.fetch_products(),
            )
        })
        .await;

        let Some((metrics, category, trend, performance, products)) = batch else {
            return false;
        };

        self.metrics = metrics;
        self.category_distribution = category;
        self.insight_trend = trend;
        self.product_performance = performance;
        self.top_products = top_by_insights(products, TOP_PRODUCTS);
        info!(
            metrics = self.metrics.len(),
            top = self.top_products.len(),
            "analytics loaded"
        );
        true
    }
}
