use super::guarded_load;
use crate::notify::Notifier;
use crate::service::Backend;
use crate::session::Session;
use crate::types::{ChartData, ChartSeries, InsightMetric};
use std::sync::Arc;
use tracing::info;

pub struct DashboardPage {
    backend: Arc<dyn Backend>,
    pub is_loading: bool,
    pub metrics: Vec<InsightMetric>,
    pub category_distribution: Vec<ChartData>,
    pub insight_trend: Vec<ChartData>,
}

impl DashboardPage {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            is_loading: true,
            metrics: Vec::new(),
            category_distribution: Vec::new(),
            insight_trend: Vec::new(),
        }
    }

    pub fn heading(session: &Session) -> String {
        match session.active_profile() {
            Some(p) => format!("{} Dashboard", p.name),
            None => "Dashboard".into(),
        }
    }

    pub async fn load(&mut self, notifier: &mut Notifier) -> bool {
        let backend = Arc::clone(&self.backend);
        let batch = guarded_load(&mut self.is_loading, notifier, "dashboard data", async {
            tokio::try_join!(
                backend.fetch_metrics(),
                backend.fetch_chart_data(ChartSeries::CategoryDistribution.key()),
                backend.fetch_chart_data(ChartSeries::InsightTrend.key()),
            )
        })
        .await;

        let Some((metrics, category, trend)) = batch else {
            return false;
        };
        self.metrics = metrics;
        self.category_distribution = category;
        self.insight_trend = trend;
        info!(metrics = self.metrics.len(), "dashboard loaded");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::{FlakyBackend, mock};
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn fetches_run_concurrently() {
        let mut page = DashboardPage::new(mock());
        let mut n = Notifier::new();
        let start = Instant::now();
        assert!(page.load(&mut n).await);
        // three 1000ms calls joined, not chained
        assert!(start.elapsed() < Duration::from_millis(2000));
        assert_eq!(page.metrics.len(), 4);
        assert_eq!(page.insight_trend[4], ChartData::new("May", 78.0));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_toasts_and_keeps_state() {
        let mut page = DashboardPage::new(Arc::new(FlakyBackend::new(&["insightTrend"])));
        let mut n = Notifier::new();
        assert!(!page.load(&mut n).await);
        assert!(!page.is_loading);
        assert!(page.metrics.is_empty());
        assert_eq!(n.errors().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn heading_uses_active_profile() {
        let mut s = Session::new(Duration::ZERO);
        assert_eq!(DashboardPage::heading(&s), "Dashboard");
        s.login("a@b.c", "pw").await;
        assert_eq!(DashboardPage::heading(&s), "TechCorp Inc. Dashboard");
    }
}
