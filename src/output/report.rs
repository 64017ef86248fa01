use crate::error::{Error, Result};
use crate::pages::analytics::AnalyticsPage;
use crate::types::{ChartData, InsightMetric, Product, Profile};
use askama::Template;
use chrono::Utc;
use std::path::Path;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub generated_at: String,
    pub profile_name: String,
    pub time_range: String,
    pub metrics: Vec<MetricView>,
    pub charts: Vec<ChartView>,
    pub top_products: Vec<ProductView>,
}

pub struct MetricView {
    pub title: String,
    pub value: String,
    pub change: String,
    pub trend_class: String,
    pub description: String,
}

pub struct ChartView {
    pub title: String,
    pub bars: Vec<BarView>,
}

pub struct BarView {
    pub label: String,
    pub value: String,
    /// Width relative to the largest point in the series, 0-100.
    pub pct: u32,
}

pub struct ProductView {
    pub name: String,
    pub category: String,
    pub status: String,
    pub status_class: String,
    pub insights: u32,
}

fn metric_view(m: &InsightMetric) -> MetricView {
    MetricView {
        title: m.title.clone(),
        value: m.value.to_string(),
        change: m.change_label().unwrap_or_default(),
        trend_class: m
            .trend
            .map(|t| t.css_class().to_string())
            .unwrap_or_default(),
        description: m.description.clone(),
    }
}

fn chart_view(title: &str, data: &[ChartData]) -> ChartView {
    let max = data.iter().map(|d| d.value).fold(0.0_f64, f64::max);
    let bars = data
        .iter()
        .map(|d| BarView {
            label: d.name.clone(),
            value: format!("{}", d.value),
            pct: if max > 0.0 {
                (d.value / max * 100.0).round() as u32
            } else {
                0
            },
        })
        .collect();
    ChartView {
        title: title.into(),
        bars,
    }
}

fn product_view(p: &Product) -> ProductView {
    ProductView {
        name: p.name.clone(),
        category: p.category.clone(),
        status: p.status.to_string(),
        status_class: p.status.css_class().to_string(),
        insights: p.insights,
    }
}

/// Renders a loaded analytics page as a standalone HTML snapshot.
pub fn render(page: &AnalyticsPage, profile: Option<&Profile>) -> Result<String> {
    let template = DashboardTemplate {
        generated_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        profile_name: profile.map(|p| p.name.clone()).unwrap_or_default(),
        time_range: page.time_range.label().to_string(),
        metrics: page.metrics.iter().map(metric_view).collect(),
        charts: vec![
            chart_view("Insight Growth Trend", &page.insight_trend),
            chart_view("Product Category Distribution", &page.category_distribution),
            chart_view("Product Performance", &page.product_performance),
        ],
        top_products: page.top_products.iter().map(product_view).collect(),
    };

    template
        .render()
        .map_err(|e| Error::Template(e.to_string()))
}

pub fn write_report(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}
