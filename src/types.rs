use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An organization the signed-in user works within.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub industry: String,
    pub products_count: u32,
    pub insights: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub status: ProductStatus,
    pub insights: u32,
    /// `YYYY-MM-DD`
    pub last_updated: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Pending,
    Archived,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Pending => write!(f, "pending"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

impl ProductStatus {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Active => "bg-green-100 text-green-800",
            Self::Pending => "bg-yellow-100 text-yellow-800",
            Self::Archived => "bg-gray-100 text-gray-800",
        }
    }
}

/// Fields the caller supplies when adding a product; the backend fills in the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub status: ProductStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightMetric {
    pub title: String,
    pub value: MetricValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    pub description: String,
}

impl InsightMetric {
    /// Signed percentage label, e.g. `+12%` or `-1.2%`.
    pub fn change_label(&self) -> Option<String> {
        self.change.map(|c| {
            if c > 0.0 {
                format!("+{c}%")
            } else {
                format!("{c}%")
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Up => "text-green-500",
            Self::Down => "text-red-500",
            Self::Neutral => "text-muted-foreground",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub name: String,
    pub value: f64,
}

impl ChartData {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Named series the backend knows how to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSeries {
    CategoryDistribution,
    InsightTrend,
    ProductPerformance,
}

impl ChartSeries {
    pub const ALL: [ChartSeries; 3] = [
        Self::CategoryDistribution,
        Self::InsightTrend,
        Self::ProductPerformance,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::CategoryDistribution => "categoryDistribution",
            Self::InsightTrend => "insightTrend",
            Self::ProductPerformance => "productPerformance",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub id: String,
    pub name: String,
    pub connected: bool,
    #[serde(rename = "type")]
    pub kind: DataSourceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    Analytics,
    Crm,
    Sales,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub name: String,
    pub email: String,
    pub notifications: bool,
    pub weekly_reports: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_preferences: Option<DataPreferences>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPreferences {
    /// Days.
    pub retention_period: u32,
    pub auto_backup: bool,
    pub data_sharing: bool,
}

impl Default for DataPreferences {
    fn default() -> Self {
        Self {
            retention_period: 90,
            auto_backup: true,
            data_sharing: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}
