//! Backend endpoints and the HTTP client that fetches them.
//!
//! Every fetch goes through [`ApiClient::fetch`]: transport, then
//! [`validate_body`](super::validate::validate_body), then a typed decode. A
//! caller never sees a payload that skipped validation.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::config::DashboardConfig;
use super::error::{DashboardError, Result};
use super::validate::validate_body;

/// Which measure the industry bar chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Count,
    Loss,
}

impl Metric {
    pub fn as_query(&self) -> &'static str {
        match self {
            Metric::Count => "count",
            Metric::Loss => "loss",
        }
    }

    pub fn axis_title(&self) -> &'static str {
        match self {
            Metric::Count => "Attack count",
            Metric::Loss => "Financial loss (million $)",
        }
    }
}

/// Filter carried by a time-series request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSeriesQuery {
    All,
    Country(String),
    Compare(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Heatmap,
    Treemap,
    Sankey,
    MapData,
    TimeSeries(TimeSeriesQuery),
    IndustryAnalysis(Metric),
    AttackTypes,
    Countries,
    Statistics,
    SeverityByType,
    DefenseResolution,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Heatmap => "/api/heatmap",
            Endpoint::Treemap => "/api/treemap",
            Endpoint::Sankey => "/api/sankey",
            Endpoint::MapData => "/api/map_data",
            Endpoint::TimeSeries(_) => "/api/time_series",
            Endpoint::IndustryAnalysis(_) => "/api/industry_analysis",
            Endpoint::AttackTypes => "/api/attack_types",
            Endpoint::Countries => "/api/countries",
            Endpoint::Statistics => "/api/statistics",
            Endpoint::SeverityByType => "/api/severity_by_type",
            Endpoint::DefenseResolution => "/api/defense_resolution",
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::TimeSeries(TimeSeriesQuery::All) => Vec::new(),
            Endpoint::TimeSeries(TimeSeriesQuery::Country(country)) => {
                vec![("country", country.clone())]
            }
            Endpoint::TimeSeries(TimeSeriesQuery::Compare(countries)) => vec![
                ("countries", countries.join(",")),
                ("mode", "compare".to_string()),
            ],
            Endpoint::IndustryAnalysis(metric) => vec![("type", metric.as_query().to_string())],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.query();
        if query.is_empty() {
            return f.write_str(self.path());
        }
        let joined = query
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        write!(f, "{}?{joined}", self.path())
    }
}

/// `/api/statistics`: dataset-wide headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub total_attacks: u64,
    pub unique_countries: u64,
    pub attack_types: u64,
    pub date_range: String,
    pub most_common_attack: String,
    /// Most targeted industry; the backend keeps the legacy field name.
    pub most_targeted_port: String,
}

/// `/api/countries`: names accepted by the time-series filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryList {
    pub countries: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.api_base.clone())
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base, endpoint.path())
    }

    /// GET `endpoint`, validate the body and decode it into `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        tracing::debug!(%endpoint, "fetching");
        let response = self
            .http
            .get(self.url_for(endpoint))
            .query(&endpoint.query())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Error responses (HTTP 500 with an `error` field) still carry a
        // message worth surfacing verbatim.
        let payload = match validate_body(endpoint, &body) {
            Ok(payload) => payload,
            Err(err @ DashboardError::Payload(_)) => return Err(err),
            Err(_) if !status.is_success() => {
                return Err(DashboardError::fetch(format!("{endpoint} returned {status}")))
            }
            Err(err) => return Err(err),
        };

        if !status.is_success() {
            return Err(DashboardError::fetch(format!("{endpoint} returned {status}")));
        }

        serde_json::from_value(payload)
            .map_err(|err| DashboardError::data(format!("{endpoint}: {err}")))
    }
}
