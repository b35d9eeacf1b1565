//! Yearly attack counts and losses, for one scope or several countries side by side.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Axis, ChartSpec, Layout, ScatterTrace, Trace};
use crate::core::{DashboardError, Result};
use crate::stats::{mean, Trend};

/// `/api/time_series` answers with one of two shapes depending on the query.
/// A `"mode": "compare"` field selects the multi-country shape.
#[derive(Debug, Clone)]
pub enum TimeSeriesPayload {
    Compare { series: Vec<CountrySeries> },
    Single(SingleSeries),
}

#[derive(Deserialize)]
struct CompareEnvelope {
    series: Vec<CountrySeries>,
}

impl TimeSeriesPayload {
    pub fn from_value(payload: Value) -> Result<Self> {
        let compare = payload.get("mode").and_then(Value::as_str) == Some("compare");
        let decoded = if compare {
            serde_json::from_value::<CompareEnvelope>(payload)
                .map(|envelope| TimeSeriesPayload::Compare { series: envelope.series })
        } else {
            serde_json::from_value::<SingleSeries>(payload).map(TimeSeriesPayload::Single)
        };
        decoded.map_err(|err| {
            let shape = if compare { "compare" } else { "single" };
            DashboardError::data(format!("{shape} time series payload: {err}"))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleSeries {
    pub years: Vec<f64>,
    pub counts: Vec<f64>,
    pub losses: Vec<f64>,
    #[serde(default = "all_countries")]
    pub country: String,
}

fn all_countries() -> String {
    "all".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountrySeries {
    pub country: String,
    pub years: Vec<f64>,
    pub counts: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub country: String,
    pub total: f64,
    pub average: f64,
    pub total_loss: f64,
    /// `None` when the first year is zero and no percentage exists.
    pub trend: Option<Trend>,
    pub loss_trend: Option<Trend>,
}

impl SeriesSummary {
    pub fn is_global(&self) -> bool {
        self.country == "all"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimeSeriesChart {
    Single {
        spec: ChartSpec,
        summary: SeriesSummary,
    },
    Compare {
        spec: ChartSpec,
        countries: Vec<String>,
    },
}

impl TimeSeriesChart {
    pub fn spec(&self) -> &ChartSpec {
        match self {
            TimeSeriesChart::Single { spec, .. } | TimeSeriesChart::Compare { spec, .. } => spec,
        }
    }
}

fn optional_trend(values: &[f64], what: &str, country: &str) -> Option<Trend> {
    match Trend::of_series(values) {
        Ok(trend) => Some(trend),
        Err(err) => {
            tracing::warn!(country, series = what, %err, "trend not shown");
            None
        }
    }
}

pub fn summarize(series: &SingleSeries) -> SeriesSummary {
    SeriesSummary {
        country: series.country.clone(),
        total: series.counts.iter().sum(),
        average: mean(&series.counts),
        total_loss: series.losses.iter().sum(),
        trend: optional_trend(&series.counts, "counts", &series.country),
        loss_trend: optional_trend(&series.losses, "losses", &series.country),
    }
}

pub fn transform_single(series: &SingleSeries, period_label: &str) -> Result<TimeSeriesChart> {
    let n = series.years.len();
    if series.counts.len() != n || series.losses.len() != n {
        return Err(DashboardError::data(format!(
            "time series columns differ in length (years {n}, counts {}, losses {})",
            series.counts.len(),
            series.losses.len()
        )));
    }

    let counts = Trace::Scatter(ScatterTrace {
        x: series.years.clone(),
        y: series.counts.clone(),
        name: "Attacks".to_string(),
        mode: "lines+markers",
        yaxis: Some("y"),
    });
    let losses = Trace::Scatter(ScatterTrace {
        x: series.years.clone(),
        y: series.losses.clone(),
        name: "Financial loss (million $)".to_string(),
        mode: "lines+markers",
        yaxis: Some("y2"),
    });

    let title = if series.country == "all" {
        format!("{period_label} yearly attacks and financial loss")
    } else {
        format!("{} - {period_label} yearly attacks and financial loss", series.country)
    };
    let mut layout = Layout::titled(title).with_axes("Year", "Attack count");
    layout.yaxis2 = Some(Axis {
        title: "Financial loss (million $)".to_string(),
        overlaying: Some("y"),
        side: Some("right"),
        ..Axis::default()
    });
    layout.hovermode = Some("x unified");

    Ok(TimeSeriesChart::Single {
        spec: ChartSpec::new(vec![counts, losses], layout),
        summary: summarize(series),
    })
}

pub fn transform_compare(series: &[CountrySeries], period_label: &str) -> Result<TimeSeriesChart> {
    let data = series
        .iter()
        .map(|entry| {
            if entry.years.len() != entry.counts.len() {
                return Err(DashboardError::data(format!(
                    "{}: {} years but {} counts",
                    entry.country,
                    entry.years.len(),
                    entry.counts.len()
                )));
            }
            Ok(Trace::Scatter(ScatterTrace {
                x: entry.years.clone(),
                y: entry.counts.clone(),
                name: entry.country.clone(),
                mode: "lines+markers",
                yaxis: None,
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut layout = Layout::titled(format!(
        "Yearly attacks in {} countries ({period_label})",
        series.len()
    ))
    .with_axes("Year", "Attack count");
    layout.hovermode = Some("x unified");

    Ok(TimeSeriesChart::Compare {
        spec: ChartSpec::new(data, layout),
        countries: series.iter().map(|entry| entry.country.clone()).collect(),
    })
}

pub fn transform(payload: &TimeSeriesPayload, period_label: &str) -> Result<TimeSeriesChart> {
    match payload {
        TimeSeriesPayload::Single(series) => transform_single(series, period_label),
        TimeSeriesPayload::Compare { series } => transform_compare(series, period_label),
    }
}
