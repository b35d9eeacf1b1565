//! Bar, pie, stacked-bar and box charts over labelled categories.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::{Axis, BarTrace, BoxTrace, ChartSpec, Layout, PieTrace, Trace};
use crate::core::api::Metric;
use crate::core::format;
use crate::core::{DashboardError, Result};
use crate::stats::{extremes, summarize_categories, Labelled, ObservationSummary};

/// `labels[]` / `values[]` pairs (industry analysis, attack types).
#[derive(Debug, Clone, Deserialize)]
pub struct LabelledValues {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl LabelledValues {
    fn checked(&self, what: &str) -> Result<()> {
        if self.labels.len() != self.values.len() {
            return Err(DashboardError::data(format!(
                "{what}: {} labels but {} values",
                self.labels.len(),
                self.values.len()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub spec: ChartSpec,
    pub metric: Metric,
    pub top: Option<Labelled<String>>,
}

/// Horizontal industry bars for the selected metric.
pub fn industry_bars(dataset: &LabelledValues, metric: Metric) -> Result<BarChart> {
    dataset.checked("industry analysis")?;

    let text = dataset
        .values
        .iter()
        .map(|value| match metric {
            Metric::Count => format::format_count(*value),
            Metric::Loss => format::format_millions(*value),
        })
        .collect();

    let trace = Trace::Bar(BarTrace {
        x: dataset.values.iter().map(|v| Value::from(*v)).collect(),
        y: dataset.labels.iter().map(|l| Value::from(l.as_str())).collect(),
        name: None,
        orientation: Some("h"),
        text,
    });

    let title = match metric {
        Metric::Count => "Attacks by industry",
        Metric::Loss => "Financial loss by industry",
    };
    let mut layout = Layout::titled(title);
    layout.xaxis = Some(Axis::titled(metric.axis_title()));
    layout.yaxis = Some(Axis {
        title: "Industry".to_string(),
        categoryorder: Some("total ascending"),
        ..Axis::default()
    });

    let top = extremes(
        dataset
            .labels
            .iter()
            .cloned()
            .zip(dataset.values.iter().copied()),
    )
    .map(|found| found.max);

    Ok(BarChart {
        spec: ChartSpec::new(vec![trace], layout),
        metric,
        top,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub spec: ChartSpec,
    /// `(label, fraction of total)` in input order.
    pub shares: Vec<(String, f64)>,
}

pub fn attack_type_pie(dataset: &LabelledValues) -> Result<PieChart> {
    dataset.checked("attack types")?;
    if let Some(bad) = dataset.values.iter().find(|v| **v < 0.0) {
        return Err(DashboardError::data(format!(
            "attack types: negative count {bad}"
        )));
    }

    let total: f64 = dataset.values.iter().sum();
    let shares = dataset
        .labels
        .iter()
        .zip(&dataset.values)
        .map(|(label, value)| {
            let share = if total > 0.0 { value / total } else { 0.0 };
            (label.clone(), share)
        })
        .collect();

    let trace = Trace::Pie(PieTrace {
        labels: dataset.labels.clone(),
        values: dataset.values.clone(),
        hole: 0.3,
        textinfo: "label+percent",
    });

    Ok(PieChart {
        spec: ChartSpec::new(vec![trace], Layout::titled("Share of attack types")),
        shares,
    })
}

/// `/api/severity_by_type`: one series per vulnerability type.
#[derive(Debug, Clone, Deserialize)]
pub struct SeverityDataset {
    pub vuln_types: Vec<String>,
    pub series: BTreeMap<String, SeverityColumn>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeverityColumn {
    pub attack_types: Vec<String>,
    pub counts: Vec<f64>,
}

pub fn severity_stacked(dataset: &SeverityDataset) -> Result<ChartSpec> {
    let data = dataset
        .vuln_types
        .iter()
        .map(|vuln| {
            let column = dataset.series.get(vuln).ok_or_else(|| {
                DashboardError::data(format!("severity: no series for `{vuln}`"))
            })?;
            if column.attack_types.len() != column.counts.len() {
                return Err(DashboardError::data(format!(
                    "severity `{vuln}`: {} attack types but {} counts",
                    column.attack_types.len(),
                    column.counts.len()
                )));
            }
            Ok(Trace::Bar(BarTrace {
                x: column
                    .attack_types
                    .iter()
                    .map(|a| Value::from(a.as_str()))
                    .collect(),
                y: column.counts.iter().map(|c| Value::from(*c)).collect(),
                name: Some(vuln.clone()),
                orientation: None,
                text: Vec::new(),
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut layout = Layout::titled("Security vulnerabilities by attack type")
        .with_axes("Attack type", "Incidents");
    layout.barmode = Some("stack");
    Ok(ChartSpec::new(data, layout))
}

/// `/api/defense_resolution`: resolution hours per defense method.
#[derive(Debug, Clone, Deserialize)]
pub struct DefenseDataset {
    pub defense_methods: Vec<String>,
    pub resolution_data: BTreeMap<String, Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxChart {
    pub spec: ChartSpec,
    /// Summary rows for methods with observations, in method order.
    pub statistics: Vec<(String, ObservationSummary)>,
}

pub fn defense_boxes(dataset: &DefenseDataset) -> Result<BoxChart> {
    let empty: Vec<f64> = Vec::new();
    let observations: Vec<(&str, &[f64])> = dataset
        .defense_methods
        .iter()
        .map(|method| {
            let hours = dataset.resolution_data.get(method).unwrap_or(&empty);
            (method.as_str(), hours.as_slice())
        })
        .collect();

    let statistics = summarize_categories(observations.iter().copied());
    let data = observations
        .iter()
        .filter(|(_, hours)| !hours.is_empty())
        .map(|(method, hours)| {
            Trace::Box(BoxTrace {
                y: hours.to_vec(),
                name: method.to_string(),
                boxpoints: "outliers",
            })
        })
        .collect();

    let layout = Layout::titled("Resolution time by defense method")
        .with_axes("Defense method", "Resolution time (hours)");

    Ok(BoxChart {
        spec: ChartSpec::new(data, layout),
        statistics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn industries() -> LabelledValues {
        LabelledValues {
            labels: vec!["Banking".into(), "Retail".into(), "Health".into()],
            values: vec![1200.0, 3400.0, 3400.0],
        }
    }

    #[test]
    fn industry_bars_label_values_per_metric() {
        let chart = industry_bars(&industries(), Metric::Count).unwrap();
        let Trace::Bar(bar) = &chart.spec.data[0] else {
            panic!("expected bar");
        };
        assert_eq!(bar.orientation, Some("h"));
        assert_eq!(bar.text[0], "1,200");
        assert_eq!(chart.top.unwrap().label, "Retail");

        let chart = industry_bars(&industries(), Metric::Loss).unwrap();
        let Trace::Bar(bar) = &chart.spec.data[0] else {
            panic!("expected bar");
        };
        assert_eq!(bar.text[1], "$3,400.0M");
    }

    #[test]
    fn pie_shares_sum_to_one() {
        let chart = attack_type_pie(&industries()).unwrap();
        let total: f64 = chart.shares.iter().map(|(_, share)| share).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stacked_bars_follow_vuln_order() {
        let dataset: SeverityDataset = serde_json::from_value(json!({
            "vuln_types": ["Zero-day", "Weak Passwords"],
            "series": {
                "Weak Passwords": { "attack_types": ["Phishing"], "counts": [4] },
                "Zero-day": { "attack_types": ["Phishing", "DDoS"], "counts": [2, 7] },
            },
        }))
        .unwrap();
        let spec = severity_stacked(&dataset).unwrap();
        assert_eq!(spec.layout.barmode, Some("stack"));
        let names: Vec<_> = spec
            .data
            .iter()
            .map(|trace| match trace {
                Trace::Bar(bar) => bar.name.clone().unwrap(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["Zero-day", "Weak Passwords"]);
    }

    #[test]
    fn missing_severity_series_is_a_data_error() {
        let dataset = SeverityDataset {
            vuln_types: vec!["Unpatched Software".into()],
            series: BTreeMap::new(),
        };
        assert!(severity_stacked(&dataset).is_err());
    }

    #[test]
    fn defense_boxes_skip_empty_methods() {
        let dataset: DefenseDataset = serde_json::from_value(json!({
            "defense_methods": ["Firewall", "VPN", "AI-based Detection"],
            "resolution_data": {
                "Firewall": [10, 20, 30],
                "VPN": [],
                "AI-based Detection": [5],
            },
        }))
        .unwrap();
        let chart = defense_boxes(&dataset).unwrap();
        assert_eq!(chart.spec.data.len(), 2);
        let methods: Vec<_> = chart.statistics.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(methods, vec!["Firewall", "AI-based Detection"]);
        assert_eq!(chart.statistics[0].1.mean, 20.0);
    }
}
