//! Animated world map of financial losses per country and year.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::animation::{self, ColorDomain, YearSnapshot};
use super::{ChartSpec, Layout};
use crate::core::{DashboardError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct MapDataset {
    pub years: Vec<f64>,
    pub data_by_year: BTreeMap<String, YearLosses>,
    pub statistics: MapStatistics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YearLosses {
    pub countries: Vec<String>,
    pub losses: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStatistics {
    pub total_loss: f64,
    pub avg_loss_per_country: f64,
    pub max_loss_country: String,
    pub max_loss_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapChart {
    pub spec: ChartSpec,
    pub domain: ColorDomain,
    pub statistics: MapStatistics,
    pub years: Vec<String>,
}

/// `2020` and `2020.0` both key the year `"2020"`.
pub fn year_key(year: f64) -> String {
    if year.fract() == 0.0 {
        format!("{year:.0}")
    } else {
        year.to_string()
    }
}

/// Ordered year snapshots, each checked for length and duplicate countries.
pub fn snapshots(dataset: &MapDataset) -> Result<Vec<YearSnapshot>> {
    dataset
        .years
        .iter()
        .map(|year| {
            let key = year_key(*year);
            let slice = dataset
                .data_by_year
                .get(&key)
                .ok_or_else(|| DashboardError::data(format!("no map data for year {key}")))?;
            YearSnapshot::new(key, slice.countries.clone(), slice.losses.clone())
        })
        .collect()
}

pub fn transform(dataset: &MapDataset, period_label: &str) -> Result<MapChart> {
    let years = snapshots(dataset)?;
    let animation = animation::build(&years)?;

    let mut layout = Layout::titled(format!(
        "Global financial loss from cyber attacks<br>{period_label}"
    ));
    layout.sliders = vec![animation.slider];
    layout.updatemenus = vec![animation.playback];

    Ok(MapChart {
        spec: ChartSpec {
            data: vec![animation.initial],
            layout,
            frames: animation.frames,
        },
        domain: animation.domain,
        statistics: dataset.statistics.clone(),
        years: years.into_iter().map(|year| year.label).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::Trace;
    use serde_json::json;

    fn dataset(value: serde_json::Value) -> MapDataset {
        serde_json::from_value(value).unwrap()
    }

    fn statistics() -> serde_json::Value {
        json!({
            "total_loss": 165.0,
            "avg_loss_per_country": 41.25,
            "max_loss_country": "Japan",
            "max_loss_value": 100.0,
        })
    }

    #[test]
    fn frames_share_the_global_domain() {
        let ds = dataset(json!({
            "years": [2020, 2021],
            "data_by_year": {
                "2020": { "countries": ["France", "Japan"], "losses": [10.0, 50.0] },
                "2021": { "countries": ["France", "Japan"], "losses": [5.0, 100.0] },
            },
            "statistics": statistics(),
        }));
        let chart = transform(&ds, "2020-2021").unwrap();
        assert_eq!(chart.domain, ColorDomain { min: 5.0, max: 100.0 });
        assert_eq!(chart.years, vec!["2020", "2021"]);
        assert_eq!(chart.spec.frames.len(), 2);
        for frame in &chart.spec.frames {
            let Trace::Choropleth(trace) = &frame.data[0] else {
                panic!("frame is not a choropleth");
            };
            assert_eq!((trace.zmin, trace.zmax), (5.0, 100.0));
        }
        assert_eq!(chart.spec.layout.sliders[0].steps.len(), 2);
    }

    #[test]
    fn float_years_match_string_keys() {
        let ds = dataset(json!({
            "years": [2019.0],
            "data_by_year": { "2019": { "countries": ["Peru"], "losses": [3.5] } },
            "statistics": statistics(),
        }));
        assert!(transform(&ds, "2019").is_ok());
    }

    #[test]
    fn missing_year_is_a_data_error() {
        let ds = dataset(json!({
            "years": [2020, 2022],
            "data_by_year": { "2020": { "countries": ["Peru"], "losses": [3.5] } },
            "statistics": statistics(),
        }));
        let err = transform(&ds, "").unwrap_err();
        assert_eq!(err, DashboardError::Data("no map data for year 2022".into()));
    }
}
