//! Response validation. Payloads are checked as raw JSON before any typed decode
//! so that a `null` hiding in a numeric column is reported by name instead of
//! turning into a NaN colour scale or a garbled percentage further down.

use serde_json::Value;

use super::api::Endpoint;
use super::error::{DashboardError, Result};

/// One step of a path into a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Key(&'static str),
    /// Every element of an array, or every value of an object.
    Each,
}

use Step::{Each, Key};

type NumericPath = &'static [Step];

const HEATMAP: &[NumericPath] = &[&[Key("heatmap_data"), Each, Each]];
const TREEMAP: &[NumericPath] = &[&[Key("values"), Each]];
const SANKEY: &[NumericPath] = &[
    &[Key("sources"), Each],
    &[Key("targets"), Each],
    &[Key("values"), Each],
];
const MAP_DATA: &[NumericPath] = &[
    &[Key("years"), Each],
    &[Key("data_by_year"), Each, Key("losses"), Each],
    &[Key("statistics"), Key("total_loss")],
    &[Key("statistics"), Key("avg_loss_per_country")],
    &[Key("statistics"), Key("max_loss_value")],
];
const TIME_SERIES_SINGLE: &[NumericPath] = &[
    &[Key("years"), Each],
    &[Key("counts"), Each],
    &[Key("losses"), Each],
];
const TIME_SERIES_COMPARE: &[NumericPath] = &[
    &[Key("series"), Each, Key("years"), Each],
    &[Key("series"), Each, Key("counts"), Each],
];
const LABELLED_VALUES: &[NumericPath] = &[&[Key("values"), Each]];
const STATISTICS: &[NumericPath] = &[
    &[Key("total_attacks")],
    &[Key("unique_countries")],
    &[Key("attack_types")],
];
const SEVERITY: &[NumericPath] = &[&[Key("series"), Each, Key("counts"), Each]];
const DEFENSE: &[NumericPath] = &[&[Key("resolution_data"), Each, Each]];

/// Numeric fields that must be present and hold real numbers for `endpoint`.
fn required_numeric_paths(endpoint: &Endpoint, payload: &Value) -> &'static [NumericPath] {
    match endpoint {
        Endpoint::Heatmap => HEATMAP,
        Endpoint::Treemap => TREEMAP,
        Endpoint::Sankey => SANKEY,
        Endpoint::MapData => MAP_DATA,
        Endpoint::TimeSeries(_) => {
            if payload.get("mode").and_then(Value::as_str) == Some("compare") {
                TIME_SERIES_COMPARE
            } else {
                TIME_SERIES_SINGLE
            }
        }
        Endpoint::IndustryAnalysis(_) | Endpoint::AttackTypes => LABELLED_VALUES,
        Endpoint::Countries => &[],
        Endpoint::Statistics => STATISTICS,
        Endpoint::SeverityByType => SEVERITY,
        Endpoint::DefenseResolution => DEFENSE,
    }
}

/// Parse and validate a response body for `endpoint`.
pub fn validate_body(endpoint: &Endpoint, body: &str) -> Result<Value> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|err| DashboardError::data(format!("response is not valid JSON ({err})")))?;
    validate_payload(endpoint, &payload)?;
    Ok(payload)
}

/// Check an already parsed payload: explicit error marker first, then the
/// required numeric fields.
pub fn validate_payload(endpoint: &Endpoint, payload: &Value) -> Result<()> {
    check_error_marker(payload)?;
    for path in required_numeric_paths(endpoint, payload) {
        check_numeric(payload, path, String::new())?;
    }
    Ok(())
}

/// Fails with `Payload` when the response carries a non-null `error` field.
pub fn check_error_marker(payload: &Value) -> Result<()> {
    match payload.get("error") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(message)) => Err(DashboardError::Payload(message.clone())),
        Some(other) => Err(DashboardError::Payload(other.to_string())),
    }
}

fn check_numeric(node: &Value, path: &[Step], trail: String) -> Result<()> {
    let Some((step, rest)) = path.split_first() else {
        return match node {
            Value::Number(_) => Ok(()),
            Value::Null => Err(DashboardError::data(format!("`{trail}` is null"))),
            other => Err(DashboardError::data(format!(
                "`{trail}` should be a number, found {}",
                kind_of(other)
            ))),
        };
    };

    match (step, node) {
        (Key(key), Value::Object(map)) => {
            let child_trail = if trail.is_empty() {
                (*key).to_string()
            } else {
                format!("{trail}.{key}")
            };
            match map.get(*key) {
                Some(child) => check_numeric(child, rest, child_trail),
                None => Err(DashboardError::data(format!(
                    "missing required field `{child_trail}`"
                ))),
            }
        }
        (Each, Value::Array(items)) => items
            .iter()
            .enumerate()
            .try_for_each(|(idx, item)| check_numeric(item, rest, format!("{trail}[{idx}]"))),
        (Each, Value::Object(map)) => map
            .iter()
            .try_for_each(|(key, item)| check_numeric(item, rest, format!("{trail}.{key}"))),
        (_, Value::Null) => Err(DashboardError::data(format!("`{trail}` is null"))),
        (_, other) => Err(DashboardError::data(format!(
            "`{trail}` should be a collection, found {}",
            kind_of(other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::{Metric, TimeSeriesQuery};
    use serde_json::json;

    #[test]
    fn explicit_error_field_is_a_payload_error() {
        let payload = json!({ "error": "'Country' column missing" });
        let err = validate_payload(&Endpoint::Heatmap, &payload).unwrap_err();
        assert_eq!(err, DashboardError::Payload("'Country' column missing".into()));
    }

    #[test]
    fn null_error_field_is_ignored() {
        let payload = json!({ "error": null, "labels": ["a"], "values": [1] });
        assert!(validate_payload(&Endpoint::AttackTypes, &payload).is_ok());
    }

    #[test]
    fn null_inside_values_is_reported_by_position() {
        let payload = json!({
            "labels": ["All", "A"],
            "parents": ["", "All"],
            "values": [4, null],
        });
        let err = validate_payload(&Endpoint::Treemap, &payload).unwrap_err();
        assert_eq!(err, DashboardError::Data("`values[1]` is null".into()));
    }

    #[test]
    fn nested_matrix_cells_are_checked() {
        let payload = json!({
            "industries": ["Banking"],
            "attack_types": ["Phishing", "DDoS"],
            "heatmap_data": [[1.5, "n/a"]],
        });
        let err = validate_payload(&Endpoint::Heatmap, &payload).unwrap_err();
        assert!(err.to_string().contains("heatmap_data[0][1]"));
    }

    #[test]
    fn missing_required_field_is_a_data_error() {
        let payload = json!({ "nodes": [], "node_colors": [], "sources": [], "targets": [] });
        let err = validate_payload(&Endpoint::Sankey, &payload).unwrap_err();
        assert_eq!(err, DashboardError::Data("missing required field `values`".into()));
    }

    #[test]
    fn map_losses_are_checked_under_every_year() {
        let payload = json!({
            "years": [2020, 2021],
            "data_by_year": {
                "2020": { "countries": ["France"], "losses": [10.0] },
                "2021": { "countries": ["France"], "losses": [null] },
            },
            "statistics": {
                "total_loss": 10.0,
                "avg_loss_per_country": 10.0,
                "max_loss_country": "France",
                "max_loss_value": 10.0,
            },
        });
        let err = validate_payload(&Endpoint::MapData, &payload).unwrap_err();
        assert!(err.to_string().contains("data_by_year.2021.losses[0]"));
    }

    #[test]
    fn time_series_paths_follow_the_payload_mode() {
        let compare = json!({
            "mode": "compare",
            "series": [
                { "country": "France", "years": [2020], "counts": [3] },
                { "country": "Japan", "years": [2020], "counts": [null] },
            ],
        });
        let endpoint = Endpoint::TimeSeries(TimeSeriesQuery::All);
        let err = validate_payload(&endpoint, &compare).unwrap_err();
        assert!(err.to_string().contains("series[1].counts[0]"));
    }

    #[test]
    fn bare_nan_in_body_is_rejected_as_data() {
        let endpoint = Endpoint::IndustryAnalysis(Metric::Loss);
        let err = validate_body(&endpoint, r#"{"labels":["a"],"values":[NaN]}"#).unwrap_err();
        assert!(matches!(err, DashboardError::Data(_)));
    }
}
