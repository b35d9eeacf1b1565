//! End-to-end runs of validate → decode → transform over backend-shaped bodies.

use serde_json::json;

use ui::core::api::{Endpoint, Metric, TimeSeriesQuery};
use ui::core::validate::validate_body;
use ui::core::DashboardError;
use ui::pipeline::{decode, PanelOutput};
use ui::state::{InteractionController, Panel};

fn run(endpoint: &Endpoint, body: serde_json::Value) -> Result<PanelOutput, DashboardError> {
    let payload = validate_body(endpoint, &body.to_string())?;
    decode(endpoint, payload, "2015-2024")
}

#[test]
fn treemap_with_null_value_never_reaches_the_transformer() {
    let err = run(
        &Endpoint::Treemap,
        json!({
            "labels": ["All", "Banking"],
            "parents": ["", "All"],
            "values": [0, null],
        }),
    )
    .unwrap_err();
    assert!(matches!(err, DashboardError::Data(_)), "{err:?}");
}

#[test]
fn treemap_aggregates_subtrees() {
    let output = run(
        &Endpoint::Treemap,
        json!({
            "labels": ["All", "A", "B", "A1", "A2"],
            "parents": ["", "All", "All", "A", "A"],
            "values": [0, 0, 0, 3, 7],
        }),
    )
    .unwrap();
    let PanelOutput::Treemap(chart) = output else {
        panic!("expected treemap");
    };
    let aggregates: Vec<f64> = chart.nodes.iter().map(|node| node.aggregate).collect();
    assert_eq!(aggregates, vec![10.0, 10.0, 0.0, 3.0, 7.0]);
}

#[test]
fn express_shaped_treemap_keeps_parent_totals() {
    let output = run(
        &Endpoint::Treemap,
        json!({
            "ids": ["Banking", "Retail", "Banking/Phishing", "Banking/DDoS", "Retail/Phishing"],
            "labels": ["Banking", "Retail", "Phishing", "DDoS", "Phishing"],
            "parents": ["", "", "Banking", "Banking", "Retail"],
            "values": [10, 5, 6, 4, 5],
        }),
    )
    .unwrap();
    let PanelOutput::Treemap(chart) = output else {
        panic!("expected treemap");
    };
    let aggregates: Vec<f64> = chart.nodes.iter().map(|node| node.aggregate).collect();
    assert_eq!(aggregates, vec![10.0, 5.0, 6.0, 4.0, 5.0]);
    let figure = serde_json::to_value(&chart.spec).unwrap();
    assert_eq!(figure["data"][0]["values"], json!([10.0, 5.0, 6.0, 4.0, 5.0]));
}

#[test]
fn backend_error_field_surfaces_verbatim() {
    let err = run(
        &Endpoint::Heatmap,
        json!({ "error": "KeyError: 'Financial Loss (in Million $)'" }),
    )
    .unwrap_err();
    assert_eq!(
        err,
        DashboardError::Payload("KeyError: 'Financial Loss (in Million $)'".into())
    );
}

#[test]
fn nan_in_body_is_a_data_error() {
    let endpoint = Endpoint::AttackTypes;
    let err = validate_body(&endpoint, r#"{"labels": ["DDoS"], "values": [NaN]}"#).unwrap_err();
    assert!(matches!(err, DashboardError::Data(_)));
}

#[test]
fn map_frames_share_one_colour_domain() {
    let output = run(
        &Endpoint::MapData,
        json!({
            "years": [2020, 2021],
            "data_by_year": {
                "2020": { "countries": ["France", "Japan"], "losses": [10.0, 50.0] },
                "2021": { "countries": ["France", "Japan"], "losses": [5.0, 100.0] },
            },
            "statistics": {
                "total_loss": 165.0,
                "avg_loss_per_country": 82.5,
                "max_loss_country": "Japan",
                "max_loss_value": 150.0,
            },
        }),
    )
    .unwrap();
    let PanelOutput::Map(chart) = output else {
        panic!("expected map");
    };
    assert_eq!((chart.domain.min, chart.domain.max), (5.0, 100.0));

    let spec = serde_json::to_value(&chart.spec).unwrap();
    for frame in spec["frames"].as_array().unwrap() {
        assert_eq!(frame["data"][0]["zmin"], json!(5.0));
        assert_eq!(frame["data"][0]["zmax"], json!(100.0));
    }
    assert_eq!(spec["layout"]["sliders"][0]["steps"].as_array().unwrap().len(), 2);
}

#[test]
fn controller_requests_drive_the_matching_transformer() {
    let mut controller = InteractionController::new();
    let request = controller
        .set_compare_set(["France", "Japan"])
        .unwrap();
    assert_eq!(request.panel, Panel::TimeSeries);
    assert_eq!(
        request.endpoint,
        Endpoint::TimeSeries(TimeSeriesQuery::Compare(vec![
            "France".into(),
            "Japan".into()
        ]))
    );

    let output = run(
        &request.endpoint,
        json!({
            "mode": "compare",
            "series": [
                { "country": "France", "years": [2020, 2021], "counts": [3, 4] },
                { "country": "Japan", "years": [2020, 2021], "counts": [5, 1] },
            ],
        }),
    )
    .unwrap();
    assert!(matches!(output, PanelOutput::TimeSeries(_)));

    let metric = controller.set_metric(Metric::Loss);
    assert_eq!(metric.panel, Panel::Industry);
    assert!(controller.is_current(&request.ticket));
}

#[test]
fn defense_summary_skips_methods_without_observations() {
    let output = run(
        &Endpoint::DefenseResolution,
        json!({
            "defense_methods": ["Firewall", "VPN"],
            "resolution_data": { "Firewall": [12, 24, 36], "VPN": [] },
        }),
    )
    .unwrap();
    let PanelOutput::Defense(chart) = output else {
        panic!("expected defense output");
    };
    assert_eq!(chart.statistics.len(), 1);
    let (method, row) = &chart.statistics[0];
    assert_eq!(method, "Firewall");
    assert_eq!(row.median, 24.0);
    assert_eq!(row.std, 12.0);
}
