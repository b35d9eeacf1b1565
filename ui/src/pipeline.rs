//! Fetch → validate → decode → transform, one panel at a time.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::charts::categorical::{
    self, BarChart, BoxChart, DefenseDataset, LabelledValues, PieChart, SeverityDataset,
};
use crate::charts::choropleth::{self, MapChart, MapDataset};
use crate::charts::flow::{self, FlowChart, FlowDataset};
use crate::charts::hierarchy::{self, HierarchyChart, HierarchyDataset};
use crate::charts::matrix::{self, MatrixChart, MatrixDataset};
use crate::charts::timeseries::{self, TimeSeriesChart, TimeSeriesPayload};
use crate::charts::ChartSpec;
use crate::core::api::{ApiClient, CountryList, Endpoint, StatisticsSnapshot};
use crate::core::config;
use crate::core::Result;
use crate::state::LoadRequest;

/// Everything a panel can display after a successful load.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelOutput {
    Heatmap(MatrixChart),
    Treemap(HierarchyChart),
    Sankey(FlowChart),
    Map(MapChart),
    TimeSeries(TimeSeriesChart),
    Industry(BarChart),
    AttackTypes(PieChart),
    Severity(ChartSpec),
    Defense(BoxChart),
    Statistics(StatisticsSnapshot),
    Countries(CountryList),
}

impl PanelOutput {
    /// The chart to hand to the renderer, if this output has one.
    pub fn spec(&self) -> Option<&ChartSpec> {
        match self {
            PanelOutput::Heatmap(chart) => Some(&chart.spec),
            PanelOutput::Treemap(chart) => Some(&chart.spec),
            PanelOutput::Sankey(chart) => Some(&chart.spec),
            PanelOutput::Map(chart) => Some(&chart.spec),
            PanelOutput::TimeSeries(chart) => Some(chart.spec()),
            PanelOutput::Industry(chart) => Some(&chart.spec),
            PanelOutput::AttackTypes(chart) => Some(&chart.spec),
            PanelOutput::Severity(spec) => Some(spec),
            PanelOutput::Defense(chart) => Some(&chart.spec),
            PanelOutput::Statistics(_) | PanelOutput::Countries(_) => None,
        }
    }
}

fn typed<T: DeserializeOwned>(payload: Value) -> Result<T> {
    Ok(serde_json::from_value(payload)?)
}

/// Decode an already validated payload for `endpoint` and run its transformer.
pub fn decode(endpoint: &Endpoint, payload: Value, period_label: &str) -> Result<PanelOutput> {
    match endpoint {
        Endpoint::Heatmap => {
            let dataset: MatrixDataset = typed(payload)?;
            matrix::transform(&dataset).map(PanelOutput::Heatmap)
        }
        Endpoint::Treemap => {
            let dataset: HierarchyDataset = typed(payload)?;
            hierarchy::transform(&dataset).map(PanelOutput::Treemap)
        }
        Endpoint::Sankey => {
            let dataset: FlowDataset = typed(payload)?;
            flow::transform(&dataset).map(PanelOutput::Sankey)
        }
        Endpoint::MapData => {
            let dataset: MapDataset = typed(payload)?;
            choropleth::transform(&dataset, period_label).map(PanelOutput::Map)
        }
        Endpoint::TimeSeries(_) => {
            let payload = TimeSeriesPayload::from_value(payload)?;
            timeseries::transform(&payload, period_label).map(PanelOutput::TimeSeries)
        }
        Endpoint::IndustryAnalysis(metric) => {
            let dataset: LabelledValues = typed(payload)?;
            categorical::industry_bars(&dataset, *metric).map(PanelOutput::Industry)
        }
        Endpoint::AttackTypes => {
            let dataset: LabelledValues = typed(payload)?;
            categorical::attack_type_pie(&dataset).map(PanelOutput::AttackTypes)
        }
        Endpoint::SeverityByType => {
            let dataset: SeverityDataset = typed(payload)?;
            categorical::severity_stacked(&dataset).map(PanelOutput::Severity)
        }
        Endpoint::DefenseResolution => {
            let dataset: DefenseDataset = typed(payload)?;
            categorical::defense_boxes(&dataset).map(PanelOutput::Defense)
        }
        Endpoint::Statistics => typed(payload).map(PanelOutput::Statistics),
        Endpoint::Countries => typed(payload).map(PanelOutput::Countries),
    }
}

/// Run one load request to completion. Staleness is the caller's concern.
pub async fn load(client: &ApiClient, request: &LoadRequest) -> Result<PanelOutput> {
    let payload: Value = client.fetch(&request.endpoint).await?;
    let output = decode(
        &request.endpoint,
        payload,
        &config::current().period_label,
    )?;
    tracing::debug!(panel = ?request.panel, endpoint = %request.endpoint, "panel transformed");
    Ok(output)
}
