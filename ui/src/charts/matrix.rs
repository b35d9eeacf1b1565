//! Industry × attack-type heatmap of average losses.

use serde::{Deserialize, Serialize};

use super::{ChartSpec, HeatmapTrace, Layout, Trace};
use crate::core::{DashboardError, Result};
use crate::stats::{extremes, mean};

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixDataset {
    pub industries: Vec<String>,
    pub attack_types: Vec<String>,
    /// Average loss (millions) indexed `[industry][attack_type]`.
    pub heatmap_data: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellFact {
    pub industry: String,
    pub attack_type: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixSummary {
    pub max_loss: CellFact,
    pub min_loss: CellFact,
    pub avg_loss_overall: f64,
    pub total_combinations: usize,
    pub total_industries: usize,
    pub total_attack_types: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixChart {
    pub spec: ChartSpec,
    pub summary: MatrixSummary,
}

pub fn transform(dataset: &MatrixDataset) -> Result<MatrixChart> {
    let rows = dataset.industries.len();
    let cols = dataset.attack_types.len();

    if rows == 0 || cols == 0 {
        return Err(DashboardError::data("heatmap has no rows or columns"));
    }
    if dataset.heatmap_data.len() != rows {
        return Err(DashboardError::data(format!(
            "heatmap has {} rows of data for {rows} industries",
            dataset.heatmap_data.len()
        )));
    }
    if let Some((idx, row)) = dataset
        .heatmap_data
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != cols)
    {
        return Err(DashboardError::data(format!(
            "heatmap row {idx} has {} cells, expected {cols}",
            row.len()
        )));
    }

    let cells: Vec<((usize, usize), f64)> = dataset
        .heatmap_data
        .iter()
        .enumerate()
        .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, v)| ((r, c), *v)))
        .collect();

    if cells.iter().any(|(_, value)| !value.is_finite()) {
        return Err(DashboardError::data("heatmap contains a non-finite cell"));
    }

    let found = extremes(cells.iter().copied())
        .ok_or_else(|| DashboardError::data("heatmap has no cells"))?;
    let values: Vec<f64> = cells.iter().map(|(_, value)| *value).collect();

    let fact = |(r, c): (usize, usize), value: f64| CellFact {
        industry: dataset.industries[r].clone(),
        attack_type: dataset.attack_types[c].clone(),
        value,
    };

    let summary = MatrixSummary {
        max_loss: fact(found.max.label, found.max.value),
        min_loss: fact(found.min.label, found.min.value),
        avg_loss_overall: mean(&values),
        total_combinations: rows * cols,
        total_industries: rows,
        total_attack_types: cols,
    };

    let trace = Trace::Heatmap(HeatmapTrace {
        x: dataset.attack_types.clone(),
        y: dataset.industries.clone(),
        z: dataset.heatmap_data.clone(),
        colorscale: "RdBu",
        hovertemplate:
            "<b>Industry: %{y}</b><br><b>Attack: %{x}</b><br>Average loss: $%{z:,.2f}M<extra></extra>",
    });
    let layout = Layout::titled("Average financial loss by industry and attack type")
        .with_axes("Attack type", "Target industry");

    Ok(MatrixChart {
        spec: ChartSpec::new(vec![trace], layout),
        summary,
    })
}
