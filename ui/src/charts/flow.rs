//! Sankey flow: country → attack type → target industry.

use serde::{Deserialize, Serialize};

use super::{ChartSpec, Layout, SankeyLinks, SankeyNodes, SankeyTrace, Trace};
use crate::core::{DashboardError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct FlowDataset {
    pub nodes: Vec<String>,
    pub node_colors: Vec<String>,
    pub sources: Vec<i64>,
    pub targets: Vec<i64>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowChart {
    pub spec: ChartSpec,
    pub edges: Vec<FlowEdge>,
}

fn node_index(raw: i64, node_count: usize, role: &str, edge: usize) -> Result<usize> {
    usize::try_from(raw)
        .ok()
        .filter(|idx| *idx < node_count)
        .ok_or_else(|| {
            DashboardError::data(format!(
                "edge {edge}: {role} index {raw} is outside 0..{node_count}"
            ))
        })
}

pub fn transform(dataset: &FlowDataset) -> Result<FlowChart> {
    let node_count = dataset.nodes.len();
    if dataset.node_colors.len() != node_count {
        return Err(DashboardError::data(format!(
            "sankey has {} colours for {node_count} nodes",
            dataset.node_colors.len()
        )));
    }
    let edge_count = dataset.values.len();
    if dataset.sources.len() != edge_count || dataset.targets.len() != edge_count {
        return Err(DashboardError::data(format!(
            "sankey edge columns differ in length (sources {}, targets {}, values {edge_count})",
            dataset.sources.len(),
            dataset.targets.len()
        )));
    }

    let edges = (0..edge_count)
        .map(|edge| {
            let value = dataset.values[edge];
            if !value.is_finite() || value < 0.0 {
                return Err(DashboardError::data(format!(
                    "edge {edge}: weight {value} must be a non-negative number"
                )));
            }
            Ok(FlowEdge {
                source: node_index(dataset.sources[edge], node_count, "source", edge)?,
                target: node_index(dataset.targets[edge], node_count, "target", edge)?,
                value,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let trace = Trace::Sankey(SankeyTrace {
        node: SankeyNodes {
            label: dataset.nodes.clone(),
            color: dataset.node_colors.clone(),
            pad: 15,
            thickness: 20,
        },
        link: SankeyLinks {
            source: edges.iter().map(|edge| edge.source).collect(),
            target: edges.iter().map(|edge| edge.target).collect(),
            value: edges.iter().map(|edge| edge.value).collect(),
        },
    });

    Ok(FlowChart {
        spec: ChartSpec::new(
            vec![trace],
            Layout::titled("Attack flow: country → attack type → target industry"),
        ),
        edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(sources: Vec<i64>, targets: Vec<i64>, values: Vec<f64>) -> FlowDataset {
        FlowDataset {
            nodes: vec!["France".into(), "Phishing".into(), "Banking".into()],
            node_colors: vec!["#FF6B6B".into(), "#4ECDC4".into(), "#95E1D3".into()],
            sources,
            targets,
            values,
        }
    }

    #[test]
    fn weights_pass_through_unchanged() {
        let chart = transform(&dataset(vec![0, 1], vec![1, 2], vec![12.0, 7.0])).unwrap();
        assert_eq!(
            chart.edges,
            vec![
                FlowEdge { source: 0, target: 1, value: 12.0 },
                FlowEdge { source: 1, target: 2, value: 7.0 },
            ]
        );
    }

    #[test]
    fn out_of_range_target_is_a_data_error() {
        let err = transform(&dataset(vec![0], vec![3], vec![1.0])).unwrap_err();
        assert!(matches!(err, DashboardError::Data(_)));
        assert!(err.to_string().contains("target index 3"));
    }

    #[test]
    fn negative_source_is_a_data_error() {
        assert!(transform(&dataset(vec![-1], vec![1], vec![1.0])).is_err());
    }

    #[test]
    fn colour_count_must_match_nodes() {
        let mut ds = dataset(vec![], vec![], vec![]);
        ds.node_colors.pop();
        assert!(transform(&ds).is_err());
    }
}
