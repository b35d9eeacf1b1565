//! Treemap of target industries and attack types.
//!
//! Node sizes follow branch-value ("total") semantics: a parent always covers
//! its children. Payloads from Plotly express already carry subtree totals on
//! the parents; payloads with zeroed parents get the totals filled in.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ChartSpec, Layout, Trace, TreemapMarker, TreemapTrace};
use crate::core::{DashboardError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyDataset {
    pub labels: Vec<String>,
    /// Parent key per node; `""` marks a root.
    pub parents: Vec<String>,
    pub values: Vec<f64>,
    /// Unique node ids. When present, `parents` refer to these instead of labels.
    #[serde(default)]
    pub ids: Option<Vec<String>>,
    #[serde(default)]
    pub colorscheme: Option<String>,
}

impl HierarchyDataset {
    fn keys(&self) -> &[String] {
        self.ids.as_deref().unwrap_or(&self.labels)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyNode {
    pub label: String,
    pub parent: Option<usize>,
    pub value: f64,
    /// Rendered size: the larger of the node's own value and its children's
    /// aggregates summed.
    pub aggregate: f64,
    /// Share of the aggregate among siblings (roots are siblings of each other).
    pub percent_of_parent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyChart {
    pub spec: ChartSpec,
    pub nodes: Vec<HierarchyNode>,
}

/// Resolve each node's parent to an index. Dangling or ambiguous parent keys
/// and cycles are data errors.
pub fn resolve_parents(dataset: &HierarchyDataset) -> Result<Vec<Option<usize>>> {
    let n = dataset.labels.len();
    if dataset.parents.len() != n || dataset.values.len() != n {
        return Err(DashboardError::data(format!(
            "treemap columns differ in length (labels {n}, parents {}, values {})",
            dataset.parents.len(),
            dataset.values.len()
        )));
    }
    let keys = dataset.keys();
    if keys.len() != n {
        return Err(DashboardError::data(format!(
            "treemap has {} ids for {n} labels",
            keys.len()
        )));
    }

    let mut index: HashMap<&str, Vec<usize>> = HashMap::with_capacity(n);
    for (idx, key) in keys.iter().enumerate() {
        index.entry(key.as_str()).or_default().push(idx);
    }

    let parents = dataset
        .parents
        .iter()
        .enumerate()
        .map(|(idx, parent)| {
            if parent.is_empty() {
                return Ok(None);
            }
            match index.get(parent.as_str()).map(Vec::as_slice) {
                Some([only]) if *only != idx => Ok(Some(*only)),
                Some([_]) => Err(DashboardError::data(format!(
                    "treemap node `{parent}` is its own parent"
                ))),
                Some(_) => Err(DashboardError::data(format!(
                    "treemap parent `{parent}` names more than one node"
                ))),
                None => Err(DashboardError::data(format!(
                    "treemap node `{}` has unknown parent `{parent}`",
                    dataset.labels[idx]
                ))),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    // Walking more than `n` steps upwards means the chain loops.
    for start in 0..n {
        let mut steps = 0;
        let mut cursor = parents[start];
        while let Some(up) = cursor {
            steps += 1;
            if steps > n {
                return Err(DashboardError::data(format!(
                    "treemap parent chain of `{}` forms a cycle",
                    dataset.labels[start]
                )));
            }
            cursor = parents[up];
        }
    }

    Ok(parents)
}

/// Subtree totals. A leaf keeps its value; a parent gets
/// `max(value, Σ aggregate[child])`, so a parent that already reports its
/// subtree total is not counted twice.
pub fn aggregate(values: &[f64], parents: &[Option<usize>]) -> Vec<f64> {
    let depth = |mut cursor: Option<usize>| {
        let mut steps = 0usize;
        while let Some(up) = cursor {
            steps += 1;
            cursor = parents[up];
        }
        steps
    };
    let mut order: Vec<(usize, usize)> = (0..values.len())
        .map(|idx| (depth(parents[idx]), idx))
        .collect();
    // Deepest first, so every child is final before its parent reads it.
    order.sort_unstable_by(|a, b| b.0.cmp(&a.0));

    let mut child_sums: Vec<Option<f64>> = vec![None; values.len()];
    let mut totals = values.to_vec();
    for (_, idx) in order {
        if let Some(sum) = child_sums[idx] {
            totals[idx] = values[idx].max(sum);
        }
        if let Some(up) = parents[idx] {
            *child_sums[up].get_or_insert(0.0) += totals[idx];
        }
    }
    totals
}

/// `aggregate[i] / Σ aggregate[j]` over nodes sharing `i`'s parent; 0 when the
/// siblings sum to zero.
pub fn percent_of_parent(aggregates: &[f64], parents: &[Option<usize>]) -> Vec<f64> {
    let mut sibling_totals: HashMap<Option<usize>, f64> = HashMap::new();
    for (aggregate, parent) in aggregates.iter().zip(parents) {
        *sibling_totals.entry(*parent).or_insert(0.0) += aggregate;
    }
    aggregates
        .iter()
        .zip(parents)
        .map(|(aggregate, parent)| {
            let total = sibling_totals.get(parent).copied().unwrap_or(0.0);
            if total > 0.0 {
                aggregate / total
            } else {
                0.0
            }
        })
        .collect()
}

pub fn transform(dataset: &HierarchyDataset) -> Result<HierarchyChart> {
    if let Some((idx, value)) = dataset
        .values
        .iter()
        .enumerate()
        .find(|(_, value)| !value.is_finite() || **value < 0.0)
    {
        return Err(DashboardError::data(format!(
            "treemap value {value} at position {idx} must be a non-negative number"
        )));
    }

    let parents = resolve_parents(dataset)?;
    let aggregates = aggregate(&dataset.values, &parents);
    let shares = percent_of_parent(&aggregates, &parents);

    let nodes = dataset
        .labels
        .iter()
        .enumerate()
        .map(|(idx, label)| HierarchyNode {
            label: label.clone(),
            parent: parents[idx],
            value: dataset.values[idx],
            aggregate: aggregates[idx],
            percent_of_parent: shares[idx],
        })
        .collect();

    let trace = Trace::Treemap(TreemapTrace {
        ids: dataset.ids.clone(),
        labels: dataset.labels.clone(),
        parents: dataset.parents.clone(),
        values: aggregates.clone(),
        branchvalues: "total",
        marker: TreemapMarker {
            colors: aggregates,
            colorscale: dataset
                .colorscheme
                .clone()
                .unwrap_or_else(|| "Viridis".to_string()),
        },
        textinfo: "label+value+percent parent",
    });

    Ok(HierarchyChart {
        spec: ChartSpec::new(
            vec![trace],
            Layout::titled("Target industries and attack types"),
        ),
        nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(labels: &[&str], parents: &[&str], values: &[f64]) -> HierarchyDataset {
        HierarchyDataset {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            parents: parents.iter().map(|s| s.to_string()).collect(),
            values: values.to_vec(),
            ids: None,
            colorscheme: None,
        }
    }

    fn sample() -> HierarchyDataset {
        dataset(
            &["All", "A", "B", "A1", "A2"],
            &["", "All", "All", "A", "A"],
            &[0.0, 0.0, 0.0, 3.0, 7.0],
        )
    }

    #[test]
    fn aggregates_cover_the_full_subtree() {
        let chart = transform(&sample()).unwrap();
        let by_label: HashMap<_, _> = chart
            .nodes
            .iter()
            .map(|node| (node.label.as_str(), node.aggregate))
            .collect();
        assert_eq!(by_label["A"], 10.0);
        assert_eq!(by_label["B"], 0.0);
        assert_eq!(by_label["All"], 10.0);
        assert_eq!(by_label["A1"], 3.0);
    }

    #[test]
    fn grandchildren_reach_the_root() {
        let ds = dataset(
            &["root", "mid", "leaf", "other"],
            &["", "root", "mid", "root"],
            &[1.0, 2.0, 4.0, 8.0],
        );
        let parents = resolve_parents(&ds).unwrap();
        let totals = aggregate(&ds.values, &parents);
        assert_eq!(totals, vec![12.0, 4.0, 4.0, 8.0]);
    }

    #[test]
    fn parents_carrying_their_total_are_not_doubled() {
        let mut ds = dataset(
            &["Banking", "Phishing", "DDoS"],
            &["", "Banking", "Banking"],
            &[10.0, 6.0, 4.0],
        );
        ds.ids = Some(vec![
            "Banking".into(),
            "Banking/Phishing".into(),
            "Banking/DDoS".into(),
        ]);
        let chart = transform(&ds).unwrap();
        let sizes: Vec<f64> = chart.nodes.iter().map(|node| node.aggregate).collect();
        assert_eq!(sizes, vec![10.0, 6.0, 4.0]);
        assert!((chart.nodes[1].percent_of_parent - 0.6).abs() < 1e-12);
    }

    #[test]
    fn sibling_shares_sum_to_one() {
        let chart = transform(&sample()).unwrap();
        let children_of_a: f64 = chart
            .nodes
            .iter()
            .filter(|node| node.parent == Some(1))
            .map(|node| node.percent_of_parent)
            .sum();
        assert!((children_of_a - 1.0).abs() < 1e-12);
        assert!((chart.nodes[3].percent_of_parent - 0.3).abs() < 1e-12);
    }

    #[test]
    fn dangling_parent_is_a_data_error() {
        let ds = dataset(&["All", "A"], &["", "Everything"], &[0.0, 1.0]);
        let err = transform(&ds).unwrap_err();
        assert!(matches!(err, DashboardError::Data(_)));
        assert!(err.to_string().contains("unknown parent `Everything`"));
    }

    #[test]
    fn cycles_are_rejected() {
        let ds = dataset(&["A", "B"], &["B", "A"], &[1.0, 1.0]);
        assert!(transform(&ds).is_err());
    }

    #[test]
    fn negative_values_are_rejected() {
        let ds = dataset(&["All", "A"], &["", "All"], &[0.0, -1.0]);
        assert!(transform(&ds).is_err());
    }

    #[test]
    fn ids_disambiguate_repeated_labels() {
        let mut ds = dataset(
            &["Banking", "Retail", "Phishing", "Phishing"],
            &["", "", "Banking", "Retail"],
            &[0.0, 0.0, 5.0, 3.0],
        );
        ds.ids = Some(vec![
            "Banking".into(),
            "Retail".into(),
            "Banking/Phishing".into(),
            "Retail/Phishing".into(),
        ]);
        let chart = transform(&ds).unwrap();
        assert_eq!(chart.nodes[0].aggregate, 5.0);
        assert_eq!(chart.nodes[1].aggregate, 3.0);
        assert!((chart.nodes[0].percent_of_parent - 0.625).abs() < 1e-12);
    }

    #[test]
    fn parent_naming_two_nodes_is_ambiguous() {
        let ds = dataset(&["A", "A", "x"], &["", "", "A"], &[0.0, 0.0, 1.0]);
        let err = transform(&ds).unwrap_err();
        assert!(err.to_string().contains("more than one node"));
    }
}
