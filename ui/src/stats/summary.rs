//! Per-category observation summaries (box-plot annotation tables).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ObservationSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ObservationSummary {
    /// `None` for an empty (or all non-finite) observation set.
    pub fn from_observations(observations: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = observations
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let mean = mean(&sorted);
        Some(Self {
            count: sorted.len(),
            mean,
            median: median(&sorted),
            std: std_dev(&sorted, mean),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Summaries for every category that has observations, in input order.
/// Empty categories are left out; sparse groupings are normal in the source data.
pub fn summarize_categories<'a, I>(categories: I) -> Vec<(String, ObservationSummary)>
where
    I: IntoIterator<Item = (&'a str, &'a [f64])>,
{
    categories
        .into_iter()
        .filter_map(|(name, observations)| {
            match ObservationSummary::from_observations(observations) {
                Some(summary) => Some((name.to_string(), summary)),
                None => {
                    tracing::warn!(category = name, "skipping category without observations");
                    None
                }
            }
        })
        .collect()
}

pub(crate) fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        0.0
    } else {
        data.iter().sum::<f64>() / data.len() as f64
    }
}

fn std_dev(data: &[f64], mean: f64) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let variance = data
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n as f64 - 1.0);
    variance.sqrt()
}

/// Middle value of sorted, non-empty data; mean of the two middles when even.
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_even_sample() {
        let summary = ObservationSummary::from_observations(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        // sample variance of 1..=4 is 5/3
        assert!((summary.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_observation_has_zero_spread() {
        let summary = ObservationSummary::from_observations(&[42.0]).unwrap();
        assert_eq!(summary.std, 0.0);
        assert_eq!(summary.median, 42.0);
    }

    #[test]
    fn odd_sample_median_is_the_middle_value() {
        let summary = ObservationSummary::from_observations(&[9.0, 1.0, 5.0]).unwrap();
        assert_eq!(summary.median, 5.0);
    }

    #[test]
    fn empty_categories_are_skipped_not_fatal() {
        let firewall = [12.0, 24.0, 36.0];
        let empty: [f64; 0] = [];
        let rows = summarize_categories([
            ("Firewall", &firewall[..]),
            ("Honeypot", &empty[..]),
        ]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "Firewall");
        assert_eq!(rows[0].1.median, 24.0);
    }
}
