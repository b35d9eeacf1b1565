//! Labelled extreme values. Ties resolve to the first value encountered.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labelled<L> {
    pub label: L,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extremes<L> {
    pub max: Labelled<L>,
    pub min: Labelled<L>,
}

/// Max and min of `(label, value)` pairs in iteration order. Non-finite values
/// are ignored; `None` when nothing finite remains.
pub fn extremes<L, I>(pairs: I) -> Option<Extremes<L>>
where
    L: Clone,
    I: IntoIterator<Item = (L, f64)>,
{
    let mut found: Option<Extremes<L>> = None;
    for (label, value) in pairs {
        if !value.is_finite() {
            continue;
        }
        match found.as_mut() {
            None => {
                found = Some(Extremes {
                    max: Labelled {
                        label: label.clone(),
                        value,
                    },
                    min: Labelled { label, value },
                });
            }
            Some(current) => {
                // Strict comparisons keep the earliest label on ties.
                if value > current.max.value {
                    current.max = Labelled {
                        label: label.clone(),
                        value,
                    };
                }
                if value < current.min.value {
                    current.min = Labelled { label, value };
                }
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_encountered_wins_ties() {
        let found = extremes([("a", 5.0), ("b", 9.0), ("c", 9.0), ("d", 1.0), ("e", 1.0)]).unwrap();
        assert_eq!(found.max.label, "b");
        assert_eq!(found.min.label, "d");
    }

    #[test]
    fn nothing_finite_means_none() {
        assert!(extremes([("a", f64::NAN)]).is_none());
        assert!(extremes(Vec::<(&str, f64)>::new()).is_none());
    }
}
