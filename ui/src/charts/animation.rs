//! Animation frames for the yearly choropleth.
//!
//! The colour domain is computed once over every year and stamped onto every
//! frame. Recomputing it per frame would make the same loss look different
//! from one year to the next.

use std::collections::HashSet;

use serde::Serialize;

use super::{ChoroplethTrace, Trace};
use crate::core::{DashboardError, Result};

const FRAME_MS: u32 = 800;
const TRANSITION_MS: u32 = 300;
pub(crate) const MAP_COLORSCALE: &str = "Blues";

/// One year's `(country, loss)` pairs, already length-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSnapshot {
    pub label: String,
    pub countries: Vec<String>,
    pub losses: Vec<f64>,
}

impl YearSnapshot {
    pub fn new(label: impl Into<String>, countries: Vec<String>, losses: Vec<f64>) -> Result<Self> {
        let label = label.into();
        if countries.len() != losses.len() {
            return Err(DashboardError::data(format!(
                "year {label}: {} countries but {} losses",
                countries.len(),
                losses.len()
            )));
        }
        let mut seen = HashSet::with_capacity(countries.len());
        if let Some(dup) = countries.iter().find(|country| !seen.insert(country.as_str())) {
            return Err(DashboardError::data(format!(
                "year {label}: country `{dup}` appears twice"
            )));
        }
        if let Some(bad) = losses.iter().find(|loss| !loss.is_finite()) {
            return Err(DashboardError::data(format!(
                "year {label}: loss {bad} is not a number"
            )));
        }
        Ok(Self {
            label,
            countries,
            losses,
        })
    }
}

/// Fixed `[min, max]` of the colour scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDomain {
    pub min: f64,
    pub max: f64,
}

impl ColorDomain {
    /// Domain over every loss of every year combined.
    pub fn spanning(years: &[YearSnapshot]) -> Result<Self> {
        let mut all = years.iter().flat_map(|year| year.losses.iter().copied());
        let first = all
            .next()
            .ok_or_else(|| DashboardError::data("map has no loss values in any year"))?;
        let (min, max) = all.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Ok(Self { min, max })
    }

    /// Position of `value` within the domain, `0.0..=1.0`.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub name: String,
    pub data: Vec<Trace>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    pub active: usize,
    pub steps: Vec<SliderStep>,
    pub currentvalue: SliderLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderLabel {
    pub prefix: &'static str,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderStep {
    pub label: String,
    pub method: &'static str,
    /// `[[frame name], options]`
    pub args: (Vec<String>, AnimateOptions),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimateOptions {
    pub mode: &'static str,
    pub frame: FrameTiming,
    pub transition: TransitionTiming,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fromcurrent: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameTiming {
    pub duration: u32,
    pub redraw: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionTiming {
    pub duration: u32,
}

/// Play / pause buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackMenu {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub showactive: bool,
    pub buttons: Vec<PlaybackButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackButton {
    pub label: &'static str,
    pub method: &'static str,
    /// `null` frame list plays everything; `[null]` stops.
    pub args: (Option<Vec<Option<String>>>, AnimateOptions),
}

/// Frames, slider and the initial (first-year) trace for a year sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub domain: ColorDomain,
    pub initial: Trace,
    pub frames: Vec<Frame>,
    pub slider: Slider,
    pub playback: PlaybackMenu,
}

pub fn choropleth_trace(year: &YearSnapshot, domain: ColorDomain) -> Trace {
    Trace::Choropleth(ChoroplethTrace {
        locationmode: "country names",
        locations: year.countries.clone(),
        z: year.losses.clone(),
        text: year.countries.clone(),
        zauto: false,
        zmin: domain.min,
        zmax: domain.max,
        colorscale: MAP_COLORSCALE,
    })
}

pub fn build(years: &[YearSnapshot]) -> Result<Animation> {
    let first = years
        .first()
        .ok_or_else(|| DashboardError::data("map has no years to animate"))?;
    let domain = ColorDomain::spanning(years)?;

    let frames = years
        .iter()
        .map(|year| Frame {
            name: year.label.clone(),
            data: vec![choropleth_trace(year, domain)],
        })
        .collect::<Vec<_>>();

    let steps = frames
        .iter()
        .map(|frame| SliderStep {
            label: frame.name.clone(),
            method: "animate",
            args: (
                vec![frame.name.clone()],
                AnimateOptions {
                    mode: "immediate",
                    frame: FrameTiming {
                        duration: TRANSITION_MS,
                        redraw: true,
                    },
                    transition: TransitionTiming {
                        duration: TRANSITION_MS,
                    },
                    fromcurrent: None,
                },
            ),
        })
        .collect();

    let playback = PlaybackMenu {
        kind: "buttons",
        showactive: false,
        buttons: vec![
            PlaybackButton {
                label: "▶ Play",
                method: "animate",
                args: (
                    None,
                    AnimateOptions {
                        mode: "afterall",
                        frame: FrameTiming {
                            duration: FRAME_MS,
                            redraw: true,
                        },
                        transition: TransitionTiming {
                            duration: TRANSITION_MS,
                        },
                        fromcurrent: Some(true),
                    },
                ),
            },
            PlaybackButton {
                label: "⏸ Pause",
                method: "animate",
                args: (
                    Some(vec![None]),
                    AnimateOptions {
                        mode: "immediate",
                        frame: FrameTiming {
                            duration: 0,
                            redraw: false,
                        },
                        transition: TransitionTiming { duration: 0 },
                        fromcurrent: None,
                    },
                ),
            },
        ],
    };

    Ok(Animation {
        domain,
        initial: choropleth_trace(first, domain),
        frames,
        slider: Slider {
            active: 0,
            steps,
            currentvalue: SliderLabel {
                prefix: "Year: ",
                visible: true,
            },
        },
        playback,
    })
}
