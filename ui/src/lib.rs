//! Shared UI crate for Cyberdash: the chart data pipeline, interaction state,
//! the Plotly adapter and the dashboard panels and pages.

pub mod charts;
pub mod components;
pub mod core;
pub mod panels;
pub mod pipeline;
pub mod render;
pub mod state;
pub mod stats;
pub mod views;
