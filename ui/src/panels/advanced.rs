use dioxus::prelude::*;

use super::{mismatched, stamp_of, status_view, use_panel, PanelFrame, PanelState, StatCard};
use crate::charts::matrix::MatrixSummary;
use crate::core::format;
use crate::pipeline::PanelOutput;
use crate::render::PlotlyChart;
use crate::state::Panel;

#[component]
pub fn HeatmapPanel() -> Element {
    let state = use_panel(Panel::Heatmap);
    let current = state.read();

    let body = match &*current {
        PanelState::Ready(PanelOutput::Heatmap(chart), _) => rsx! {
            PlotlyChart { id: Panel::Heatmap.element_id().to_string(), spec: chart.spec.clone() }
            MatrixCards { summary: chart.summary.clone() }
        },
        PanelState::Ready(..) => mismatched(Panel::Heatmap),
        pending => status_view(pending),
    };

    rsx! {
        PanelFrame { title: "Average loss by industry and attack type", stamp: stamp_of(&current), {body} }
    }
}

#[component]
fn MatrixCards(summary: MatrixSummary) -> Element {
    let max = &summary.max_loss;
    let min = &summary.min_loss;
    rsx! {
        div { class: "stat-grid",
            StatCard {
                label: "Highest average loss",
                value: format::format_millions(max.value),
                detail: "{max.industry} · {max.attack_type}",
            }
            StatCard {
                label: "Lowest average loss",
                value: format::format_millions(min.value),
                detail: "{min.industry} · {min.attack_type}",
            }
            StatCard { label: "Overall average", value: format::format_millions(summary.avg_loss_overall) }
            StatCard {
                label: "Combinations",
                value: "{summary.total_combinations}",
                detail: "{summary.total_industries} industries × {summary.total_attack_types} attack types",
            }
        }
    }
}

#[component]
pub fn TreemapPanel() -> Element {
    let state = use_panel(Panel::Treemap);
    let current = state.read();

    let body = match &*current {
        PanelState::Ready(PanelOutput::Treemap(chart), _) => {
            let roots: Vec<(String, f64)> = chart
                .nodes
                .iter()
                .filter(|node| node.parent.is_none())
                .map(|node| (node.label.clone(), node.aggregate))
                .collect();
            rsx! {
                PlotlyChart { id: Panel::Treemap.element_id().to_string(), spec: chart.spec.clone() }
                ul { class: "share-list",
                    for (label, total) in roots {
                        li { key: "{label}",
                            span { class: "share-list__label", "{label}" }
                            span { class: "share-list__value", {format::format_count(total)} }
                        }
                    }
                }
            }
        }
        PanelState::Ready(..) => mismatched(Panel::Treemap),
        pending => status_view(pending),
    };

    rsx! {
        PanelFrame { title: "Industries and attack types", stamp: stamp_of(&current), {body} }
    }
}

#[component]
pub fn SankeyPanel() -> Element {
    let state = use_panel(Panel::Sankey);
    let current = state.read();

    let body = match &*current {
        PanelState::Ready(PanelOutput::Sankey(chart), _) => {
            let flows = chart.edges.len();
            rsx! {
                PlotlyChart { id: Panel::Sankey.element_id().to_string(), spec: chart.spec.clone() }
                p { class: "panel__note", "{flows} flows" }
            }
        }
        PanelState::Ready(..) => mismatched(Panel::Sankey),
        pending => status_view(pending),
    };

    rsx! {
        PanelFrame { title: "Attack flow", stamp: stamp_of(&current), {body} }
    }
}
