use dioxus::prelude::*;

use super::{mismatched, stamp_of, status_view, use_panel, PanelFrame, PanelState};
use crate::core::format;
use crate::pipeline::PanelOutput;
use crate::render::PlotlyChart;
use crate::state::Panel;

#[component]
pub fn SeverityPanel() -> Element {
    let state = use_panel(Panel::Severity);
    let current = state.read();

    let body = match &*current {
        PanelState::Ready(PanelOutput::Severity(spec), _) => rsx! {
            PlotlyChart { id: Panel::Severity.element_id().to_string(), spec: spec.clone() }
        },
        PanelState::Ready(..) => mismatched(Panel::Severity),
        pending => status_view(pending),
    };

    rsx! {
        PanelFrame { title: "Vulnerabilities by attack type", stamp: stamp_of(&current), {body} }
    }
}

#[component]
pub fn DefensePanel() -> Element {
    let state = use_panel(Panel::Defense);
    let current = state.read();

    let body = match &*current {
        PanelState::Ready(PanelOutput::Defense(chart), _) => rsx! {
            PlotlyChart { id: Panel::Defense.element_id().to_string(), spec: chart.spec.clone() }
            table { class: "stats-table",
                thead {
                    tr {
                        th { "Defense method" }
                        th { "n" }
                        th { "Mean" }
                        th { "Median" }
                        th { "Std" }
                        th { "Min" }
                        th { "Max" }
                    }
                }
                tbody {
                    for (method, row) in chart.statistics.iter() {
                        tr { key: "{method}",
                            td { "{method}" }
                            td { "{row.count}" }
                            td { {format::format_hours(row.mean)} }
                            td { {format::format_hours(row.median)} }
                            td { {format::format_hours(row.std)} }
                            td { {format::format_hours(row.min)} }
                            td { {format::format_hours(row.max)} }
                        }
                    }
                }
            }
        },
        PanelState::Ready(..) => mismatched(Panel::Defense),
        pending => status_view(pending),
    };

    rsx! {
        PanelFrame { title: "Resolution time by defense method", stamp: stamp_of(&current), {body} }
    }
}
