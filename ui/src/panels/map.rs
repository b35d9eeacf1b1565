use dioxus::prelude::*;

use super::{mismatched, stamp_of, status_view, use_panel, PanelFrame, PanelState, StatCard};
use crate::core::format;
use crate::pipeline::PanelOutput;
use crate::render::PlotlyChart;
use crate::state::Panel;

#[component]
pub fn MapPanel() -> Element {
    let state = use_panel(Panel::Map);
    let current = state.read();

    let body = match &*current {
        PanelState::Ready(PanelOutput::Map(chart), _) => {
            let stats = &chart.statistics;
            let span = match (chart.years.first(), chart.years.last()) {
                (Some(first), Some(last)) if first != last => format!("{first}–{last}"),
                (Some(only), _) => only.clone(),
                _ => String::new(),
            };
            let scale = format!(
                "{} – {}",
                format::format_millions(chart.domain.min),
                format::format_millions(chart.domain.max)
            );
            rsx! {
                PlotlyChart { id: Panel::Map.element_id().to_string(), spec: chart.spec.clone() }
                div { class: "stat-grid",
                    StatCard { label: "Total loss", value: format::format_millions(stats.total_loss) }
                    StatCard {
                        label: "Average per country",
                        value: format::format_millions(stats.avg_loss_per_country),
                    }
                    StatCard {
                        label: "Hardest hit",
                        value: "{stats.max_loss_country}",
                        detail: format::format_millions(stats.max_loss_value),
                    }
                    StatCard {
                        label: "Colour scale",
                        value: scale,
                        detail: "{span}",
                    }
                }
            }
        }
        PanelState::Ready(..) => mismatched(Panel::Map),
        pending => status_view(pending),
    };

    rsx! {
        PanelFrame { title: "Financial loss by country", stamp: stamp_of(&current), {body} }
    }
}
