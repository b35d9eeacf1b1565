use dioxus::prelude::*;

use crate::core::config;
use crate::panels::StatisticsPanel;

#[component]
pub fn Home() -> Element {
    let period = &config::current().period_label;

    rsx! {
        section { class: "page page-home",
            h1 { "Global cybersecurity threats" }
            p {
                "Incident counts and financial losses for {period}, broken down by country, industry, attack type and defense method."
            }

            StatisticsPanel {}

            ul { class: "page-home__features",
                li { "Overview: yearly trends per country, up to five countries side by side, and severity by attack type." }
                li { "Map: animated world map of losses, one frame per year." }
                li { "Charts: industries, attack types and incident resolution times." }
                li { "Advanced: loss heatmap, industry treemap and attack flow." }
            }
        }
    }
}
