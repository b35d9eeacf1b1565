use dioxus::prelude::*;

use super::CHARTS_PANELS;
use crate::panels::PanelSlot;

#[component]
pub fn Charts() -> Element {
    rsx! {
        section { class: "page page-charts",
            h1 { "Charts" }
            for panel in CHARTS_PANELS.iter().copied() {
                PanelSlot { key: "{panel:?}", panel }
            }
        }
    }
}
