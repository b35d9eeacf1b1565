use dioxus::prelude::*;

use super::OVERVIEW_PANELS;
use crate::panels::PanelSlot;

#[component]
pub fn Overview() -> Element {
    rsx! {
        section { class: "page page-overview",
            h1 { "Overview" }
            for panel in OVERVIEW_PANELS.iter().copied() {
                PanelSlot { key: "{panel:?}", panel }
            }
        }
    }
}
