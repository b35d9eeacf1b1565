use dioxus::prelude::*;

use super::ADVANCED_PANELS;
use crate::panels::PanelSlot;

#[component]
pub fn Advanced() -> Element {
    rsx! {
        section { class: "page page-advanced",
            h1 { "Advanced analysis" }
            for panel in ADVANCED_PANELS.iter().copied() {
                PanelSlot { key: "{panel:?}", panel }
            }
        }
    }
}
