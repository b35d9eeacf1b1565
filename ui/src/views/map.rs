use dioxus::prelude::*;

use crate::panels::MapPanel;

#[component]
pub fn Map() -> Element {
    rsx! {
        section { class: "page page-map",
            h1 { "World map" }
            p { "Press play or drag the slider to step through the years. The colour scale stays fixed across years." }
            MapPanel {}
        }
    }
}
