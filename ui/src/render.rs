//! Plotly adapter.
//!
//! Chart specs serialise straight into a Plotly figure (`data`, `layout`,
//! `frames`, `config`) and go through `Plotly.react`, which both creates and
//! updates a plot. Plotly itself is loaded by the host page.

use dioxus::prelude::*;
use serde::Serialize;

use crate::charts::ChartSpec;
use crate::core::Result;

#[derive(Serialize)]
struct PlotConfig {
    responsive: bool,
    #[serde(rename = "displayModeBar")]
    display_mode_bar: bool,
}

#[derive(Serialize)]
struct Figure<'a> {
    #[serde(flatten)]
    spec: &'a ChartSpec,
    config: PlotConfig,
}

/// The figure object passed to `Plotly.react`, as JSON text.
pub fn figure_json(spec: &ChartSpec) -> Result<String> {
    let figure = Figure {
        spec,
        config: PlotConfig {
            responsive: true,
            display_mode_bar: true,
        },
    };
    Ok(serde_json::to_string(&figure)?)
}

#[cfg(target_arch = "wasm32")]
mod plotly {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = Plotly, js_name = react, catch)]
        pub fn react(element_id: &str, figure: &JsValue) -> Result<js_sys::Promise, JsValue>;
    }
}

/// Draw (or redraw) `spec` into the element with id `element_id`.
#[cfg(target_arch = "wasm32")]
pub async fn draw(element_id: &str, spec: &ChartSpec) -> Result<()> {
    use crate::core::DashboardError;

    let json = figure_json(spec)?;
    let figure = js_sys::JSON::parse(&json)
        .map_err(|err| DashboardError::data(format!("figure is not valid JSON: {err:?}")))?;
    let promise = plotly::react(element_id, &figure)
        .map_err(|err| DashboardError::data(format!("Plotly is unavailable: {err:?}")))?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|err| DashboardError::data(format!("Plotly rejected the figure: {err:?}")))?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn draw(element_id: &str, spec: &ChartSpec) -> Result<()> {
    use crate::core::platform::Platform;

    let json = figure_json(spec)?;
    tracing::debug!(
        platform = ?Platform::current(),
        element_id,
        bytes = json.len(),
        "no chart engine here; figure dropped"
    );
    Ok(())
}

/// Container div that redraws whenever `spec` changes.
#[component]
pub fn PlotlyChart(id: String, spec: ReadOnlySignal<ChartSpec>) -> Element {
    let element_id = id.clone();
    use_effect(move || {
        let spec = spec.read().clone();
        let element_id = element_id.clone();
        spawn(async move {
            if let Err(err) = draw(&element_id, &spec).await {
                tracing::error!(element_id = %element_id, %err, "chart render failed");
            }
        });
    });

    rsx! {
        div { id: "{id}", class: "chart" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::Layout;
    use serde_json::Value;

    #[test]
    fn figure_carries_spec_and_config() {
        let spec = ChartSpec::new(Vec::new(), Layout::titled("Empty"));
        let figure: Value = serde_json::from_str(&figure_json(&spec).unwrap()).unwrap();
        assert_eq!(figure["layout"]["title"], "Empty");
        assert_eq!(figure["config"]["responsive"], true);
        assert!(figure.get("frames").is_none());
    }
}
