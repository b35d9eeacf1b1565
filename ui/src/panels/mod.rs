//! Dashboard panels.
//!
//! Each panel owns a `Signal<PanelState>` and loads independently: a failure
//! renders inline in that panel only, and a response whose ticket is no longer
//! current is dropped without touching the signal.

mod advanced;
mod breakdown;
mod map;
mod overview;

pub use advanced::{HeatmapPanel, SankeyPanel, TreemapPanel};
pub use breakdown::{DefensePanel, SeverityPanel};
pub use map::MapPanel;
pub use overview::{AttackTypesPanel, IndustryPanel, StatisticsPanel, TimeSeriesPanel};

use dioxus::prelude::*;

use crate::core::api::ApiClient;
use crate::core::timing::LoadStamp;
use crate::core::DashboardError;
use crate::pipeline::{self, PanelOutput};
use crate::state::{InteractionController, LoadRequest, Panel};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Loading,
    Ready(PanelOutput, LoadStamp),
    Failed(DashboardError),
}

/// Run `request` in the background and publish the outcome into `target`.
pub fn launch(
    client: ApiClient,
    controller: Signal<InteractionController>,
    request: LoadRequest,
    mut target: Signal<PanelState>,
) {
    target.set(PanelState::Loading);
    spawn(async move {
        let outcome = pipeline::load(&client, &request).await;
        if !controller.peek().is_current(&request.ticket) {
            tracing::debug!(
                panel = ?request.panel,
                generation = request.ticket.generation,
                "stale response discarded"
            );
            return;
        }
        match outcome {
            Ok(output) => target.set(PanelState::Ready(output, LoadStamp::now())),
            Err(err) => {
                tracing::error!(panel = ?request.panel, endpoint = %request.endpoint, %err, "panel load failed");
                target.set(PanelState::Failed(err));
            }
        }
    });
}

/// Panel state plus the initial load, issued once on mount.
pub fn use_panel(panel: Panel) -> Signal<PanelState> {
    let mut controller = use_context::<Signal<InteractionController>>();
    let client = use_context::<ApiClient>();
    let state = use_signal(|| PanelState::Loading);

    // Reads nothing reactive, so it runs once after the first render.
    use_effect(move || {
        let request = controller.write().request(panel);
        launch(client.clone(), controller, request, state);
    });

    state
}

#[component]
pub fn PanelFrame(
    title: String,
    #[props(!optional)] stamp: Option<LoadStamp>,
    children: Element,
) -> Element {
    rsx! {
        section { class: "panel",
            div { class: "panel__header",
                h2 { "{title}" }
                if let Some(stamp) = stamp {
                    span { class: "panel__meta", "Loaded " {stamp.badge()} }
                }
            }
            {children}
        }
    }
}

#[component]
pub fn PanelError(error: DashboardError) -> Element {
    rsx! {
        div { class: "panel__error", role: "alert",
            strong { {error.kind_label()} ": " }
            "{error}"
        }
    }
}

#[component]
pub fn PanelLoading() -> Element {
    rsx! {
        div { class: "panel__loading", aria_busy: "true", "Loading…" }
    }
}

#[component]
pub fn StatCard(
    label: String,
    value: String,
    #[props(default)] detail: String,
    #[props(default)] class: String,
) -> Element {
    rsx! {
        div { class: "stat-card {class}",
            span { class: "stat-card__label", "{label}" }
            span { class: "stat-card__value", "{value}" }
            if !detail.is_empty() {
                span { class: "stat-card__detail", "{detail}" }
            }
        }
    }
}

/// Renders the component that owns `panel`. `Countries` only feeds the
/// time series picker and has no panel of its own.
#[component]
pub fn PanelSlot(panel: Panel) -> Element {
    match panel {
        Panel::Heatmap => rsx! { HeatmapPanel {} },
        Panel::Treemap => rsx! { TreemapPanel {} },
        Panel::Sankey => rsx! { SankeyPanel {} },
        Panel::Map => rsx! { MapPanel {} },
        Panel::TimeSeries => rsx! { TimeSeriesPanel {} },
        Panel::Industry => rsx! { IndustryPanel {} },
        Panel::AttackTypes => rsx! { AttackTypesPanel {} },
        Panel::Severity => rsx! { SeverityPanel {} },
        Panel::Defense => rsx! { DefensePanel {} },
        Panel::Statistics => rsx! { StatisticsPanel {} },
        Panel::Countries => rsx! {},
    }
}

/// Loading / error markup shared by every panel; empty once data is ready.
pub(crate) fn status_view(state: &PanelState) -> Element {
    match state {
        PanelState::Loading => rsx! { PanelLoading {} },
        PanelState::Failed(error) => rsx! { PanelError { error: error.clone() } },
        PanelState::Ready(..) => rsx! {},
    }
}

pub(crate) fn stamp_of(state: &PanelState) -> Option<LoadStamp> {
    match state {
        PanelState::Ready(_, stamp) => Some(*stamp),
        PanelState::Loading | PanelState::Failed(_) => None,
    }
}

/// A ready state holding the wrong output kind means the panel was wired to
/// the wrong endpoint.
pub(crate) fn mismatched(panel: Panel) -> Element {
    tracing::error!(?panel, "panel received output for another panel");
    rsx! {
        PanelError { error: DashboardError::data(format!("unexpected response for {panel:?}")) }
    }
}
