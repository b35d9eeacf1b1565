use dioxus::prelude::*;

use super::{launch, mismatched, stamp_of, status_view, use_panel, PanelFrame, PanelState, StatCard};
use crate::charts::timeseries::{SeriesSummary, TimeSeriesChart};
use crate::core::api::{ApiClient, Metric};
use crate::core::format;
use crate::pipeline::PanelOutput;
use crate::render::PlotlyChart;
use crate::state::{CountryFilter, InteractionController, Mode, Panel, MAX_COMPARE, MIN_COMPARE};

#[component]
pub fn StatisticsPanel() -> Element {
    let state = use_panel(Panel::Statistics);
    let current = state.read();

    let body = match &*current {
        PanelState::Ready(PanelOutput::Statistics(snapshot), _) => rsx! {
            div { class: "stat-grid",
                StatCard { label: "Total attacks", value: format::format_count(snapshot.total_attacks as f64) }
                StatCard { label: "Countries", value: "{snapshot.unique_countries}" }
                StatCard { label: "Attack types", value: "{snapshot.attack_types}" }
                StatCard { label: "Period", value: "{snapshot.date_range}" }
                StatCard { label: "Most common attack", value: "{snapshot.most_common_attack}" }
                StatCard { label: "Most targeted industry", value: "{snapshot.most_targeted_port}" }
            }
        },
        PanelState::Ready(..) => mismatched(Panel::Statistics),
        pending => status_view(pending),
    };

    rsx! {
        PanelFrame { title: "At a glance", stamp: stamp_of(&current), {body} }
    }
}

fn apply_country(
    mut controller: Signal<InteractionController>,
    client: &ApiClient,
    target: Signal<PanelState>,
    value: String,
) {
    let filter = if value == "all" {
        CountryFilter::All
    } else {
        CountryFilter::Named(value)
    };
    let outcome = controller.write().set_country(filter);
    match outcome {
        Ok(request) => launch(client.clone(), controller, request, target),
        Err(err) => tracing::warn!(%err, "country selection rejected"),
    }
}

fn apply_mode(
    mut controller: Signal<InteractionController>,
    client: &ApiClient,
    target: Signal<PanelState>,
    mode: Mode,
) {
    let request = controller.write().set_mode(mode);
    if let Some(request) = request {
        launch(client.clone(), controller, request, target);
    }
}

fn apply_metric(
    mut controller: Signal<InteractionController>,
    client: &ApiClient,
    target: Signal<PanelState>,
    metric: Metric,
) {
    let request = controller.write().set_metric(metric);
    launch(client.clone(), controller, request, target);
}

fn metric_label(metric: Metric) -> &'static str {
    match metric {
        Metric::Count => "Attack count",
        Metric::Loss => "Financial loss",
    }
}

fn toggle_pick(mut picked: Signal<Vec<String>>, name: &str) {
    let mut list = picked.write();
    match list.iter().position(|entry| entry == name) {
        Some(pos) => {
            list.remove(pos);
        }
        None => list.push(name.to_string()),
    }
}

#[component]
pub fn TimeSeriesPanel() -> Element {
    let mut controller = use_context::<Signal<InteractionController>>();
    let client = use_context::<ApiClient>();
    let state = use_panel(Panel::TimeSeries);
    let countries = use_panel(Panel::Countries);
    let picked = use_signal(Vec::<String>::new);
    let mut compare_error = use_signal(|| Option::<String>::None);

    let interaction = controller.read().state().clone();
    let names: Vec<String> = match &*countries.read() {
        PanelState::Ready(PanelOutput::Countries(list), _) => list.countries.clone(),
        _ => Vec::new(),
    };
    let selected_country = match &interaction.country {
        CountryFilter::All => "all".to_string(),
        CountryFilter::Named(name) => name.clone(),
    };
    let single_active = interaction.mode == Mode::Single;

    let on_country = {
        let client = client.clone();
        move |evt: FormEvent| apply_country(controller, &client, state, evt.value())
    };
    let on_single = {
        let client = client.clone();
        move |_: MouseEvent| apply_mode(controller, &client, state, Mode::Single)
    };
    let on_compare = {
        let client = client.clone();
        move |_: MouseEvent| apply_mode(controller, &client, state, Mode::Compare)
    };
    let on_apply = {
        let client = client.clone();
        move |_: MouseEvent| {
            let outcome = controller.write().set_compare_set(picked.read().iter());
            match outcome {
                Ok(request) => {
                    compare_error.set(None);
                    launch(client.clone(), controller, request, state);
                }
                Err(err) => compare_error.set(Some(err.to_string())),
            }
        }
    };

    let current = state.read();
    let body = match &*current {
        PanelState::Ready(PanelOutput::TimeSeries(chart), _) => match chart {
            TimeSeriesChart::Single { spec, summary } => rsx! {
                PlotlyChart { id: Panel::TimeSeries.element_id().to_string(), spec: spec.clone() }
                SeriesStats { summary: summary.clone() }
            },
            TimeSeriesChart::Compare { spec, countries } => {
                let compared = countries.join(", ");
                rsx! {
                    PlotlyChart { id: Panel::TimeSeries.element_id().to_string(), spec: spec.clone() }
                    p { class: "panel__note", "Comparing {compared}" }
                }
            }
        },
        PanelState::Ready(..) => mismatched(Panel::TimeSeries),
        pending => status_view(pending),
    };

    rsx! {
        PanelFrame { title: "Attacks and losses over time", stamp: stamp_of(&current),
            div { class: "panel__controls",
                div { class: "toggle",
                    button {
                        class: if single_active { "toggle__option toggle__option--active" } else { "toggle__option" },
                        onclick: on_single,
                        "Single"
                    }
                    button {
                        class: if single_active { "toggle__option" } else { "toggle__option toggle__option--active" },
                        onclick: on_compare,
                        "Compare"
                    }
                }

                if single_active {
                    select {
                        class: "panel__select",
                        value: "{selected_country}",
                        onchange: on_country,
                        option { value: "all", "All countries" }
                        for name in names.iter() {
                            option { key: "{name}", value: "{name}", "{name}" }
                        }
                    }
                } else {
                    fieldset { class: "compare-picker",
                        legend { "Pick {MIN_COMPARE} to {MAX_COMPARE} countries" }
                        for name in names.iter().cloned() {
                            label { key: "{name}", class: "compare-picker__option",
                                input {
                                    r#type: "checkbox",
                                    checked: picked.read().contains(&name),
                                    onchange: {
                                        let name = name.clone();
                                        move |_: FormEvent| toggle_pick(picked, &name)
                                    },
                                }
                                "{name}"
                            }
                        }
                        button { class: "compare-picker__apply", onclick: on_apply, "Compare" }
                        if let Some(message) = compare_error() {
                            p { class: "panel__error", role: "alert", "{message}" }
                        }
                    }
                }
            }
            {body}
        }
    }
}

#[component]
fn SeriesStats(summary: SeriesSummary) -> Element {
    let scope = if summary.is_global() {
        "All countries".to_string()
    } else {
        summary.country.clone()
    };

    rsx! {
        div { class: "stat-grid",
            StatCard { label: "Scope", value: scope }
            StatCard { label: "Total attacks", value: format::format_count(summary.total) }
            StatCard { label: "Average per year", value: format::format_count(summary.average) }
            StatCard {
                label: "Attack trend",
                value: format::format_trend(summary.trend.as_ref()),
                class: format::trend_class(summary.trend.as_ref()).to_string(),
            }
            StatCard { label: "Total loss", value: format::format_millions(summary.total_loss) }
            StatCard {
                label: "Loss trend",
                value: format::format_trend(summary.loss_trend.as_ref()),
                class: format::trend_class(summary.loss_trend.as_ref()).to_string(),
            }
        }
    }
}

#[component]
pub fn IndustryPanel() -> Element {
    let controller = use_context::<Signal<InteractionController>>();
    let client = use_context::<ApiClient>();
    let state = use_panel(Panel::Industry);
    let metric = controller.read().state().metric;

    let current = state.read();
    let body = match &*current {
        PanelState::Ready(PanelOutput::Industry(chart), _) => {
            let top = chart.top.as_ref().map(|top| {
                let value = match chart.metric {
                    Metric::Count => format::format_count(top.value),
                    Metric::Loss => format::format_millions(top.value),
                };
                format!("{} ({value})", top.label)
            });
            rsx! {
                PlotlyChart { id: Panel::Industry.element_id().to_string(), spec: chart.spec.clone() }
                if let Some(top) = top {
                    p { class: "panel__note", "Most affected: {top}" }
                }
            }
        }
        PanelState::Ready(..) => mismatched(Panel::Industry),
        pending => status_view(pending),
    };

    rsx! {
        PanelFrame { title: "Industries", stamp: stamp_of(&current),
            div { class: "panel__controls toggle",
                for option in [Metric::Count, Metric::Loss] {
                    button {
                        class: if option == metric { "toggle__option toggle__option--active" } else { "toggle__option" },
                        onclick: {
                            let client = client.clone();
                            move |_: MouseEvent| apply_metric(controller, &client, state, option)
                        },
                        {metric_label(option)}
                    }
                }
            }
            {body}
        }
    }
}

#[component]
pub fn AttackTypesPanel() -> Element {
    let state = use_panel(Panel::AttackTypes);
    let current = state.read();

    let body = match &*current {
        PanelState::Ready(PanelOutput::AttackTypes(chart), _) => rsx! {
            PlotlyChart { id: Panel::AttackTypes.element_id().to_string(), spec: chart.spec.clone() }
            ul { class: "share-list",
                for (label, share) in chart.shares.iter() {
                    li { key: "{label}",
                        span { class: "share-list__label", "{label}" }
                        span { class: "share-list__value", {format::format_fraction(*share)} }
                    }
                }
            }
        },
        PanelState::Ready(..) => mismatched(Panel::AttackTypes),
        pending => status_view(pending),
    };

    rsx! {
        PanelFrame { title: "Attack types", stamp: stamp_of(&current), {body} }
    }
}
