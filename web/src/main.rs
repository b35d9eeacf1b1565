use dioxus::prelude::*;

use ui::components::{register_nav, AppNavbar, NavBuilder};
use ui::core::api::ApiClient;
use ui::core::config;
use ui::state::InteractionController;
use ui::views::{Advanced, Charts, Home, Map, Overview};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/overview")]
    Overview {},
    #[route("/map")]
    Map {},
    #[route("/charts")]
    Charts {},
    #[route("/advanced")]
    Advanced {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_overview(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Overview {},
        "{label}"
    })
}
fn nav_map(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Map {},
        "{label}"
    })
}
fn nav_charts(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Charts {},
        "{label}"
    })
}
fn nav_advanced(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Advanced {},
        "{label}"
    })
}

fn main() {
    if let Err(err) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("logger already initialised: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    register_nav(NavBuilder {
        home: nav_home,
        overview: nav_overview,
        map: nav_map,
        charts: nav_charts,
        advanced: nav_advanced,
    });

    // Fresh interaction state on every page load.
    use_context_provider(|| Signal::new(InteractionController::new()));
    use_context_provider(|| {
        let config = config::current();
        tracing::info!(api_base = %config.api_base, "dashboard starting");
        ApiClient::from_config(config)
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// Web layout: shared navbar above the routed page.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar {}
        main { class: "page-shell", Outlet::<Route> {} }
    }
}
