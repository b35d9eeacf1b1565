use dioxus::prelude::*;
use once_cell::sync::OnceCell;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Link constructors supplied by the launcher, so `ui` never sees its
/// `Route` enum. Each one wraps the label it is given in a styled `Link`.
///
/// ```ignore
/// register_nav(NavBuilder {
///     home: |label| rsx!(Link { class: "navbar__link", to: Route::Home {}, "{label}" }),
///     // ...
/// });
/// ```
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub overview: fn(label: &str) -> Element,
    pub map: fn(label: &str) -> Element,
    pub charts: fn(label: &str) -> Element,
    pub advanced: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

/// First registration wins; later calls are ignored.
pub fn register_nav(builder: NavBuilder) {
    if NAV_BUILDER.set(builder).is_err() {
        tracing::debug!("navigation already registered");
    }
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    let period = &crate::core::config::current().period_label;
    let links = NAV_BUILDER.get().map(|b| {
        rsx! {
            nav { class: "navbar__links",
                {(b.home)("Home")}
                {(b.overview)("Overview")}
                {(b.map)("Map")}
                {(b.charts)("Charts")}
                {(b.advanced)("Advanced")}
            }
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }

        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Cyberdash" }
                    }
                    span { class: "navbar__brand-subtitle", "Cyber threat losses, {period}" }
                }

                if let Some(links) = links {
                    {links}
                } else {
                    nav { class: "navbar__links", {children} }
                }
            }
        }
    }
}
