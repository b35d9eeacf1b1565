//! Platform detection helpers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Native,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Native
        }
    }
}

/// Origin (`scheme://host:port`) of the hosting page, if running in a browser.
#[cfg(target_arch = "wasm32")]
pub fn page_origin() -> Option<String> {
    let origin = web_sys::window()?.location().origin().ok()?;
    if origin.is_empty() || origin == "null" {
        None
    } else {
        Some(origin)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_origin() -> Option<String> {
    None
}
