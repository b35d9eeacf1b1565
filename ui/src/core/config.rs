//! Dashboard configuration.
//!
//! The API base defaults to the page origin in the browser and to a local
//! development server natively. A build-time `CYBERDASH_API_BASE` overrides both;
//! launchers may also [`install`] a config before the first panel loads.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::platform;

const DEV_API_BASE: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Scheme + host (+ port) the `/api/*` paths are appended to.
    pub api_base: String,
    /// Dataset span shown in chart titles.
    #[serde(default = "default_period_label")]
    pub period_label: String,
}

fn default_period_label() -> String {
    "2015-2024".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let api_base = option_env!("CYBERDASH_API_BASE")
            .map(str::to_string)
            .or_else(platform::page_origin)
            .unwrap_or_else(|| DEV_API_BASE.to_string());
        Self {
            api_base,
            period_label: default_period_label(),
        }
    }
}

static CONFIG: OnceCell<DashboardConfig> = OnceCell::new();

/// Install the process-wide config. Returns `false` if one was already set.
pub fn install(config: DashboardConfig) -> bool {
    CONFIG.set(config).is_ok()
}

/// The installed config, or defaults when none was installed.
pub fn current() -> &'static DashboardConfig {
    CONFIG.get_or_init(DashboardConfig::default)
}
