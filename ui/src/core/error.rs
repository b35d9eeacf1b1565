//! Error taxonomy for panel loads. Every variant is terminal for the render cycle
//! that produced it and is shown inline in the owning panel only.

use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DashboardError {
    /// The transport call itself failed (network, CORS, non-2xx status).
    #[error("request failed: {0}")]
    Fetch(String),
    /// The backend answered with an explicit `error` field.
    #[error("{0}")]
    Payload(String),
    /// The payload is well-formed but unusable for rendering.
    #[error("invalid data: {0}")]
    Data(String),
}

impl DashboardError {
    pub fn data(message: impl Display) -> Self {
        Self::Data(message.to_string())
    }

    pub fn fetch(message: impl Display) -> Self {
        Self::Fetch(message.to_string())
    }

    /// Short label for the panel error badge.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "Network error",
            Self::Payload(_) => "Server error",
            Self::Data(_) => "Data error",
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        Self::fetch(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::data(err)
    }
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_message_is_verbatim() {
        let err = DashboardError::Payload("dataset not loaded".into());
        assert_eq!(err.to_string(), "dataset not loaded");
        assert_eq!(err.kind_label(), "Server error");
    }

    #[test]
    fn json_errors_become_data_errors() {
        let err: DashboardError = serde_json::from_str::<Vec<f64>>("[1, NaN]")
            .unwrap_err()
            .into();
        assert!(matches!(err, DashboardError::Data(_)));
    }
}
