//! Secondary aggregates the backend does not return in display-ready form.

mod extrema;
mod summary;
mod trend;

pub use extrema::{extremes, Extremes, Labelled};
pub(crate) use summary::mean;
pub use summary::{summarize_categories, ObservationSummary};
pub use trend::{Trend, TrendDirection};
