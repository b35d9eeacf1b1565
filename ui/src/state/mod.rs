//! Interaction state and the controller that turns UI events into panel loads.
//!
//! The controller is plain data. Components hold it in a context
//! `Signal<InteractionController>`; every setter validates first and only then
//! mutates, so a rejected event leaves both state and generations untouched.

mod gate;

pub use gate::{RequestGate, Ticket};

use std::collections::HashSet;

use crate::core::api::{Endpoint, Metric, TimeSeriesQuery};
use crate::core::{DashboardError, Result};

pub const MIN_COMPARE: usize = 2;
pub const MAX_COMPARE: usize = 5;

/// Every independently loaded region of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Heatmap,
    Treemap,
    Sankey,
    Map,
    TimeSeries,
    Industry,
    AttackTypes,
    Severity,
    Defense,
    Statistics,
    Countries,
}

impl Panel {
    pub const COUNT: usize = 11;

    pub(crate) fn index(self) -> usize {
        match self {
            Panel::Heatmap => 0,
            Panel::Treemap => 1,
            Panel::Sankey => 2,
            Panel::Map => 3,
            Panel::TimeSeries => 4,
            Panel::Industry => 5,
            Panel::AttackTypes => 6,
            Panel::Severity => 7,
            Panel::Defense => 8,
            Panel::Statistics => 9,
            Panel::Countries => 10,
        }
    }

    /// DOM id of the panel's chart container.
    pub fn element_id(self) -> &'static str {
        match self {
            Panel::Heatmap => "heatmap-chart",
            Panel::Treemap => "treemap-chart",
            Panel::Sankey => "sankey-chart",
            Panel::Map => "map-chart",
            Panel::TimeSeries => "time-series-chart",
            Panel::Industry => "industry-chart",
            Panel::AttackTypes => "attack-types-chart",
            Panel::Severity => "severity-chart",
            Panel::Defense => "defense-chart",
            Panel::Statistics => "statistics-summary",
            Panel::Countries => "country-list",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CountryFilter {
    #[default]
    All,
    Named(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Single,
    Compare,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub metric: Metric,
    pub country: CountryFilter,
    /// Committed compare set, always empty or `MIN_COMPARE..=MAX_COMPARE` names.
    pub compare_set: Vec<String>,
    pub mode: Mode,
}

impl InteractionState {
    fn has_compare_set(&self) -> bool {
        (MIN_COMPARE..=MAX_COMPARE).contains(&self.compare_set.len())
    }

    /// The endpoint a panel should fetch under the current state.
    pub fn endpoint_for(&self, panel: Panel) -> Endpoint {
        match panel {
            Panel::Heatmap => Endpoint::Heatmap,
            Panel::Treemap => Endpoint::Treemap,
            Panel::Sankey => Endpoint::Sankey,
            Panel::Map => Endpoint::MapData,
            Panel::TimeSeries => Endpoint::TimeSeries(self.time_series_query()),
            Panel::Industry => Endpoint::IndustryAnalysis(self.metric),
            Panel::AttackTypes => Endpoint::AttackTypes,
            Panel::Severity => Endpoint::SeverityByType,
            Panel::Defense => Endpoint::DefenseResolution,
            Panel::Statistics => Endpoint::Statistics,
            Panel::Countries => Endpoint::Countries,
        }
    }

    fn time_series_query(&self) -> TimeSeriesQuery {
        match (self.mode, &self.country) {
            (Mode::Compare, _) if self.has_compare_set() => {
                TimeSeriesQuery::Compare(self.compare_set.clone())
            }
            (_, CountryFilter::All) => TimeSeriesQuery::All,
            (_, CountryFilter::Named(name)) => TimeSeriesQuery::Country(name.clone()),
        }
    }
}

/// One panel load: what to fetch and the ticket that must still be current
/// when the response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub panel: Panel,
    pub endpoint: Endpoint,
    pub ticket: Ticket,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionController {
    state: InteractionState,
    gate: RequestGate,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Initial (or manual) load of any panel under the current state.
    pub fn request(&mut self, panel: Panel) -> LoadRequest {
        LoadRequest {
            panel,
            endpoint: self.state.endpoint_for(panel),
            ticket: self.gate.issue(panel),
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.gate.is_current(ticket)
    }

    pub fn set_metric(&mut self, metric: Metric) -> LoadRequest {
        self.state.metric = metric;
        self.request(Panel::Industry)
    }

    /// Select the single-country scope. Switches back to single mode.
    pub fn set_country(&mut self, country: CountryFilter) -> Result<LoadRequest> {
        let country = match country {
            CountryFilter::Named(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(DashboardError::data("country name is empty"));
                }
                if name.eq_ignore_ascii_case("all") {
                    CountryFilter::All
                } else {
                    CountryFilter::Named(name.to_string())
                }
            }
            CountryFilter::All => CountryFilter::All,
        };
        self.state.country = country;
        self.state.mode = Mode::Single;
        Ok(self.request(Panel::TimeSeries))
    }

    /// Commit a compare set of distinct names and switch to compare mode.
    pub fn set_compare_set<I, S>(&mut self, countries: I) -> Result<LoadRequest>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = distinct_names(countries)?;
        if !(MIN_COMPARE..=MAX_COMPARE).contains(&set.len()) {
            return Err(DashboardError::data(format!(
                "choose {MIN_COMPARE} to {MAX_COMPARE} countries to compare, got {}",
                set.len()
            )));
        }
        self.state.compare_set = set;
        self.state.mode = Mode::Compare;
        Ok(self.request(Panel::TimeSeries))
    }

    /// Switch modes. Entering compare mode without a committed set changes the
    /// mode but has nothing to load yet.
    pub fn set_mode(&mut self, mode: Mode) -> Option<LoadRequest> {
        self.state.mode = mode;
        match mode {
            Mode::Compare if !self.state.has_compare_set() => None,
            Mode::Compare | Mode::Single => Some(self.request(Panel::TimeSeries)),
        }
    }
}

fn distinct_names<I, S>(countries: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut set = Vec::new();
    for country in countries {
        let name = country.as_ref().trim();
        if name.is_empty() {
            return Err(DashboardError::data("compare set contains an empty name"));
        }
        if !seen.insert(name.to_string()) {
            return Err(DashboardError::data(format!(
                "`{name}` appears twice in the compare set"
            )));
        }
        set.push(name.to_string());
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTRIES: [&str; 6] = ["France", "Japan", "Brazil", "India", "UK", "USA"];

    #[test]
    fn compare_set_bounds_are_enforced_before_any_request() {
        let mut controller = InteractionController::new();
        let before = controller.clone();

        assert!(controller.set_compare_set(&COUNTRIES[..1]).is_err());
        assert!(controller.set_compare_set(COUNTRIES).is_err());
        assert_eq!(controller, before);

        let two = controller.set_compare_set(&COUNTRIES[..2]).unwrap();
        assert_eq!(two.panel, Panel::TimeSeries);
        let five = controller.set_compare_set(&COUNTRIES[..5]).unwrap();
        assert_eq!(
            five.endpoint,
            Endpoint::TimeSeries(TimeSeriesQuery::Compare(
                COUNTRIES[..5].iter().map(|c| c.to_string()).collect()
            ))
        );
        assert_eq!(controller.state().mode, Mode::Compare);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut controller = InteractionController::new();
        assert!(controller.set_compare_set(["France", "France"]).is_err());
        assert!(controller.state().compare_set.is_empty());
    }

    #[test]
    fn compare_mode_without_a_set_loads_nothing() {
        let mut controller = InteractionController::new();
        assert!(controller.set_mode(Mode::Compare).is_none());
        assert_eq!(controller.state().mode, Mode::Compare);

        controller.set_compare_set(["France", "Japan"]).unwrap();
        controller.set_mode(Mode::Single);
        assert!(controller.set_mode(Mode::Compare).is_some());
    }

    #[test]
    fn metric_change_targets_only_the_industry_panel() {
        let mut controller = InteractionController::new();
        let series = controller.request(Panel::TimeSeries);
        let request = controller.set_metric(Metric::Loss);
        assert_eq!(request.panel, Panel::Industry);
        assert_eq!(request.endpoint, Endpoint::IndustryAnalysis(Metric::Loss));
        assert!(controller.is_current(&series.ticket));
    }

    #[test]
    fn newer_country_selection_makes_older_response_stale() {
        let mut controller = InteractionController::new();
        let first = controller
            .set_country(CountryFilter::Named("France".into()))
            .unwrap();
        let second = controller
            .set_country(CountryFilter::Named("Japan".into()))
            .unwrap();
        assert!(!controller.is_current(&first.ticket));
        assert!(controller.is_current(&second.ticket));
        assert_eq!(
            second.endpoint,
            Endpoint::TimeSeries(TimeSeriesQuery::Country("Japan".into()))
        );
    }

    #[test]
    fn selecting_a_country_leaves_compare_mode() {
        let mut controller = InteractionController::new();
        controller.set_compare_set(["France", "Japan"]).unwrap();
        let request = controller.set_country(CountryFilter::All).unwrap();
        assert_eq!(controller.state().mode, Mode::Single);
        assert_eq!(request.endpoint, Endpoint::TimeSeries(TimeSeriesQuery::All));
    }

    #[test]
    fn blank_country_is_rejected() {
        let mut controller = InteractionController::new();
        assert!(controller
            .set_country(CountryFilter::Named("  ".into()))
            .is_err());
    }
}
