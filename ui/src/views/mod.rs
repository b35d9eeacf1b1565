mod advanced;
mod charts;
mod home;
mod map;
mod overview;

pub use advanced::Advanced;
pub use charts::Charts;
pub use home::Home;
pub use map::Map;
pub use overview::Overview;

use crate::state::Panel;

pub const OVERVIEW_PANELS: &[Panel] = &[Panel::Statistics, Panel::TimeSeries, Panel::Severity];
pub const CHARTS_PANELS: &[Panel] = &[Panel::Industry, Panel::AttackTypes, Panel::Defense];
pub const ADVANCED_PANELS: &[Panel] = &[Panel::Heatmap, Panel::Treemap, Panel::Sankey];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_sits_with_the_overview() {
        assert!(OVERVIEW_PANELS.contains(&Panel::Severity));
        assert!(!CHARTS_PANELS.contains(&Panel::Severity));
    }

    #[test]
    fn charts_page_groups_industry_attack_types_and_defense() {
        assert_eq!(
            CHARTS_PANELS,
            &[Panel::Industry, Panel::AttackTypes, Panel::Defense]
        );
        assert!(!OVERVIEW_PANELS.contains(&Panel::Industry));
        assert!(!OVERVIEW_PANELS.contains(&Panel::AttackTypes));
    }

    #[test]
    fn no_panel_is_placed_twice() {
        let mut seen = Vec::new();
        for panel in OVERVIEW_PANELS.iter().chain(CHARTS_PANELS).chain(ADVANCED_PANELS) {
            assert!(!seen.contains(panel), "{panel:?} appears on two pages");
            seen.push(*panel);
        }
    }
}
