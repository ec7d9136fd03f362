//! View state
//!
//! Everything a render depends on besides the data: the selectors and the
//! current time domain. Transitions consume the state and return the next
//! one; nothing mutates a state that a render is reading.

use serde::{Deserialize, Serialize};

use super::brush::BrushSelection;
use super::layout::ChartConfig;
use super::scale::{TimeScale, TimeWindow};
use crate::query::Selection;

/// X domain of the main chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TimeDomain {
    /// The configured full year range
    #[default]
    Full,
    /// A sub-window chosen with the brush
    Brushed(TimeWindow),
}

impl TimeDomain {
    pub fn resolve(&self, config: &ChartConfig) -> TimeWindow {
        match self {
            TimeDomain::Full => config.full_window(),
            TimeDomain::Brushed(window) => *window,
        }
    }

    pub fn is_zoomed(&self) -> bool {
        matches!(self, TimeDomain::Brushed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub selection: Selection,
    pub domain: TimeDomain,
}

impl ViewState {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            domain: TimeDomain::Full,
        }
    }

    /// New selector state; the time domain goes back to the full range
    pub fn with_selection(self, selection: Selection) -> Self {
        Self::new(selection)
    }

    pub fn with_domain(self, domain: TimeDomain) -> Self {
        Self { domain, ..self }
    }

    /// Apply a finished brush gesture over the overview strip
    ///
    /// An empty gesture leaves the domain as it was. Selecting the whole
    /// strip is the same as resetting.
    pub fn with_brush(self, selection: Option<BrushSelection>, strip: &TimeScale) -> Self {
        let Some(selection) = selection else {
            return self;
        };
        let window = selection.to_window(strip);
        let domain = if window == strip.window() {
            TimeDomain::Full
        } else {
            TimeDomain::Brushed(window)
        };
        self.with_domain(domain)
    }

    /// Back to the full time range
    pub fn reset(self) -> Self {
        self.with_domain(TimeDomain::Full)
    }

    pub fn window(&self, config: &ChartConfig) -> TimeWindow {
        self.domain.resolve(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Category, Equipment};

    fn strip(config: &ChartConfig) -> TimeScale {
        TimeScale::new(config.full_window(), (0.0, config.brush_inner_width()))
    }

    #[test]
    fn test_default_is_full() {
        let config = ChartConfig::default();
        let view = ViewState::default();
        assert_eq!(view.domain, TimeDomain::Full);
        assert_eq!(view.window(&config), config.full_window());
        assert_eq!(view.selection.category, Category::TotalsAll);
    }

    #[test]
    fn test_brush_then_selection_change_resets() {
        let config = ChartConfig::default();
        let scale = strip(&config);

        let view = ViewState::default().with_brush(BrushSelection::new(100.0, 300.0, 890.0), &scale);
        assert!(view.domain.is_zoomed());

        let window = view.window(&config);
        assert_eq!(window.start, scale.invert(100.0));
        assert_eq!(window.end, scale.invert(300.0));

        let view = view.with_selection(Selection::new(Category::Squat).equipment(Equipment::Raw));
        assert_eq!(view.domain, TimeDomain::Full);
        assert_eq!(view.selection.category, Category::Squat);
    }

    #[test]
    fn test_empty_brush_keeps_domain() {
        let config = ChartConfig::default();
        let scale = strip(&config);

        let zoomed = ViewState::default().with_brush(BrushSelection::new(10.0, 20.0, 890.0), &scale);
        let after = zoomed.clone().with_brush(BrushSelection::new(50.0, 50.0, 890.0), &scale);
        assert_eq!(after, zoomed);
    }

    #[test]
    fn test_full_brush_is_full_domain() {
        let config = ChartConfig::default();
        let scale = strip(&config);

        let view = ViewState::default().with_brush(Some(BrushSelection::full(890.0)), &scale);
        assert_eq!(view.domain, TimeDomain::Full);
    }

    #[test]
    fn test_reset() {
        let window = TimeWindow::new(0, 1_000);
        let view = ViewState::default().with_domain(TimeDomain::Brushed(window));
        assert!(view.domain.is_zoomed());
        assert_eq!(view.reset().domain, TimeDomain::Full);
    }

    #[test]
    fn test_reset_after_brush_restores_configured_years() {
        let config = ChartConfig::default();
        let scale = strip(&config);

        let selection = BrushSelection::new(200.0, 450.0, config.brush_inner_width());
        let brushed = ViewState::default().with_brush(selection, &scale);
        assert!(brushed.domain.is_zoomed());

        let window = brushed.reset().window(&config);
        // 1971-01-01T00:00Z through 2024-12-31T00:00Z
        assert_eq!(window.start, 31_536_000_000);
        assert_eq!(window.end, 1_735_603_200_000);
        assert_eq!(
            window.start_datetime().map(|d| d.date()),
            chrono::NaiveDate::from_ymd_opt(1971, 1, 1)
        );
        assert_eq!(
            window.end_datetime().map(|d| d.date()),
            chrono::NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }
}
