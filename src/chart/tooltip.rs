//! Marker tooltip
//!
//! Text content for a hovered record and the show/move/hide state machine
//! that positions the box next to the pointer.

use serde::Serialize;

use crate::dataset::Record;

/// Distance from the pointer to the box's top-left corner, in pixels
pub const POINTER_OFFSET: f64 = 14.0;

const MISSING: &str = "n/a";

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn kilos(value: Option<f64>) -> Option<String> {
    value
        .filter(|v| *v != 0.0 && !v.is_nan())
        .map(|v| format!("{:.1} kg", v))
}

/// Lines shown for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipContent {
    pub lines: Vec<String>,
}

impl TooltipContent {
    pub fn from_record(record: &Record) -> Self {
        let name = present(&record.name).unwrap_or("(unknown athlete)");
        let best = kilos(record.best).unwrap_or_else(|| MISSING.to_string());
        let bodyweight = kilos(record.bodyweight).unwrap_or_else(|| MISSING.to_string());
        let equipment = present(&record.equipment).unwrap_or(MISSING);
        let origin = match present(&record.country) {
            Some(country) => format!("{} • {}", country, present(&record.federation).unwrap_or("")),
            None => present(&record.federation).unwrap_or("").to_string(),
        };

        let lines = vec![
            name.to_string(),
            format!("Sex: {} • {}", record.sex, record.category),
            format!("Year: {} • {}", record.year, best),
            format!("BW: {} • Equipment: {}", bodyweight, equipment),
            origin,
            format!(
                "Division: {} • Tested: {}",
                present(&record.division).unwrap_or(MISSING),
                present(&record.tested).unwrap_or(MISSING)
            ),
            format!("Meet: {}", present(&record.meet).unwrap_or("")),
        ];

        Self { lines }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Tooltip visibility and position in page coordinates
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible {
        content: TooltipContent,
        left: f64,
        top: f64,
    },
}

impl TooltipState {
    /// Pointer entered a marker at page position (`x`, `y`)
    pub fn show(record: &Record, x: f64, y: f64) -> Self {
        TooltipState::Visible {
            content: TooltipContent::from_record(record),
            left: x + POINTER_OFFSET,
            top: y + POINTER_OFFSET,
        }
    }

    /// Follow the pointer; a hidden tooltip stays hidden
    pub fn move_to(self, x: f64, y: f64) -> Self {
        match self {
            TooltipState::Visible { content, .. } => TooltipState::Visible {
                content,
                left: x + POINTER_OFFSET,
                top: y + POINTER_OFFSET,
            },
            TooltipState::Hidden => TooltipState::Hidden,
        }
    }

    pub fn hide(self) -> Self {
        TooltipState::Hidden
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, TooltipState::Visible { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Sex;

    fn full_record() -> Record {
        let mut record = Record::new(2019, Sex::Female, Some(612.5))
            .name("Jane Lifter")
            .federation("IPF")
            .category("totals_all")
            .bodyweight(83.4);
        record.equipment = Some("Raw".to_string());
        record.tested = Some("Yes".to_string());
        record.division = Some("Open".to_string());
        record.country = Some("Norway".to_string());
        record.meet = Some("World Classic".to_string());
        record
    }

    #[test]
    fn test_full_record_lines() {
        let content = TooltipContent::from_record(&full_record());
        assert_eq!(
            content.lines,
            vec![
                "Jane Lifter",
                "Sex: F • totals_all",
                "Year: 2019 • 612.5 kg",
                "BW: 83.4 kg • Equipment: Raw",
                "Norway • IPF",
                "Division: Open • Tested: Yes",
                "Meet: World Classic",
            ]
        );
    }

    #[test]
    fn test_fallbacks() {
        let mut record = Record::new(1985, Sex::Male, None).category("squat");
        record.federation = Some(String::new());
        let content = TooltipContent::from_record(&record);

        assert_eq!(content.lines[0], "(unknown athlete)");
        assert_eq!(content.lines[2], "Year: 1985 • n/a");
        assert_eq!(content.lines[3], "BW: n/a • Equipment: n/a");
        assert_eq!(content.lines[4], "");
        assert_eq!(content.lines[5], "Division: n/a • Tested: n/a");
        assert_eq!(content.lines[6], "Meet: ");
        assert_eq!(content.text().lines().count(), 7);
    }

    #[test]
    fn test_zero_values_show_missing() {
        let record = Record::new(2000, Sex::Male, Some(0.0)).bodyweight(0.0);
        let content = TooltipContent::from_record(&record);
        assert_eq!(content.lines[2], "Year: 2000 • n/a");
        assert!(content.lines[3].starts_with("BW: n/a"));
    }

    #[test]
    fn test_state_transitions() {
        let record = full_record();

        let state = TooltipState::show(&record, 100.0, 50.0);
        match &state {
            TooltipState::Visible { left, top, .. } => assert_eq!((*left, *top), (114.0, 64.0)),
            TooltipState::Hidden => panic!("expected visible tooltip"),
        }

        let state = state.move_to(200.0, 80.0);
        match &state {
            TooltipState::Visible { left, top, .. } => assert_eq!((*left, *top), (214.0, 94.0)),
            TooltipState::Hidden => panic!("expected visible tooltip"),
        }

        let state = state.hide();
        assert!(!state.is_visible());
        assert_eq!(state.move_to(1.0, 1.0), TooltipState::Hidden);
    }
}
