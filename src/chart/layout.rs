//! Chart configuration and layout
//!
//! Dimensions, margins, colors and the configured year range. Deserializable
//! so the `[chart]` section of the config file maps straight onto it.

use serde::{Deserialize, Serialize};

use super::scale::TimeWindow;

/// Space around a plot area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// First year of the x domain (January 1st)
    #[serde(default = "default_start_year")]
    pub start_year: i32,

    /// Last year of the x domain (December 31st)
    #[serde(default = "default_end_year")]
    pub end_year: i32,

    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    #[serde(default = "default_margin")]
    pub margin: Margin,

    /// Height of the overview strip below the main chart
    #[serde(default = "default_brush_height")]
    pub brush_height: f64,

    #[serde(default = "default_brush_margin")]
    pub brush_margin: Margin,

    #[serde(default = "default_male_color")]
    pub male_color: String,

    #[serde(default = "default_female_color")]
    pub female_color: String,

    #[serde(default = "default_overview_color")]
    pub overview_color: String,

    /// Y maximum is the largest visible value times this factor
    #[serde(default = "default_y_headroom")]
    pub y_headroom: f64,

    /// Y maximum when nothing is visible
    #[serde(default = "default_empty_y_max")]
    pub empty_y_max: f64,

    /// Approximate number of y axis ticks
    #[serde(default = "default_y_ticks")]
    pub y_ticks: usize,

    #[serde(default = "default_marker_radius")]
    pub marker_radius: f64,

    /// Number of federations offered by the federation selector
    #[serde(default = "default_top_federations")]
    pub top_federations: usize,
}

fn default_start_year() -> i32 {
    1971
}

fn default_end_year() -> i32 {
    2024
}

fn default_width() -> f64 {
    1000.0
}

fn default_height() -> f64 {
    420.0
}

fn default_margin() -> Margin {
    Margin::new(20.0, 40.0, 110.0, 70.0)
}

fn default_brush_height() -> f64 {
    100.0
}

fn default_brush_margin() -> Margin {
    Margin::new(10.0, 40.0, 30.0, 70.0)
}

fn default_male_color() -> String {
    "#1f77b4".to_string()
}

fn default_female_color() -> String {
    "#ff6fb3".to_string()
}

fn default_overview_color() -> String {
    "#4a90e2".to_string()
}

fn default_y_headroom() -> f64 {
    1.06
}

fn default_empty_y_max() -> f64 {
    100.0
}

fn default_y_ticks() -> usize {
    6
}

fn default_marker_radius() -> f64 {
    4.0
}

fn default_top_federations() -> usize {
    20
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            brush_height: default_brush_height(),
            brush_margin: default_brush_margin(),
            male_color: default_male_color(),
            female_color: default_female_color(),
            overview_color: default_overview_color(),
            y_headroom: default_y_headroom(),
            empty_y_max: default_empty_y_max(),
            y_ticks: default_y_ticks(),
            marker_radius: default_marker_radius(),
            top_federations: default_top_federations(),
        }
    }
}

impl ChartConfig {
    /// Width of the plot area, shared by the main chart and the strip
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn brush_inner_width(&self) -> f64 {
        self.width - self.brush_margin.left - self.brush_margin.right
    }

    pub fn brush_inner_height(&self) -> f64 {
        self.brush_height - self.brush_margin.top - self.brush_margin.bottom
    }

    /// The configured x domain: January 1st of the first year to December
    /// 31st of the last
    pub fn full_window(&self) -> TimeWindow {
        TimeWindow::full_years(self.start_year, self.end_year)
    }

    /// Check the configuration describes a drawable chart
    pub fn validate(&self) -> Result<(), String> {
        if self.start_year > self.end_year {
            return Err(format!(
                "start_year {} is after end_year {}",
                self.start_year, self.end_year
            ));
        }
        if self.inner_width() <= 0.0 || self.inner_height() <= 0.0 {
            return Err("margins leave no room for the main chart".to_string());
        }
        if self.brush_inner_width() <= 0.0 || self.brush_inner_height() <= 0.0 {
            return Err("margins leave no room for the overview strip".to_string());
        }
        if !(self.y_headroom.is_finite() && self.y_headroom > 0.0) {
            return Err(format!("y_headroom must be positive, got {}", self.y_headroom));
        }
        if !(self.empty_y_max.is_finite() && self.empty_y_max > 0.0) {
            return Err(format!("empty_y_max must be positive, got {}", self.empty_y_max));
        }
        Ok(())
    }
}
