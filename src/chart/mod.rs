//! Liftchart Chart Engine
//!
//! DOM-free chart model:
//!
//! - **Layout**: dimensions, margins, colors, year range
//! - **Scales**: linear value axis with nice ticks, time axis over UTC ms
//! - **Curve**: monotone-x line paths and the overview area
//! - **View**: selectors plus time domain, replaced on every interaction
//! - **Brush**: pixel selections on the overview strip
//! - **Render**: pure scene construction
//! - **SVG**: static documents for the CLI
//! - **Tooltip**: marker hover content and positioning
//!
//! # Example
//!
//! ```rust,ignore
//! use liftchart::chart::{render, to_svg, ChartConfig, ViewState};
//!
//! let config = ChartConfig::default();
//! let view = ViewState::default();
//! let scene = render(&dataset, &view, &config);
//! std::fs::write("chart.svg", to_svg(&scene, &config))?;
//! ```

mod brush;
mod curve;
mod layout;
mod render;
mod scale;
mod svg;
mod tooltip;
mod view;

pub use brush::{BrushGesture, BrushSelection, MIN_EXTENT};
pub use curve::{linear_area, monotone_x, PathBuilder};
pub use layout::{ChartConfig, Margin};
pub use render::{
    render, render_series, y_upper_bound, Axis, ChartScene, MainPanel, Marker, OverviewPanel,
    SeriesLine, FULL_TICK_YEARS, ZOOMED_TICK_YEARS,
};
pub use scale::{date_millis, millis_datetime, LinearScale, Tick, TimeScale, TimeWindow};
pub use svg::{brush_svg, escape, main_svg, to_svg};
pub use tooltip::{TooltipContent, TooltipState, POINTER_OFFSET};
pub use view::{TimeDomain, ViewState};
