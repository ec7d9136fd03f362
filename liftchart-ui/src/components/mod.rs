//! UI Components
//!
//! Leptos components for the records chart.

pub mod brush;
pub mod chart;
pub mod controls;
pub mod loading;
pub mod tooltip;

pub use brush::Brush;
pub use chart::Chart;
pub use controls::Controls;
pub use loading::Loading;
pub use tooltip::Tooltip;
