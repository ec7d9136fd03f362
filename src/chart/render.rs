//! Scene construction
//!
//! [`render`] is a pure function of the dataset, the view state and the
//! chart configuration. It produces a [`ChartScene`]: every coordinate,
//! path and label the main chart and the overview strip need. Drawing it is
//! left to the SVG serializer or the browser frontend.

use serde::Serialize;

use super::brush::BrushSelection;
use super::curve::{linear_area, monotone_x};
use super::layout::ChartConfig;
use super::scale::{LinearScale, Tick, TimeScale, TimeWindow};
use super::view::ViewState;
use crate::dataset::{Dataset, Record, SeriesKey, Sex};
use crate::query::{overview_points, QueryExecutor, SeriesPair};

/// X tick spacing in years over the full range
pub const FULL_TICK_YEARS: i32 = 5;
/// X tick spacing in years inside a brushed window
pub const ZOOMED_TICK_YEARS: i32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    pub ticks: Vec<Tick>,
}

/// A drawn series line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesLine {
    pub sex: Sex,
    pub color: String,
    pub path: String,
}

/// A point marker; carries its record for the tooltip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub sex: Sex,
    pub color: String,
    pub cx: f64,
    pub cy: f64,
    pub record: Record,
}

/// Main chart geometry, in plot-area coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainPanel {
    pub window: TimeWindow,
    pub y_max: f64,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub lines: Vec<SeriesLine>,
    pub markers: Vec<Marker>,
}

/// Overview strip geometry, in strip coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewPanel {
    pub area: Option<String>,
    pub ticks: Vec<Tick>,
    pub selection: BrushSelection,
}

/// One fully computed render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartScene {
    pub key: Option<SeriesKey>,
    pub fell_back: bool,
    pub male_count: usize,
    pub female_count: usize,
    pub main: MainPanel,
    pub overview: OverviewPanel,
}

/// Query the dataset for the view's selection and build the scene
pub fn render(dataset: &Dataset, view: &ViewState, config: &ChartConfig) -> ChartScene {
    let series = QueryExecutor::new(dataset).execute(&view.selection);
    render_series(&series, view, config)
}

/// Upper bound of the y domain for a set of visible series
pub fn y_upper_bound(series: &SeriesPair, config: &ChartConfig) -> f64 {
    series
        .max_best()
        .map(|max| max * config.y_headroom)
        .unwrap_or(config.empty_y_max)
}

fn color_for(sex: Sex, config: &ChartConfig) -> &str {
    match sex {
        Sex::Male => &config.male_color,
        Sex::Female => &config.female_color,
    }
}

/// Build the scene for already aggregated series
pub fn render_series(series: &SeriesPair, view: &ViewState, config: &ChartConfig) -> ChartScene {
    let window = view.window(config);
    let x = TimeScale::new(window, (0.0, config.inner_width()));

    let y_max = y_upper_bound(series, config);
    let y = LinearScale::new((0.0, y_max), (config.inner_height(), 0.0));

    tracing::debug!(
        "Rendering: {} male records, {} female records",
        series.male.len(),
        series.female.len()
    );

    let mut lines = Vec::new();
    let mut markers = Vec::new();

    for &sex in Sex::all() {
        let color = color_for(sex, config);
        let plotted = series.plotted(sex);

        let points: Vec<(f64, f64)> = plotted
            .iter()
            .filter_map(|r| r.best.map(|best| (x.apply_date(r.year_date), y.apply(best))))
            .collect();

        if let Some(path) = monotone_x(&points) {
            lines.push(SeriesLine {
                sex,
                color: color.to_string(),
                path,
            });
        }

        markers.extend(plotted.iter().zip(points.iter()).map(|(record, &(cx, cy))| Marker {
            sex,
            color: color.to_string(),
            cx,
            cy,
            record: (*record).clone(),
        }));
    }

    let tick_years = if view.domain.is_zoomed() {
        ZOOMED_TICK_YEARS
    } else {
        FULL_TICK_YEARS
    };

    let main = MainPanel {
        window,
        y_max,
        x_axis: Axis {
            title: "Year".to_string(),
            ticks: x.year_ticks(tick_years),
        },
        y_axis: Axis {
            title: view.selection.category.axis_label(),
            ticks: y.axis_ticks(config.y_ticks),
        },
        lines,
        markers,
    };

    ChartScene {
        key: series.key,
        fell_back: series.fell_back,
        male_count: series.male.len(),
        female_count: series.female.len(),
        main,
        overview: render_overview(series, window, y_max, config),
    }
}

fn render_overview(
    series: &SeriesPair,
    window: TimeWindow,
    y_max: f64,
    config: &ChartConfig,
) -> OverviewPanel {
    let full = config.full_window();
    let strip = TimeScale::new(full, (0.0, config.brush_inner_width()));
    let height = config.brush_inner_height();
    let y = LinearScale::new((0.0, y_max), (height, 0.0));

    let points: Vec<(f64, f64)> = overview_points(&series.male, &series.female)
        .iter()
        .map(|p| (strip.apply_date(p.year_date), y.apply(p.best)))
        .collect();

    let mut ticks = Vec::with_capacity(2);
    if let (Some(first), Some(last)) = (full.start_datetime(), full.end_datetime()) {
        ticks.push(strip.year_tick(first.date()));
        ticks.push(strip.year_tick(last.date()));
    }

    OverviewPanel {
        area: linear_area(&points, height),
        ticks,
        selection: BrushSelection::from_window(window, &strip),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::view::TimeDomain;
    use crate::dataset::{Category, FilterKey, SexSeries};
    use crate::query::Selection;
    use std::collections::HashMap;

    fn rec(year: i32, sex: Sex, best: Option<f64>) -> Record {
        Record::new(year, sex, best)
    }

    fn pair(male: Vec<Record>, female: Vec<Record>) -> SeriesPair {
        SeriesPair {
            male,
            female,
            ..SeriesPair::default()
        }
    }

    #[test]
    fn test_empty_scene() {
        let config = ChartConfig::default();
        let scene = render_series(&SeriesPair::default(), &ViewState::default(), &config);

        assert_eq!(scene.main.y_max, 100.0);
        assert!(scene.main.lines.is_empty());
        assert!(scene.main.markers.is_empty());
        assert!(scene.overview.area.is_none());
        assert_eq!(scene.overview.ticks.len(), 2);
        assert_eq!(scene.main.y_axis.title, "Totals (All) [kg]");
    }

    #[test]
    fn test_y_domain_headroom() {
        let config = ChartConfig::default();
        let series = pair(
            vec![rec(2000, Sex::Male, Some(500.0))],
            vec![rec(2000, Sex::Female, Some(300.0))],
        );
        let scene = render_series(&series, &ViewState::default(), &config);
        assert!((scene.main.y_max - 530.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_has_marker_but_no_line() {
        let config = ChartConfig::default();
        let series = pair(
            vec![
                rec(1990, Sex::Male, Some(300.0)),
                rec(1995, Sex::Male, Some(320.0)),
            ],
            vec![rec(1990, Sex::Female, Some(200.0))],
        );
        let scene = render_series(&series, &ViewState::default(), &config);

        assert_eq!(scene.main.lines.len(), 1);
        assert_eq!(scene.main.lines[0].sex, Sex::Male);
        assert_eq!(scene.main.lines[0].color, "#1f77b4");
        assert_eq!(scene.main.markers.len(), 3);
        assert_eq!(
            scene.main.markers.iter().filter(|m| m.sex == Sex::Female).count(),
            1
        );
    }

    #[test]
    fn test_records_without_best_are_not_plotted() {
        let config = ChartConfig::default();
        let series = pair(
            vec![
                rec(1990, Sex::Male, Some(300.0)),
                rec(1991, Sex::Male, None),
            ],
            Vec::new(),
        );
        let scene = render_series(&series, &ViewState::default(), &config);

        assert!(scene.main.lines.is_empty());
        assert_eq!(scene.main.markers.len(), 1);
        assert_eq!(scene.male_count, 2);
    }

    #[test]
    fn test_marker_positions() {
        let config = ChartConfig::default();
        let series = pair(vec![rec(1971, Sex::Male, Some(200.0))], Vec::new());
        let scene = render_series(&series, &ViewState::default(), &config);

        let marker = &scene.main.markers[0];
        assert_eq!(marker.cx, 0.0);
        // 200 against a max of 212 in a 290px tall plot
        assert!((marker.cy - (290.0 - 200.0 / 212.0 * 290.0)).abs() < 1e-9);
        assert_eq!(marker.record.year, 1971);
    }

    #[test]
    fn test_dots_axis_title() {
        let config = ChartConfig::default();
        let view = ViewState::new(Selection::new(Category::Dots));
        let scene = render_series(&SeriesPair::default(), &view, &config);
        assert_eq!(scene.main.y_axis.title, "Dots points");
        assert_eq!(scene.main.x_axis.title, "Year");
    }

    #[test]
    fn test_tick_spacing_follows_zoom() {
        let config = ChartConfig::default();
        let full = render_series(&SeriesPair::default(), &ViewState::default(), &config);
        let labels: Vec<&str> = full.main.x_axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert!(labels.contains(&"1975"));
        assert!(!labels.contains(&"1976"));

        let window = TimeWindow::full_years(1990, 1999);
        let view = ViewState::default().with_domain(TimeDomain::Brushed(window));
        let zoomed = render_series(&SeriesPair::default(), &view, &config);
        let labels: Vec<&str> = zoomed.main.x_axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["1990", "1992", "1994", "1996", "1998"]);
    }

    #[test]
    fn test_overview_strip() {
        let config = ChartConfig::default();
        let series = pair(
            vec![
                rec(2000, Sex::Male, Some(400.0)),
                rec(2001, Sex::Male, Some(410.0)),
            ],
            vec![rec(2002, Sex::Female, Some(250.0))],
        );
        let scene = render_series(&series, &ViewState::default(), &config);

        let area = scene.overview.area.unwrap();
        assert!(area.starts_with('M'));
        assert!(area.ends_with('Z'));
        // three points forward, three back along the baseline
        assert_eq!(area.matches('L').count(), 5);

        let labels: Vec<&str> = scene.overview.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["1971", "2024"]);
        assert_eq!(scene.overview.selection, BrushSelection::full(890.0));
    }

    #[test]
    fn test_brushed_selection_in_strip() {
        let config = ChartConfig::default();
        let window = TimeWindow::full_years(1990, 1999);
        let view = ViewState::default().with_domain(TimeDomain::Brushed(window));
        let scene = render_series(&SeriesPair::default(), &view, &config);

        let sel = scene.overview.selection;
        assert!(sel.x0() > 0.0);
        assert!(sel.x1() < 890.0);
        assert_eq!(scene.main.window, window);
    }

    #[test]
    fn test_render_from_dataset() {
        let mut series = HashMap::new();
        series.insert(
            SeriesKey::new(Category::Bench, FilterKey::UNFILTERED),
            SexSeries::new(
                vec![
                    rec(2000, Sex::Male, Some(300.0)),
                    rec(2000, Sex::Male, Some(310.0)),
                    rec(2004, Sex::Male, Some(320.0)),
                ],
                Vec::new(),
            ),
        );
        let dataset = Dataset::new(Vec::new(), series);
        let view = ViewState::new(Selection::new(Category::Bench));

        let scene = render(&dataset, &view, &ChartConfig::default());
        assert_eq!(scene.male_count, 2);
        assert_eq!(scene.main.markers.len(), 2);
        assert!((scene.main.y_max - 320.0 * 1.06).abs() < 1e-9);
        assert!(!scene.fell_back);
    }
}
