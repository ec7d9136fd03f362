//! SVG serialization of a [`ChartScene`]
//!
//! Produces either the two panels as separate documents (`chart` and
//! `brush`) or one document with the overview strip stacked under the main
//! chart. Marker tooltips become `<title>` elements.

use std::fmt::{self, Write};

use super::curve::num;
use super::layout::ChartConfig;
use super::render::{Axis, ChartScene};
use super::tooltip::TooltipContent;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Escape text for element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn open_svg(out: &mut String, id: &str, width: f64, height: f64) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="{SVG_NS}" id="{id}" width="{w}" height="{h}" viewBox="0 0 {w} {h}" preserveAspectRatio="xMidYMid meet" font-family="sans-serif" font-size="10">"#,
        w = num(width),
        h = num(height),
    )
}

fn write_x_axis(out: &mut String, axis: &Axis, width: f64, height: f64) -> fmt::Result {
    writeln!(
        out,
        r#"<g class="x axis" transform="translate(0,{})">"#,
        num(height)
    )?;
    writeln!(
        out,
        r#"<path class="domain" stroke="currentColor" fill="none" d="M0,6V0H{}V6"/>"#,
        num(width)
    )?;
    for tick in &axis.ticks {
        writeln!(
            out,
            r#"<g class="tick" transform="translate({},0)"><line stroke="currentColor" y2="6"/><text fill="currentColor" y="9" dy="0.71em" text-anchor="middle">{}</text></g>"#,
            num(tick.position),
            escape(&tick.label)
        )?;
    }
    writeln!(out, "</g>")
}

fn write_y_axis(out: &mut String, axis: &Axis, height: f64) -> fmt::Result {
    writeln!(out, r#"<g class="y axis">"#)?;
    writeln!(
        out,
        r#"<path class="domain" stroke="currentColor" fill="none" d="M-6,{}H0V0H-6"/>"#,
        num(height)
    )?;
    for tick in &axis.ticks {
        writeln!(
            out,
            r#"<g class="tick" transform="translate(0,{})"><line stroke="currentColor" x2="-6"/><text fill="currentColor" x="-9" dy="0.32em" text-anchor="end">{}</text></g>"#,
            num(tick.position),
            escape(&tick.label)
        )?;
    }
    writeln!(out, "</g>")
}

fn write_main(out: &mut String, scene: &ChartScene, config: &ChartConfig) -> fmt::Result {
    let width = config.inner_width();
    let height = config.inner_height();
    let main = &scene.main;

    writeln!(
        out,
        r#"<g transform="translate({},{})">"#,
        num(config.margin.left),
        num(config.margin.top)
    )?;
    writeln!(
        out,
        r#"<clipPath id="clip"><rect width="{}" height="{}"/></clipPath>"#,
        num(width),
        num(height)
    )?;

    write_x_axis(out, &main.x_axis, width, height)?;
    write_y_axis(out, &main.y_axis, height)?;

    writeln!(
        out,
        r#"<text class="axis-label" x="{}" y="{}" text-anchor="middle">{}</text>"#,
        num(width / 2.0),
        num(height + 40.0),
        escape(&main.x_axis.title)
    )?;
    writeln!(
        out,
        r#"<text class="axis-label" transform="rotate(-90)" x="{}" y="-50" text-anchor="middle">{}</text>"#,
        num(-height / 2.0),
        escape(&main.y_axis.title)
    )?;

    writeln!(out, r#"<g clip-path="url(#clip)">"#)?;
    for line in &main.lines {
        writeln!(
            out,
            r#"<path class="line line-{}" fill="none" stroke="{}" stroke-width="2" opacity="0.9" d="{}"/>"#,
            line.sex.code().to_lowercase(),
            escape(&line.color),
            line.path
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(out, r#"<g clip-path="url(#clip)">"#)?;
    for marker in &main.markers {
        let tooltip = TooltipContent::from_record(&marker.record);
        writeln!(
            out,
            r##"<circle class="dot-{}" r="{}" cx="{}" cy="{}" fill="{}" stroke="#fff"><title>{}</title></circle>"##,
            marker.sex.code().to_lowercase(),
            num(config.marker_radius),
            num(marker.cx),
            num(marker.cy),
            escape(&marker.color),
            escape(&tooltip.text())
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(out, "</g>")
}

fn write_overview(out: &mut String, scene: &ChartScene, config: &ChartConfig) -> fmt::Result {
    let width = config.brush_inner_width();
    let height = config.brush_inner_height();
    let overview = &scene.overview;

    writeln!(
        out,
        r#"<g transform="translate({},{})">"#,
        num(config.brush_margin.left),
        num(config.brush_margin.top)
    )?;

    if let Some(area) = &overview.area {
        writeln!(
            out,
            r#"<path class="brush-area" fill="{}" opacity="0.2" d="{}"/>"#,
            escape(&config.overview_color),
            area
        )?;
    }

    let axis = Axis {
        title: String::new(),
        ticks: overview.ticks.clone(),
    };
    write_x_axis(out, &axis, width, height)?;

    writeln!(
        out,
        r##"<g class="brush"><rect class="overlay" fill="none" pointer-events="all" width="{}" height="{}"/><rect class="selection" fill="#777" fill-opacity="0.3" stroke="#fff" x="{}" width="{}" height="{}"/></g>"##,
        num(width),
        num(height),
        num(overview.selection.x0()),
        num(overview.selection.width()),
        num(height)
    )?;

    writeln!(out, "</g>")
}

fn document(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // writing into a String never fails
    let _ = write(&mut out);
    out
}

/// Main chart as a standalone document
pub fn main_svg(scene: &ChartScene, config: &ChartConfig) -> String {
    document(|out| {
        open_svg(out, "chart", config.width, config.height)?;
        write_main(out, scene, config)?;
        writeln!(out, "</svg>")
    })
}

/// Overview strip as a standalone document
pub fn brush_svg(scene: &ChartScene, config: &ChartConfig) -> String {
    document(|out| {
        open_svg(out, "brush", config.width, config.brush_height)?;
        write_overview(out, scene, config)?;
        writeln!(out, "</svg>")
    })
}

/// Both panels in one document, the strip under the main chart
pub fn to_svg(scene: &ChartScene, config: &ChartConfig) -> String {
    document(|out| {
        open_svg(out, "liftchart", config.width, config.height + config.brush_height)?;
        writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(out, r#"<g id="chart">"#)?;
        write_main(out, scene, config)?;
        writeln!(out, "</g>")?;
        writeln!(
            out,
            r#"<g id="brush" transform="translate(0,{})">"#,
            num(config.height)
        )?;
        write_overview(out, scene, config)?;
        writeln!(out, "</g>")?;
        writeln!(out, "</svg>")
    })
}
