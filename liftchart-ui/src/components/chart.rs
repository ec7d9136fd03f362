//! Chart Component
//!
//! Main time-series panel drawn as SVG from the current scene. Lines and
//! markers sit in a nested `<svg>` the size of the plot area, which clips
//! anything outside the visible time window.

use leptos::*;

use liftchart::chart::{Axis, ChartScene};
use liftchart::dataset::Sex;

use crate::state::use_global_state;

#[component]
pub fn Chart() -> impl IntoView {
    let state = use_global_state();
    let scene = state.scene;
    let config = state.config.clone();

    let width = config.width;
    let height = config.height;
    let inner_width = config.inner_width();
    let inner_height = config.inner_height();
    let marker_radius = config.marker_radius;

    let body = move || {
        let state = state.clone();
        scene.get().map(|scene| {
            let ChartScene { main, .. } = scene;

            let lines = main
                .lines
                .into_iter()
                .map(|line| {
                    view! {
                        <path
                            class=format!("line line-{}", sex_class(line.sex))
                            fill="none"
                            stroke=line.color
                            stroke-width="2"
                            opacity="0.9"
                            d=line.path
                        />
                    }
                })
                .collect_view();

            let markers = main
                .markers
                .into_iter()
                .map(|marker| {
                    let record = marker.record;
                    let enter = {
                        let state = state.clone();
                        move |ev: ev::MouseEvent| {
                            state.show_tooltip(&record, ev.page_x() as f64, ev.page_y() as f64)
                        }
                    };
                    let over = {
                        let state = state.clone();
                        move |ev: ev::MouseEvent| {
                            state.move_tooltip(ev.page_x() as f64, ev.page_y() as f64)
                        }
                    };
                    let leave = {
                        let state = state.clone();
                        move |_: ev::MouseEvent| state.hide_tooltip()
                    };

                    view! {
                        <circle
                            class=format!("dot-{}", sex_class(marker.sex))
                            r=marker_radius
                            cx=marker.cx
                            cy=marker.cy
                            fill=marker.color
                            stroke="#fff"
                            on:mouseenter=enter
                            on:mousemove=over
                            on:mouseleave=leave
                        />
                    }
                })
                .collect_view();

            view! {
                <XAxis axis=main.x_axis.clone() width=inner_width height=inner_height />
                <YAxis axis=main.y_axis.clone() height=inner_height />

                <text
                    class="axis-label"
                    x={inner_width / 2.0}
                    y={inner_height + 40.0}
                    text-anchor="middle"
                >
                    {main.x_axis.title}
                </text>
                <text
                    class="axis-label"
                    transform="rotate(-90)"
                    x={-inner_height / 2.0}
                    y="-50"
                    text-anchor="middle"
                >
                    {main.y_axis.title}
                </text>

                <svg width=inner_width height=inner_height overflow="hidden">
                    <g>{lines}</g>
                    <g>{markers}</g>
                </svg>
            }
        })
    };

    view! {
        <svg
            id="chart"
            viewBox=format!("0 0 {} {}", width, height)
            preserveAspectRatio="xMidYMid meet"
            font-family="sans-serif"
            font-size="10"
        >
            <g transform=format!("translate({},{})", config.margin.left, config.margin.top)>
                {body}
            </g>
        </svg>
    }
}

fn sex_class(sex: Sex) -> &'static str {
    match sex {
        Sex::Male => "m",
        Sex::Female => "f",
    }
}

/// Bottom axis with ticks below the line
#[component]
pub fn XAxis(axis: Axis, width: f64, height: f64) -> impl IntoView {
    view! {
        <g class="x axis" transform=format!("translate(0,{})", height)>
            <path class="domain" stroke="currentColor" fill="none" d=format!("M0,6V0H{}V6", width) />
            {axis
                .ticks
                .into_iter()
                .map(|tick| {
                    view! {
                        <g class="tick" transform=format!("translate({},0)", tick.position)>
                            <line stroke="currentColor" y2="6" />
                            <text fill="currentColor" y="9" dy="0.71em" text-anchor="middle">
                                {tick.label}
                            </text>
                        </g>
                    }
                })
                .collect_view()}
        </g>
    }
}

/// Left axis with ticks to the left of the line
#[component]
fn YAxis(axis: Axis, height: f64) -> impl IntoView {
    view! {
        <g class="y axis">
            <path class="domain" stroke="currentColor" fill="none" d=format!("M-6,{}H0V0H-6", height) />
            {axis
                .ticks
                .into_iter()
                .map(|tick| {
                    view! {
                        <g class="tick" transform=format!("translate(0,{})", tick.position)>
                            <line stroke="currentColor" x2="-6" />
                            <text fill="currentColor" x="-9" dy="0.32em" text-anchor="end">
                                {tick.label}
                            </text>
                        </g>
                    }
                })
                .collect_view()}
        </g>
    }
}
