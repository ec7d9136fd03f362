//! Brush Component
//!
//! Overview strip under the main chart. Dragging across it selects a time
//! window; double-click restores the full range.

use leptos::*;
use wasm_bindgen::JsCast;

use liftchart::chart::{BrushSelection, ChartScene};

use super::chart::XAxis;
use crate::state::{use_global_state, GlobalState};

/// Pointer position in strip coordinates
///
/// The overlay rect covers exactly the strip's plot area, so its client
/// rectangle gives both the offset and the CSS scaling of the viewBox.
fn strip_x(ev: &ev::MouseEvent, strip_width: f64) -> Option<f64> {
    let target = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = target.get_bounding_client_rect();
    if rect.width() <= 0.0 {
        return None;
    }
    Some((ev.client_x() as f64 - rect.left()) / rect.width() * strip_width)
}

#[component]
pub fn Brush() -> impl IntoView {
    let state = use_global_state();
    let scene = state.scene;
    let config = state.config.clone();

    let width = config.width;
    let height = config.brush_height;
    let inner_width = config.brush_inner_width();
    let inner_height = config.brush_inner_height();
    let area_color = config.overview_color.clone();

    let on_down = {
        let state = state.clone();
        move |ev: ev::MouseEvent| {
            if let Some(x) = strip_x(&ev, inner_width) {
                ev.prevent_default();
                state.begin_brush(x);
            }
        }
    };
    let on_move = {
        let state = state.clone();
        move |ev: ev::MouseEvent| {
            if state.gesture.get_untracked().is_some() {
                if let Some(x) = strip_x(&ev, inner_width) {
                    state.drag_brush(x);
                }
            }
        }
    };
    let on_up = {
        let state = state.clone();
        move |_: ev::MouseEvent| state.end_brush()
    };
    let on_leave = {
        let state = state.clone();
        move |_: ev::MouseEvent| state.end_brush()
    };
    let on_dblclick = {
        let state = state.clone();
        move |_: ev::MouseEvent| state.reset_domain()
    };

    let selection = selection_memo(&state, scene, inner_width);

    view! {
        <svg
            id="brush"
            viewBox=format!("0 0 {} {}", width, height)
            preserveAspectRatio="xMidYMid meet"
            font-family="sans-serif"
            font-size="10"
        >
            <g transform=format!("translate({},{})", config.brush_margin.left, config.brush_margin.top)>
                {move || {
                    let color = area_color.clone();
                    scene.get().map(|scene| {
                        let ChartScene { overview, .. } = scene;
                        let axis = liftchart::chart::Axis {
                            title: String::new(),
                            ticks: overview.ticks,
                        };
                        view! {
                            {overview.area.map(|d| view! {
                                <path class="brush-area" fill=color opacity="0.2" d=d />
                            })}
                            <XAxis axis=axis width=inner_width height=inner_height />
                        }
                    })
                }}

                // Hidden until a scene exists
                <g
                    class="brush"
                    display=move || scene.with(brush_display)
                >
                    <rect
                        class="selection"
                        fill="#777"
                        fill-opacity="0.3"
                        stroke="#fff"
                        x=move || selection.get().x0()
                        width=move || selection.get().width()
                        height=inner_height
                    />
                    <rect
                        class="overlay"
                        fill="none"
                        pointer-events="all"
                        cursor="crosshair"
                        width=inner_width
                        height=inner_height
                        on:mousedown=on_down
                        on:mousemove=on_move
                        on:mouseup=on_up
                        on:mouseleave=on_leave
                        on:dblclick=on_dblclick
                    />
                </g>
            </g>
        </svg>
    }
}

/// Selection rectangle: the live drag if one is active, else the scene's
fn selection_memo(
    state: &GlobalState,
    scene: Memo<Option<ChartScene>>,
    inner_width: f64,
) -> Memo<BrushSelection> {
    let gesture = state.gesture;
    create_memo(move |_| {
        if let Some(live) = gesture.get().and_then(|g| g.extent(inner_width)) {
            return live;
        }
        scene
            .with(|s| s.as_ref().map(|s| s.overview.selection))
            .unwrap_or_else(|| BrushSelection::full(inner_width))
    })
}

/// The selection and overlay only exist once there is a chart to brush
fn brush_display(scene: &Option<ChartScene>) -> &'static str {
    if scene.is_some() {
        "inline"
    } else {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftchart::chart::{render, ChartConfig, ViewState};
    use liftchart::dataset::Dataset;

    #[test]
    fn test_brush_hidden_without_scene() {
        assert_eq!(brush_display(&None), "none");

        let dataset = Dataset::from_json_str(r#"{"federations": [], "data": {}}"#).unwrap();
        let scene = render(&dataset, &ViewState::default(), &ChartConfig::default());
        assert_eq!(brush_display(&Some(scene)), "inline");
    }
}
