//! Tooltip Component
//!
//! Record details floating next to the pointer while it rests on a marker.
//! Positioned absolutely in document coordinates, so page offsets apply
//! unchanged when the page is scrolled.

use leptos::*;

use liftchart::chart::TooltipState;

use crate::state::use_global_state;

#[component]
pub fn Tooltip() -> impl IntoView {
    let tooltip = use_global_state().tooltip;

    let style = move || tooltip.with(tooltip_style);

    let lines = move || {
        tooltip.with(|t| match t {
            TooltipState::Visible { content, .. } => content
                .lines
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let line = line.clone();
                    view! {
                        {(i > 0).then(|| view! { <br /> })}
                        {line}
                    }
                })
                .collect_view(),
            TooltipState::Hidden => ().into_view(),
        })
    };

    view! {
        <div id="tooltip" class="tooltip" style=style>
            {lines}
        </div>
    }
}

/// Inline style for the box; offsets are page coordinates
fn tooltip_style(state: &TooltipState) -> String {
    match state {
        TooltipState::Visible { left, top, .. } => {
            format!("position: absolute; display: block; left: {left}px; top: {top}px;")
        }
        TooltipState::Hidden => "position: absolute; display: none;".to_string(),
    }
}
