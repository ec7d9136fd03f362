//! App Root Component
//!
//! Provides the global state, starts the dataset fetch, and lays out the
//! selectors, the chart, the overview strip and the tooltip.

use leptos::*;
use std::rc::Rc;

use crate::api::{fetch_dataset, DATA_JSON_PATH};
use crate::components::{Brush, Chart, Controls, Loading, Tooltip};
use crate::state::{provide_global_state, use_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    let state = use_global_state();

    load_dataset(state);

    view! {
        <div class="app">
            <header>
                <h1>"Powerlifting Records Over Time"</h1>
                <p class="subtitle">"Best result per year, men and women"</p>
            </header>

            <Controls />
            <Loading />

            <div class="chart-container">
                <Chart />
                <Brush />
            </div>

            <Tooltip />
        </div>
    }
}

/// Fetch the dataset once; on failure the chart stays empty
fn load_dataset(state: GlobalState) {
    spawn_local(async move {
        match fetch_dataset(DATA_JSON_PATH).await {
            Ok(dataset) => {
                web_sys::console::log_1(&"Data loaded successfully".into());
                state.dataset.set(Some(Rc::new(dataset)));
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Error loading data: {}", e).into());
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&format!(
                        "Failed to load {}. Please check the file exists and is valid JSON.",
                        DATA_JSON_PATH
                    ));
                }
            }
        }
        state.loading.set(false);
    });
}
