//! Loading Component

use leptos::*;

use crate::state::use_global_state;

/// Shown until the dataset arrives
#[component]
pub fn Loading() -> impl IntoView {
    let loading = use_global_state().loading;

    view! {
        <Show when=move || loading.get()>
            <div class="loading">"Loading records..."</div>
        </Show>
    }
}
