//! Liftchart Frontend
//!
//! Powerlifting records chart built with Leptos (WASM).
//!
//! # Features
//!
//! - Category, federation, equipment and tested selectors
//! - Best-per-year lines and markers for men and women
//! - Overview strip with a brush to zoom the time axis
//! - Record details on hover
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It fetches the dataset document once and renders every scene
//! with the `liftchart` library; the components only draw what the scene
//! describes and turn DOM events into view-state transitions.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
