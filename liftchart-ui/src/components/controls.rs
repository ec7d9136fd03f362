//! Selector Controls
//!
//! Category, federation, tested and equipment selectors. Each change
//! replaces the selection and resets the time domain.

use leptos::*;

use liftchart::dataset::{Category, Equipment, Tested};
use liftchart::query::FederationFilter;

use crate::state::use_global_state;

#[component]
pub fn Controls() -> impl IntoView {
    let state = use_global_state();
    let federations = state.federations;

    let on_category = {
        let state = state.clone();
        move |ev: ev::Event| {
            if let Ok(category) = event_target_value(&ev).parse::<Category>() {
                state.update_selection(|mut s| {
                    s.category = category;
                    s
                });
            }
        }
    };

    let on_federation = {
        let state = state.clone();
        move |ev: ev::Event| {
            let federation = FederationFilter::parse(&event_target_value(&ev));
            state.update_selection(|s| s.federation(federation));
        }
    };

    let on_tested = {
        let state = state.clone();
        move |ev: ev::Event| {
            if let Ok(tested) = event_target_value(&ev).parse::<Tested>() {
                state.update_selection(|s| s.tested(tested));
            }
        }
    };

    let on_equipment = {
        let state = state.clone();
        move |ev: ev::Event| {
            if let Ok(equipment) = event_target_value(&ev).parse::<Equipment>() {
                state.update_selection(|s| s.equipment(equipment));
            }
        }
    };

    let view_state = state.view;

    view! {
        <div class="controls">
            <label>
                "Category "
                <select id="categorySelect" on:change=on_category>
                    {Category::all()
                        .iter()
                        .map(|c| {
                            let c = *c;
                            view! {
                                <option
                                    value=c.key()
                                    selected=move || view_state.with(|v| v.selection.category == c)
                                >
                                    {c.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>

            <label>
                "Federation "
                <select id="federationSelect" on:change=on_federation>
                    <option value="all">"All federations"</option>
                    {move || {
                        federations
                            .get()
                            .into_iter()
                            .map(|(name, _count)| {
                                let value = name.clone();
                                view! { <option value=value>{name}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </label>

            <label>
                "Tested "
                <select id="testedSelect" on:change=on_tested>
                    {Tested::all()
                        .iter()
                        .map(|t| {
                            let t = *t;
                            view! {
                                <option
                                    value=t.key()
                                    selected=move || view_state.with(|v| v.selection.tested == t)
                                >
                                    {t.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>

            <label>
                "Equipment "
                <select id="equipmentSelect" on:change=on_equipment>
                    {Equipment::all()
                        .iter()
                        .map(|e| {
                            let e = *e;
                            view! {
                                <option
                                    value=e.key()
                                    selected=move || view_state.with(|v| v.selection.equipment == e)
                                >
                                    {e.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
        </div>
    }
}
