use leptos::prelude::*;

use trainboard_core::model::{ModelKey, ModelPreset};
use trainboard_core::Event;

use crate::context::use_workflow;

/// Target column picker and the algorithm checklist.
#[component]
pub fn ModelSelector() -> impl IntoView {
    let ctx = use_workflow();
    let busy = move || ctx.state.with(|s| s.busy);

    let target_options = move || {
        ctx.state.with(|s| {
            let selected = s.target.clone().unwrap_or_default();
            s.columns()
                .iter()
                .map(|c| {
                    let is_selected = *c == selected;
                    view! { <option value=c.clone() selected=is_selected>{c.clone()}</option> }
                })
                .collect::<Vec<_>>()
        })
    };

    let checkboxes = ModelKey::ALL
        .into_iter()
        .map(|key| {
            let checked = move || ctx.state.with(|s| s.config.is_selected(key));
            view! {
                <label class="model-option">
                    <input
                        type="checkbox"
                        prop:checked=checked
                        disabled=busy
                        on:change=move |_| ctx.dispatch(Event::ToggleModel(key))
                    />
                    <span>{key.label()}</span>
                    <code class="model-key">{key.as_str()}</code>
                </label>
            }
        })
        .collect_view();

    let presets = [ModelPreset::Fast, ModelPreset::Full]
        .into_iter()
        .map(|preset| {
            view! {
                <button
                    class="btn btn-secondary"
                    disabled=busy
                    on:click=move |_| ctx.dispatch(Event::ApplyPreset(preset))
                >
                    {format!("Preset: {}", preset.label())}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="card model-selector">
            <h3>"Target and algorithms"</h3>
            <label class="field">
                <span>"Target column"</span>
                <select
                    class="input"
                    disabled=busy
                    on:change=move |ev| ctx.dispatch(Event::SetTarget(event_target_value(&ev)))
                >
                    {target_options}
                </select>
            </label>

            <div class="model-grid">{checkboxes}</div>

            <div class="action-buttons">{presets}</div>
        </div>
    }
}
