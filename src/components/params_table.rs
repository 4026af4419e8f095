use leptos::prelude::*;

use trainboard_core::analytics::ParamRow;

/// Tuned hyperparameters, already in display order.
#[component]
pub fn ParamsTable(rows: Vec<ParamRow>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <p class="input-hint">"Default parameters"</p> }.into_any();
    }

    view! {
        <dl class="params-list">
            {rows
                .into_iter()
                .map(|p| view! {
                    <dt title=p.raw_name>{p.label}</dt>
                    <dd>{p.value}</dd>
                })
                .collect_view()}
        </dl>
    }
    .into_any()
}
