use leptos::prelude::*;

use trainboard_core::{Event, Step};

use crate::context::use_workflow;

/// Step navigation, dataset summary and the reset action.
#[component]
pub fn StepSidebar() -> impl IntoView {
    let ctx = use_workflow();

    let step_items = Step::ALL
        .into_iter()
        .map(|step| {
            let is_current = move || ctx.state.with(|s| s.step == step);
            let locked = move || ctx.state.with(|s| s.can_go_to(step).is_err());
            view! {
                <li class="nav-item">
                    <button
                        class="nav-link step-link"
                        class:active=is_current
                        class:locked=locked
                        disabled=locked
                        on:click=move |_| ctx.dispatch(Event::GoTo(step))
                    >
                        <span class="step-number">{step.number()}</span>
                        {step.label()}
                    </button>
                </li>
            }
        })
        .collect_view();

    let dataset_summary = move || {
        ctx.state.with(|s| {
            s.preview.as_ref().map(|p| {
                let d = p.dataset();
                format!("{} rows \u{00D7} {} columns", d.row_count, d.column_count)
            })
        })
    };

    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h1 class="sidebar-title">"Trainboard"</h1>
                <p class="sidebar-subtitle">"Classifier training"</p>
            </div>
            <ul class="nav-list">{step_items}</ul>
            <div class="sidebar-footer">
                {move || dataset_summary().map(|text| view! {
                    <p class="sidebar-meta">{text}</p>
                })}
                {move || ctx.state.with(|s| s.run_id.clone()).map(|id| view! {
                    <p class="sidebar-meta">"Run " <code>{id.to_string()}</code></p>
                })}
                <button
                    class="btn btn-secondary"
                    on:click=move |_| ctx.dispatch(Event::Reset)
                >
                    "Reset workspace"
                </button>
            </div>
        </nav>
    }
}
