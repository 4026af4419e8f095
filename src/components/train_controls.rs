use leptos::prelude::*;

use trainboard_core::model::SearchStrategy;
use trainboard_core::{Event, Step};

use crate::context::use_workflow;

#[component]
pub fn TrainControls() -> impl IntoView {
    let ctx = use_workflow();

    let cv_bounds = ctx.state.with_untracked(|s| (s.config.cv_min, s.config.cv_max));
    let guard = move || ctx.state.with(|s| s.train_guard());
    let busy = move || ctx.state.with(|s| s.busy);

    let strategies = [SearchStrategy::Grid, SearchStrategy::Random]
        .into_iter()
        .map(|strategy| {
            let selected =
                move || ctx.state.with(|s| s.config.search_strategy == strategy);
            view! {
                <option value=strategy.as_str() selected=selected>{strategy.label()}</option>
            }
        })
        .collect_view();

    view! {
        <div class="card train-controls">
            <h3>"Training"</h3>
            <div class="field-row">
                <label class="field">
                    <span>"Cross-validation folds"</span>
                    <input
                        type="number"
                        class="input"
                        min=cv_bounds.0
                        max=cv_bounds.1
                        disabled=busy
                        prop:value=move || ctx.state.with(|s| s.config.cv_folds.to_string())
                        on:change=move |ev| {
                            if let Ok(folds) = event_target_value(&ev).parse::<u32>() {
                                ctx.dispatch(Event::SetCvFolds(folds));
                            }
                        }
                    />
                </label>

                <label class="field">
                    <span>"Search"</span>
                    <select
                        class="input"
                        disabled=busy
                        on:change=move |ev| {
                            if let Ok(strategy) = event_target_value(&ev).parse::<SearchStrategy>() {
                                ctx.dispatch(Event::SetSearchStrategy(strategy));
                            }
                        }
                    >
                        {strategies}
                    </select>
                </label>

                <Show when=move || ctx.state.with(|s| s.config.search_strategy == SearchStrategy::Random)>
                    <label class="field">
                        <span>"Iterations"</span>
                        <input
                            type="number"
                            class="input"
                            min="1"
                            disabled=busy
                            prop:value=move || ctx.state.with(|s| s.config.max_iterations.to_string())
                            on:change=move |ev| {
                                if let Ok(n) = event_target_value(&ev).parse::<u32>() {
                                    ctx.dispatch(Event::SetMaxIterations(n));
                                }
                            }
                        />
                    </label>
                </Show>

                <label class="field checkbox-field">
                    <input
                        type="checkbox"
                        prop:checked=move || ctx.state.with(|s| s.config.use_class_weight)
                        disabled=busy
                        on:change=move |ev| ctx.dispatch(Event::SetUseClassWeight(event_target_checked(&ev)))
                    />
                    <span>"Balance class weights"</span>
                </label>
            </div>

            {move || guard().err().map(|reason| view! {
                <p class="input-hint">{reason.to_string()}</p>
            })}

            <div class="action-buttons">
                <button
                    class="btn btn-secondary"
                    on:click=move |_| ctx.dispatch(Event::GoTo(Step::Dataset))
                >
                    "Back"
                </button>
                <button
                    class="btn btn-primary"
                    disabled=move || guard().is_err()
                    on:click=move |_| ctx.dispatch(Event::Train)
                >
                    {move || if busy() { "Training..." } else { "Train models" }}
                </button>
                <Show when=move || ctx.state.with(|s| s.has_results())>
                    <button
                        class="btn btn-secondary"
                        on:click=move |_| ctx.dispatch(Event::GoTo(Step::Results))
                    >
                        "View results"
                    </button>
                </Show>
            </div>
        </div>
    }
}
