//! Results step: best-model callout, per-model cards and artifact downloads.

use leptos::prelude::*;

use trainboard_core::analytics::{best_callout, ranked, summarize, ResultSummary};
use trainboard_core::{ArtifactKind, Event, Step};

use crate::components::confusion_matrix::ConfusionMatrix;
use crate::components::params_table::ParamsTable;
use crate::components::report_table::ClassificationReportTable;
use crate::context::use_workflow;

#[component]
pub fn ResultsBoard() -> impl IntoView {
    let ctx = use_workflow();
    let (by_score, set_by_score) = signal(true);

    let summaries = Memo::new(move |_| {
        let ordered = by_score.get();
        ctx.state.with(|s| {
            let Some(results) = s.results.as_ref() else {
                return Vec::new();
            };
            let best_key = s.best.as_ref().map(|b| b.key);
            let order = if ordered {
                ranked(results)
            } else {
                results.iter().collect()
            };
            order
                .into_iter()
                .map(|r| summarize(r, best_key, s.matrix_mode))
                .collect::<Vec<_>>()
        })
    });

    let callout = move || {
        ctx.state.with(|s| {
            s.results
                .as_ref()
                .and_then(|results| best_callout(results, s.best.as_ref()))
        })
    };

    view! {
        <div class="results-board">
            {move || callout().map(|best| view! {
                <div class="card best-callout">
                    <h3>"Best model: " {best.name}</h3>
                    <p class="best-scores">
                        "F1-macro " <strong>{best.f1_text}</strong>
                        " \u{00B7} Accuracy " <strong>{best.accuracy_text}</strong>
                    </p>
                    <ParamsTable rows=best.params />
                </div>
            })}

            <div class="action-buttons">
                <button
                    class="btn btn-primary"
                    disabled=move || ctx.state.with(|s| s.busy || s.download_guard().is_err())
                    on:click=move |_| ctx.dispatch(Event::Download(ArtifactKind::Model))
                >
                    "Download best model"
                </button>
                <button
                    class="btn btn-secondary"
                    disabled=move || ctx.state.with(|s| s.busy || s.download_guard().is_err())
                    on:click=move |_| ctx.dispatch(Event::Download(ArtifactKind::Metadata))
                >
                    "Download metadata"
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| ctx.dispatch(Event::GoTo(Step::Configure))
                >
                    "Back to configuration"
                </button>
                <label class="checkbox-field">
                    <input
                        type="checkbox"
                        prop:checked=move || by_score.get()
                        on:change=move |ev| set_by_score.set(event_target_checked(&ev))
                    />
                    <span>"Sort by F1-macro"</span>
                </label>
            </div>

            <div class="result-cards">
                {move || summaries.get().into_iter().map(result_card).collect_view()}
            </div>
        </div>
    }
}

fn result_card(summary: ResultSummary) -> impl IntoView {
    view! {
        <div class="card result-card" class:best=summary.is_best>
            <div class="result-header">
                <h4>{summary.name}</h4>
                {summary.is_best.then(|| view! { <span class="badge badge-best">"Best"</span> })}
                <code class="model-key">{summary.key.as_str()}</code>
            </div>
            <div class="result-scores">
                <span>"F1-macro " <strong>{summary.f1_text}</strong></span>
                <span>"Accuracy " <strong>{summary.accuracy_text}</strong></span>
                <span>"Training time " {summary.time_text}</span>
            </div>
            <ConfusionMatrix matrix=summary.matrix labels=summary.labels />
            <details>
                <summary>"Classification report"</summary>
                <ClassificationReportTable table=summary.report />
            </details>
            <details>
                <summary>"Tuned parameters"</summary>
                <ParamsTable rows=summary.params />
            </details>
        </div>
    }
}
