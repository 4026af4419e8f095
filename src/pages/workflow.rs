//! The single-page stepper: Dataset -> Configure -> Results.

use leptos::prelude::*;
use tracing::error;

use trainboard_core::{default_config, Event, Orchestrator, Step};

use crate::api::{browser_gateway, BrowserDownload};
use crate::components::feedback::FeedbackBar;
use crate::components::model_selector::ModelSelector;
use crate::components::preview_table::PreviewPanel;
use crate::components::results_board::ResultsBoard;
use crate::components::sidebar::StepSidebar;
use crate::components::train_controls::TrainControls;
use crate::components::upload_panel::UploadPanel;
use crate::context::{Runtime, WorkflowContext};

#[component]
pub fn WorkflowPage() -> impl IntoView {
    let config = default_config();
    let gateway = match browser_gateway(&config.api) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("Cannot address the training service: {}", e);
            return view! {
                <div class="page error-state">
                    <h3>"Training service unavailable"</h3>
                    <p>{e.to_string()}</p>
                </div>
            }
            .into_any();
        }
    };

    let ctx = WorkflowContext::new(
        Orchestrator::new(config),
        Runtime {
            gateway,
            sink: BrowserDownload,
        },
    );
    provide_context(ctx);
    ctx.dispatch(Event::Initialize);

    let step = Memo::new(move |_| ctx.state.with(|s| s.step));

    view! {
        <div class="app-layout">
            <style>{include_str!("workflow.css")}</style>
            <StepSidebar />
            <main class="content">
                <FeedbackBar />
                {move || match step.get() {
                    Step::Dataset => view! {
                        <section class="page">
                            <h2>"1. Dataset"</h2>
                            <p class="page-description">
                                "Upload an XML dataset or use the one already on the server."
                            </p>
                            <UploadPanel />
                            <PreviewPanel />
                        </section>
                    }.into_any(),
                    Step::Configure => view! {
                        <section class="page">
                            <h2>"2. Configure"</h2>
                            <p class="page-description">
                                "Pick the target column, the algorithms and how to tune them."
                            </p>
                            <ModelSelector />
                            <TrainControls />
                        </section>
                    }.into_any(),
                    Step::Results => view! {
                        <section class="page">
                            <h2>"3. Results"</h2>
                            <ResultsBoard />
                        </section>
                    }.into_any(),
                }}
            </main>
        </div>
    }
    .into_any()
}
