use leptos::prelude::*;

use trainboard_core::Event;

use crate::context::use_workflow;

/// Busy indicator, the last error and the latest notice.
#[component]
pub fn FeedbackBar() -> impl IntoView {
    let ctx = use_workflow();

    view! {
        <div class="feedback-bar">
            <Show when=move || ctx.state.with(|s| s.busy)>
                <div class="loading-indicator">
                    <div class="spinner"></div>
                    <span>"Working..."</span>
                </div>
            </Show>

            {move || ctx.state.with(|s| s.last_error.clone()).map(|message| view! {
                <div class="error-banner" role="alert">
                    <span>{message}</span>
                    <button class="btn-link" on:click=move |_| ctx.dispatch(Event::DismissError)>
                        "\u{2717}"
                    </button>
                </div>
            })}

            {move || ctx.state.with(|s| s.notice.clone()).map(|notice| view! {
                <div class=format!("notice {}", notice.level.css_class())>
                    <span>{notice.text}</span>
                    <button class="btn-link" on:click=move |_| ctx.dispatch(Event::DismissNotice)>
                        "\u{2717}"
                    </button>
                </div>
            })}
        </div>
    }
}
