//! Dataset picker: drag-and-drop, browse, or the server's default dataset.

use leptos::prelude::*;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use trainboard_core::{Event, Step};

use crate::api::read_upload;
use crate::context::use_workflow;

#[component]
pub fn UploadPanel() -> impl IntoView {
    let ctx = use_workflow();
    let (is_over, set_is_over) = signal(false);
    let (is_reading, set_is_reading) = signal(false);
    let (read_error, set_read_error) = signal::<Option<String>>(None);
    let file_input_id = "dataset-file-input";

    let busy = move || ctx.state.with(|s| s.busy) || is_reading.get();

    // Read the file locally, then hand it to the workflow
    let submit = move |file: web_sys::File| {
        set_is_reading.set(true);
        set_read_error.set(None);
        spawn_local(async move {
            match read_upload(file).await {
                Ok(upload) => ctx.dispatch(Event::Upload(Some(upload))),
                Err(e) => {
                    warn!("{}", e);
                    set_read_error.set(Some(e));
                }
            }
            set_is_reading.set(false);
        });
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);
        if busy() {
            return;
        }
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            submit(file);
        }
    };

    let on_input_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            submit(file);
        }
        // Allow picking the same file again
        input.set_value("");
    };

    view! {
        <div class="upload-panel">
            <div
                class="drop-zone"
                class:drop-zone-active=move || is_over.get()
                class:drop-zone-loading=busy
                on:dragover=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    set_is_over.set(true);
                }
                on:dragleave=move |_| set_is_over.set(false)
                on:drop=on_drop
            >
                <Show
                    when=busy
                    fallback=move || view! {
                        <div class="drop-zone-content">
                            <p class="drop-main">"Drop an XML dataset here"</p>
                            <p class="drop-hint">"or"</p>
                            <label for=file_input_id class="btn btn-secondary">
                                "Browse Files"
                            </label>
                            <input
                                type="file"
                                id=file_input_id
                                accept=".xml,text/xml,application/xml"
                                style="display: none"
                                on:change=on_input_change
                            />
                        </div>
                    }
                >
                    <div class="drop-zone-loading-content">
                        <div class="spinner"></div>
                        <p>"Loading dataset..."</p>
                    </div>
                </Show>
            </div>

            {move || read_error.get().map(|e| view! { <p class="status-text status-error">{e}</p> })}

            <div class="action-buttons">
                <button
                    class="btn btn-primary"
                    disabled=busy
                    on:click=move |_| ctx.dispatch(Event::Upload(None))
                >
                    "Use default dataset"
                </button>
                <button
                    class="btn btn-secondary"
                    disabled=move || ctx.state.with(|s| s.can_go_to(Step::Configure).is_err())
                    on:click=move |_| ctx.dispatch(Event::GoTo(Step::Configure))
                >
                    "Continue"
                </button>
            </div>
        </div>
    }
}
