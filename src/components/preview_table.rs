use leptos::prelude::*;
use tracing::warn;

use trainboard_core::preview::cell_text;
use trainboard_core::Event;

use crate::api::save_bytes;
use crate::context::use_workflow;

/// Sortable preview of the loaded rows with a row-window selector and CSV
/// export.
#[component]
pub fn PreviewPanel() -> impl IntoView {
    let ctx = use_workflow();
    let limits = ctx.preview_limits();

    let has_preview = move || ctx.state.with(|s| s.preview.is_some());
    let columns = move || ctx.state.with(|s| s.columns().to_vec());

    let export_csv = move |_| {
        let csv = ctx
            .state
            .with(|s| s.preview.as_ref().and_then(|p| p.to_csv()));
        if let Some(csv) = csv {
            if let Err(e) = save_bytes("preview.csv", "text/csv;charset=utf-8", csv.as_bytes()) {
                warn!("CSV export failed: {:?}", e);
            }
        }
    };

    let header = move || {
        columns()
            .into_iter()
            .map(|column| {
                let arrow = {
                    let column = column.clone();
                    move || {
                        ctx.state.with(|s| {
                            s.preview
                                .as_ref()
                                .and_then(|p| p.sort())
                                .filter(|spec| spec.column == column)
                                .map(|spec| spec.direction.arrow())
                                .unwrap_or("")
                        })
                    }
                };
                let target = column.clone();
                view! {
                    <th
                        class="sortable"
                        class:locked=move || ctx.state.with(|s| s.busy)
                        on:click=move |_| ctx.dispatch(Event::SortPreview(target.clone()))
                    >
                        {column}
                        " "
                        <span class="sort-arrow">{arrow}</span>
                    </th>
                }
            })
            .collect_view()
    };

    let body = move || {
        ctx.state.with(|s| {
            let Some(preview) = s.preview.as_ref() else {
                return Vec::new();
            };
            let columns = preview.columns();
            preview
                .rows()
                .into_iter()
                .map(|row| {
                    let cells = columns
                        .iter()
                        .map(|c| view! { <td>{cell_text(row.get(c))}</td> })
                        .collect_view();
                    view! { <tr>{cells}</tr> }
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <Show when=has_preview>
            <div class="preview-panel">
                <div class="preview-toolbar">
                    <span class="preview-meta">
                        {move || ctx.state.with(|s| s.preview.as_ref().map(|p| {
                            let d = p.dataset();
                            format!(
                                "Showing {} of {} rows, {} columns",
                                d.rows.len(),
                                d.row_count,
                                d.column_count
                            )
                        }))}
                    </span>
                    <label>
                        "Rows: "
                        <select
                            class="input"
                            disabled=move || ctx.state.with(|s| s.busy)
                            prop:value=move || ctx.state.with(|s| s.preview_limit.to_string())
                            on:change=move |ev| {
                                if let Ok(limit) = event_target_value(&ev).parse::<usize>() {
                                    ctx.dispatch(Event::ChangeLimit(limit));
                                }
                            }
                        >
                            {limits
                                .iter()
                                .map(|n| view! { <option value=n.to_string()>{n.to_string()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <button
                        class="btn btn-secondary"
                        disabled=move || ctx.state.with(|s| {
                            s.preview.as_ref().map_or(true, |p| p.is_empty())
                        })
                        on:click=export_csv
                    >
                        "Export CSV"
                    </button>
                </div>
                <div class="table-scroll">
                    <table class="data-table">
                        <thead>
                            <tr>{header}</tr>
                        </thead>
                        <tbody>{body}</tbody>
                    </table>
                </div>
            </div>
        </Show>
    }
}
