use leptos::prelude::*;

use trainboard_core::analytics::{format_percent, NormalizedMatrix};
use trainboard_core::{Event, ShapeMismatch};

use crate::context::use_workflow;

/// Heatmap of one model's confusion matrix, rows = true class.
#[component]
pub fn ConfusionMatrix(
    matrix: Result<NormalizedMatrix, ShapeMismatch>,
    labels: Vec<String>,
) -> impl IntoView {
    let ctx = use_workflow();

    let matrix = match matrix {
        Ok(matrix) => matrix,
        Err(reason) => {
            return view! {
                <div class="matrix-unavailable">
                    "Confusion matrix not available (" {reason.to_string()} ")"
                </div>
            }
            .into_any();
        }
    };

    let n = matrix.dimension();
    let cells = matrix.cells(&labels);
    let grid_style = format!("grid-template-columns: auto repeat({}, minmax(3rem, 1fr));", n);

    let header = labels
        .iter()
        .map(|l| view! { <div class="cm-label cm-pred" title=l.clone()>{l.clone()}</div> })
        .collect_view();

    let rows = cells
        .chunks(n.max(1))
        .enumerate()
        .map(|(i, row)| {
            let truth = labels.get(i).cloned().unwrap_or_default();
            let row_cells = row
                .iter()
                .map(|cell| {
                    let class = if cell.row == cell.col { "cm-cell cm-diag" } else { "cm-cell" };
                    view! {
                        <div class=class style=format!("background: {};", cell.color) title=cell.tooltip.clone()>
                            <span class="cm-count">{cell.count}</span>
                            <span class="cm-percent">{format!("{:.1}%", cell.percent)}</span>
                        </div>
                    }
                })
                .collect_view();
            view! {
                <div class="cm-label cm-true" title=truth.clone()>{truth.clone()}</div>
                {row_cells}
            }
        })
        .collect_view();

    view! {
        <div class="confusion-matrix">
            <div class="cm-toolbar">
                <span class="cm-mode">{matrix.mode.label()}</span>
                <button class="btn-link" on:click=move |_| ctx.dispatch(Event::ToggleMatrixMode)>
                    "Switch scaling"
                </button>
                <span class="cm-accuracy">
                    "Accuracy " {format_percent(matrix.accuracy)} " of " {matrix.total} " samples"
                </span>
            </div>
            <div class="cm-grid" style=grid_style>
                <div class="cm-corner">"True \\ Pred"</div>
                {header}
                {rows}
            </div>
        </div>
    }
    .into_any()
}
