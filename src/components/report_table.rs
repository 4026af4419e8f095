use leptos::prelude::*;

use trainboard_core::analytics::{ReportRow, ReportTable};

fn report_row(row: ReportRow, summary: bool) -> impl IntoView {
    view! {
        <tr class:report-summary=summary>
            <td>{row.label.clone()}</td>
            <td>{row.precision_text()}</td>
            <td>{row.recall_text()}</td>
            <td>{row.f1_text()}</td>
            <td>{row.support_text()}</td>
        </tr>
    }
}

#[component]
pub fn ClassificationReportTable(table: ReportTable) -> impl IntoView {
    if table.is_empty() {
        return view! { <p class="input-hint">"No classification report"</p> }.into_any();
    }

    let body = table
        .body
        .into_iter()
        .map(|row| report_row(row, false))
        .collect_view();
    let summary = table
        .summary
        .into_iter()
        .map(|row| report_row(row, true))
        .collect_view();

    view! {
        <table class="data-table report-table">
            <thead>
                <tr>
                    <th>"Class"</th>
                    <th>"Precision"</th>
                    <th>"Recall"</th>
                    <th>"F1"</th>
                    <th>"Support"</th>
                </tr>
            </thead>
            <tbody>
                {body}
                {summary}
            </tbody>
        </table>
    }
    .into_any()
}
