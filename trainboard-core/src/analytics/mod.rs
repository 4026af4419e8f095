//! Pure transformations from a training response into display-ready data.
//!
//! Nothing here holds state or performs I/O; every function can be called
//! on each render.

pub mod confusion;
pub mod format;
pub mod params;
pub mod report;

pub use confusion::{
    analyze, heat_color, is_drawable, normalize, validate_matrix, HeatCell, NormalizeMode,
    NormalizedMatrix,
};
pub use format::{format_percent, format_score, format_seconds, PLACEHOLDER};
pub use params::{prettify_params, ParamRow};
pub use report::{tabulate, ReportRow, ReportTable, SUMMARY_KEYS};

use crate::error::ShapeMismatch;
use crate::model::{BestOverall, ModelKey, ModelResult};

/// Look up the service's best pick in the current results.
///
/// Returns `None` when there is no pick or the picked key is not among the
/// results; callers then render no callout.
pub fn resolve_best<'a>(
    results: &'a [ModelResult],
    best: Option<&BestOverall>,
) -> Option<&'a ModelResult> {
    let best = best?;
    results.iter().find(|r| r.key == best.key)
}

/// Results ordered by F1-macro, best first. Ties keep service order.
pub fn ranked(results: &[ModelResult]) -> Vec<&ModelResult> {
    let mut sorted: Vec<&ModelResult> = results.iter().collect();
    sorted.sort_by(|a, b| {
        let fa = finite_or_zero(a.metrics.f1_macro);
        let fb = finite_or_zero(b.metrics.f1_macro);
        fb.total_cmp(&fa)
    });
    sorted
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Everything a result card shows for one model.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub key: ModelKey,
    pub name: String,
    pub is_best: bool,
    pub f1_text: String,
    pub accuracy_text: String,
    pub time_text: String,
    pub labels: Vec<String>,
    pub matrix: Result<NormalizedMatrix, ShapeMismatch>,
    pub report: ReportTable,
    pub params: Vec<ParamRow>,
}

pub fn summarize(
    result: &ModelResult,
    best_key: Option<ModelKey>,
    mode: NormalizeMode,
) -> ResultSummary {
    let metrics = &result.metrics;
    ResultSummary {
        key: result.key,
        name: result.name.clone(),
        is_best: best_key == Some(result.key),
        f1_text: format_score(metrics.f1_macro),
        accuracy_text: format_score(metrics.accuracy),
        time_text: format_seconds(result.train_time_seconds),
        labels: metrics.labels.clone(),
        matrix: analyze(&metrics.confusion_matrix, &metrics.labels, mode),
        report: tabulate(&metrics.classification_report, &metrics.labels),
        params: prettify_params(&result.best_params),
    }
}

/// The "best model" banner.
#[derive(Debug, Clone, PartialEq)]
pub struct BestCallout {
    pub key: ModelKey,
    pub name: String,
    pub f1_text: String,
    pub accuracy_text: String,
    pub params: Vec<ParamRow>,
}

pub fn best_callout(results: &[ModelResult], best: Option<&BestOverall>) -> Option<BestCallout> {
    resolve_best(results, best).map(|r| BestCallout {
        key: r.key,
        name: r.name.clone(),
        f1_text: format_score(r.metrics.f1_macro),
        accuracy_text: format_score(r.metrics.accuracy),
        params: prettify_params(&r.best_params),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metrics;

    fn result(key: ModelKey, f1: f64) -> ModelResult {
        ModelResult {
            key,
            name: key.label().to_string(),
            metrics: Metrics {
                f1_macro: f1,
                accuracy: f1,
                ..Default::default()
            },
            train_time_seconds: 0.5,
            best_params: Default::default(),
        }
    }

    #[test]
    fn test_resolve_best_by_key() {
        let results = vec![result(ModelKey::Logreg, 0.7), result(ModelKey::Dt, 0.9)];
        let best = BestOverall {
            key: ModelKey::Dt,
            name: String::new(),
        };
        assert_eq!(resolve_best(&results, Some(&best)).map(|r| r.key), Some(ModelKey::Dt));
    }

    #[test]
    fn test_resolve_best_tolerates_missing_key() {
        let results = vec![result(ModelKey::Logreg, 0.7)];
        let best = BestOverall {
            key: ModelKey::Rf,
            name: "Random Forest".into(),
        };
        assert!(resolve_best(&results, Some(&best)).is_none());
        assert!(best_callout(&results, Some(&best)).is_none());
        assert!(resolve_best(&results, None).is_none());
    }

    #[test]
    fn test_ranked_orders_by_f1_desc() {
        let results = vec![
            result(ModelKey::Logreg, 0.7),
            result(ModelKey::Dt, 0.9),
            result(ModelKey::Nb, f64::NAN),
            result(ModelKey::Knn, 0.8),
        ];
        let keys: Vec<_> = ranked(&results).iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![ModelKey::Dt, ModelKey::Knn, ModelKey::Logreg, ModelKey::Nb]);
    }

    #[test]
    fn test_summary_degrades_on_bad_matrix() {
        let mut r = result(ModelKey::Svc, 0.5);
        r.metrics.labels = vec!["a".into(), "b".into()];
        r.metrics.confusion_matrix = vec![vec![1, 2, 3]];
        let summary = summarize(&r, Some(ModelKey::Dt), NormalizeMode::Row);
        assert!(!summary.is_best);
        assert!(summary.matrix.is_err());
        assert_eq!(summary.f1_text, "0.500");
        assert_eq!(summary.report.body.len(), 2);
    }
}
