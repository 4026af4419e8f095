//! Wire types exchanged with the training service.
//!
//! Field names follow the service's JSON; Rust-side names are renamed
//! through serde where the two differ.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One preview row: column name to scalar value.
pub type Record = Map<String, Value>;

// =============================================================================
// DATASET
// =============================================================================

/// A bounded window over the active dataset, as returned by upload/preview.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatasetPreview {
    /// Total rows in the dataset (not in this window)
    #[serde(rename = "rows", default)]
    pub row_count: usize,
    /// Total columns in the dataset
    #[serde(rename = "cols", default)]
    pub column_count: usize,
    /// Ordered, unique column names
    #[serde(default)]
    pub columns: Vec<String>,
    /// The row window itself
    #[serde(rename = "preview", default)]
    pub rows: Vec<Record>,
}

impl DatasetPreview {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Pick the training target for a freshly loaded dataset.
    ///
    /// Prefers `canonical` when the dataset has it, otherwise the last column.
    pub fn default_target(&self, canonical: &str) -> Option<String> {
        if self.has_column(canonical) {
            Some(canonical.to_string())
        } else {
            self.columns.last().cloned()
        }
    }
}

/// A user-picked dataset file, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

// =============================================================================
// TRAINING REQUEST
// =============================================================================

/// The closed set of algorithms the service can train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKey {
    Logreg,
    Svc,
    Knn,
    Dt,
    Rf,
    Nb,
}

impl ModelKey {
    pub const ALL: [ModelKey; 6] = [
        ModelKey::Logreg,
        ModelKey::Svc,
        ModelKey::Knn,
        ModelKey::Dt,
        ModelKey::Rf,
        ModelKey::Nb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelKey::Logreg => "logreg",
            ModelKey::Svc => "svc",
            ModelKey::Knn => "knn",
            ModelKey::Dt => "dt",
            ModelKey::Rf => "rf",
            ModelKey::Nb => "nb",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelKey::Logreg => "Logistic Regression",
            ModelKey::Svc => "SVM",
            ModelKey::Knn => "k-NN",
            ModelKey::Dt => "Decision Tree",
            ModelKey::Rf => "Random Forest",
            ModelKey::Nb => "Naive Bayes",
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown model key: {}", s))
    }
}

/// Predefined algorithm selections offered next to the checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelPreset {
    /// Logistic regression and a decision tree
    Fast,
    /// Every algorithm
    Full,
}

impl ModelPreset {
    pub fn models(self) -> &'static [ModelKey] {
        match self {
            ModelPreset::Fast => &[ModelKey::Logreg, ModelKey::Dt],
            ModelPreset::Full => &ModelKey::ALL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelPreset::Fast => "Fast (LR + DT)",
            ModelPreset::Full => "Full (all)",
        }
    }
}

/// Hyperparameter search strategy used by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    #[default]
    Grid,
    Random,
}

impl SearchStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchStrategy::Grid => "grid",
            SearchStrategy::Random => "random",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchStrategy::Grid => "Grid search",
            SearchStrategy::Random => "Randomized search",
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(SearchStrategy::Grid),
            "random" => Ok(SearchStrategy::Random),
            other => Err(format!("Unknown search strategy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scoring {
    #[default]
    #[serde(rename = "f1_macro")]
    F1Macro,
}

/// Body of `POST /train`. Built fresh for every training action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainRequest {
    pub target: String,
    pub test_size: f64,
    #[serde(rename = "random_state")]
    pub random_seed: u64,
    #[serde(rename = "cv")]
    pub cv_folds: u32,
    pub scoring: Scoring,
    pub use_class_weight: bool,
    pub selected_models: Vec<ModelKey>,
    #[serde(rename = "search")]
    pub search_strategy: SearchStrategy,
    #[serde(rename = "max_iters")]
    pub max_iterations: u32,
}

// =============================================================================
// TRAINING RESULTS
// =============================================================================

/// Opaque identifier of a completed training run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-class and summary rows of a classification report.
///
/// Keys are either class labels or the synthetic `macro avg`,
/// `weighted avg` and `accuracy` rows; values are kept as raw JSON and
/// validated when tabulated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationReport(pub Map<String, Value>);

impl ClassificationReport {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Scores and shape data for one trained model.
///
/// Decoding never fails on a malformed field: a `null` or mistyped matrix,
/// label list or report comes through empty and is reported as a shape
/// problem when the card is built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default, deserialize_with = "lenient_score")]
    pub f1_macro: f64,
    #[serde(default, deserialize_with = "lenient_score")]
    pub accuracy: f64,
    /// Class labels in the order used by the confusion matrix
    #[serde(default, deserialize_with = "lenient_labels")]
    pub labels: Vec<String>,
    /// Rows are true classes, columns are predicted classes
    #[serde(default, deserialize_with = "lenient_matrix")]
    pub confusion_matrix: Vec<Vec<u64>>,
    #[serde(rename = "report", default, deserialize_with = "lenient_report")]
    pub classification_report: ClassificationReport,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64().unwrap_or(0.0))
}

/// Class labels may come back as strings or as bare numbers.
fn lenient_labels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    let labels: Option<Vec<String>> = items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect();
    Ok(labels.unwrap_or_default())
}

fn lenient_matrix<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<u64>>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_params<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Map<String, Value>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

fn lenient_report<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<ClassificationReport, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(ClassificationReport(map)),
        _ => Ok(ClassificationReport::default()),
    }
}

/// Outcome of training one algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    pub key: ModelKey,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: Metrics,
    #[serde(rename = "train_time_s", default, deserialize_with = "lenient_score")]
    pub train_time_seconds: f64,
    #[serde(default, deserialize_with = "lenient_params")]
    pub best_params: Map<String, Value>,
}

/// The service's pick for best model; only the key is trusted, the
/// result itself is looked up in the returned sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestOverall {
    pub key: ModelKey,
    #[serde(default)]
    pub name: String,
}

/// Response of `POST /train`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainResponse {
    #[serde(default)]
    pub results: Vec<ModelResult>,
    #[serde(rename = "best_overall", default)]
    pub best: Option<BestOverall>,
    pub run_id: RunId,
}

/// Acknowledgement of `POST /reset`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResetAck {
    #[serde(default)]
    pub ok: bool,
}
