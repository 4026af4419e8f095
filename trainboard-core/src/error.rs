use thiserror::Error;

/// Failure of a single call to the training service.
///
/// `Display` is the message shown to the user, so every variant renders
/// as one readable sentence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Could not save file: {0}")]
    Artifact(String),

    #[error("Invalid service address: {0}")]
    Address(String),
}

impl GatewayError {
    /// Build a status error from a non-2xx response body.
    ///
    /// The body is searched for a conventional `error`, `message` or
    /// `detail` string field; if none is present `fallback` is used, and
    /// an empty fallback becomes `HTTP error <status>`.
    pub fn from_status(status: u16, body: &[u8], fallback: &str) -> Self {
        let message = extract_error_message(body).unwrap_or_else(|| {
            if fallback.is_empty() {
                format!("HTTP error {}", status)
            } else {
                fallback.to_string()
            }
        });
        GatewayError::Status { status, message }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

impl From<GatewayError> for String {
    fn from(err: GatewayError) -> Self {
        err.to_string()
    }
}

fn extract_error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let obj = value.as_object()?;
    ["error", "message", "detail"]
        .iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// A user action whose precondition does not hold.
///
/// These are prevented at the trigger level (buttons are disabled), so the
/// orchestrator only logs them and leaves the state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardViolation {
    #[error("Load a dataset first")]
    NoPreview,

    #[error("Train at least once to see results")]
    NoResults,

    #[error("Select at least one algorithm")]
    NoModelsSelected,

    #[error("Choose a target column from the dataset")]
    TargetNotInColumns,

    #[error("Cross-validation folds must be at least 2")]
    InvalidCvFolds,

    #[error("Test split must be strictly between 0 and 1")]
    InvalidTestSize,

    #[error("Another request is still running")]
    Busy,

    #[error("No trained run is available yet")]
    NoRun,

    #[error("Preview size is not one of the offered options")]
    UnsupportedLimit,
}

/// Why a confusion matrix cannot be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
    #[error("no class labels")]
    EmptyLabels,

    #[error("empty matrix")]
    EmptyMatrix,

    #[error("matrix has {rows} rows but there are {labels} labels")]
    DimensionMismatch { rows: usize, labels: usize },

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}
