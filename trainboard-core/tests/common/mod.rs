//! Shared fixtures for the integration tests: a scripted gateway and a
//! sink that records what would have been saved.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Once;

use async_trait::async_trait;
use serde_json::json;

use trainboard_core::gateway::{Artifact, ArtifactKind, ArtifactSink, Gateway};
use trainboard_core::model::{
    DatasetPreview, ResetAck, RunId, TrainRequest, TrainResponse, UploadFile,
};
use trainboard_core::GatewayError;

static TRACING: Once = Once::new();

/// Install a tracing subscriber once per test binary (RUST_LOG, default info).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn train_response_fixture() -> TrainResponse {
    let text = std::fs::read_to_string(fixture_path("train_response.json"))
        .expect("Failed to read train_response.json");
    serde_json::from_str(&text).expect("Fixture should parse as a train response")
}

pub fn preview_with_columns(columns: &[&str]) -> DatasetPreview {
    let rows = (0..3)
        .map(|i| {
            columns
                .iter()
                .map(|c| (c.to_string(), json!(i)))
                .collect::<serde_json::Map<_, _>>()
        })
        .collect();
    DatasetPreview {
        row_count: 120,
        column_count: columns.len(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows,
    }
}

/// One recorded gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Upload(String),
    Preview(usize),
    Train(TrainRequest),
    Reset,
    Download(RunId, ArtifactKind),
}

/// In-memory [`Gateway`] answering every call from a preset script.
pub struct FakeGateway {
    pub upload: RefCell<Result<DatasetPreview, GatewayError>>,
    pub preview: RefCell<Result<DatasetPreview, GatewayError>>,
    pub train: RefCell<Result<TrainResponse, GatewayError>>,
    pub reset: RefCell<Result<ResetAck, GatewayError>>,
    pub download: RefCell<Result<Vec<u8>, GatewayError>>,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        let unavailable = || GatewayError::Transport("connection refused".into());
        Self {
            upload: RefCell::new(Err(unavailable())),
            preview: RefCell::new(Err(unavailable())),
            train: RefCell::new(Err(unavailable())),
            reset: RefCell::new(Ok(ResetAck { ok: true })),
            download: RefCell::new(Ok(b"artifact".to_vec())),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_upload(self, result: Result<DatasetPreview, GatewayError>) -> Self {
        *self.upload.borrow_mut() = result;
        self
    }

    pub fn with_preview(self, result: Result<DatasetPreview, GatewayError>) -> Self {
        *self.preview.borrow_mut() = result;
        self
    }

    pub fn with_train(self, result: Result<TrainResponse, GatewayError>) -> Self {
        *self.train.borrow_mut() = result;
        self
    }

    pub fn with_reset(self, result: Result<ResetAck, GatewayError>) -> Self {
        *self.reset.borrow_mut() = result;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Gateway for FakeGateway {
    async fn upload_file(&self, file: UploadFile) -> Result<DatasetPreview, GatewayError> {
        self.calls.borrow_mut().push(Call::Upload(file.name));
        self.upload.borrow().clone()
    }

    async fn fetch_preview(&self, limit: usize) -> Result<DatasetPreview, GatewayError> {
        self.calls.borrow_mut().push(Call::Preview(limit));
        self.preview.borrow().clone().map(|mut p| {
            p.rows.truncate(limit);
            p
        })
    }

    async fn train(&self, request: &TrainRequest) -> Result<TrainResponse, GatewayError> {
        self.calls.borrow_mut().push(Call::Train(request.clone()));
        self.train.borrow().clone()
    }

    async fn reset_run(&self) -> Result<ResetAck, GatewayError> {
        self.calls.borrow_mut().push(Call::Reset);
        self.reset.borrow().clone()
    }

    async fn download_artifact(
        &self,
        run_id: &RunId,
        kind: ArtifactKind,
    ) -> Result<Artifact, GatewayError> {
        self.calls
            .borrow_mut()
            .push(Call::Download(run_id.clone(), kind));
        let bytes = self.download.borrow().clone()?;
        Ok(Artifact {
            file_name: kind.file_name(run_id),
            content_type: "application/octet-stream".into(),
            bytes,
        })
    }
}

/// [`ArtifactSink`] that keeps saved artifacts in memory.
#[derive(Default)]
pub struct RecordingSink {
    pub saved: RefCell<Vec<Artifact>>,
    pub fail_with: Option<String>,
}

impl RecordingSink {
    pub fn failing(message: &str) -> Self {
        Self {
            saved: RefCell::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn file_names(&self) -> Vec<String> {
        self.saved
            .borrow()
            .iter()
            .map(|a| a.file_name.clone())
            .collect()
    }
}

impl ArtifactSink for RecordingSink {
    fn save(&self, artifact: &Artifact) -> Result<(), GatewayError> {
        if let Some(message) = &self.fail_with {
            return Err(GatewayError::Artifact(message.clone()));
        }
        self.saved.borrow_mut().push(artifact.clone());
        Ok(())
    }
}
