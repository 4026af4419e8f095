//! Calls to the external training service.
//!
//! Every operation is attempted exactly once and either resolves with a
//! typed payload or fails with a [`GatewayError`] carrying the message to
//! show. Retries are intentionally absent.

mod http;

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::model::{DatasetPreview, ResetAck, RunId, TrainRequest, TrainResponse, UploadFile};

pub use http::HttpGateway;

/// Row window used when "uploading" without a file.
pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

/// Which artifact of a run to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The fitted best estimator (pickle)
    Model,
    /// Run metadata (JSON)
    Metadata,
}

impl ArtifactKind {
    pub(crate) fn path(self) -> &'static str {
        match self {
            ArtifactKind::Model => "download/model",
            ArtifactKind::Metadata => "download/metadata",
        }
    }

    /// Suggested file name for the saved artifact.
    pub fn file_name(self, run_id: &RunId) -> String {
        match self {
            ArtifactKind::Model => format!("best_model_{}.pkl", run_id),
            ArtifactKind::Metadata => format!("metadata_{}.json", run_id),
        }
    }

    pub(crate) fn failure_message(self) -> &'static str {
        match self {
            ArtifactKind::Model => "Model download failed",
            ArtifactKind::Metadata => "Metadata download failed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Metadata => "metadata",
        }
    }
}

/// A downloaded file, ready to be handed to an [`ArtifactSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The training service, as seen by the orchestrator.
#[async_trait(?Send)]
pub trait Gateway {
    /// Upload a dataset file and return the preview of the parsed data.
    async fn upload_file(&self, file: UploadFile) -> Result<DatasetPreview, GatewayError>;

    async fn fetch_preview(&self, limit: usize) -> Result<DatasetPreview, GatewayError>;

    async fn train(&self, request: &TrainRequest) -> Result<TrainResponse, GatewayError>;

    /// Clear server-side state for the active session.
    async fn reset_run(&self) -> Result<ResetAck, GatewayError>;

    async fn download_artifact(
        &self,
        run_id: &RunId,
        kind: ArtifactKind,
    ) -> Result<Artifact, GatewayError>;

    /// Upload `file`, or with no file fetch the service's current default
    /// preview instead of uploading anything.
    async fn upload_dataset(
        &self,
        file: Option<UploadFile>,
    ) -> Result<DatasetPreview, GatewayError> {
        match file {
            Some(file) => self.upload_file(file).await,
            None => self.fetch_preview(DEFAULT_PREVIEW_LIMIT).await,
        }
    }
}

/// Client-side destination for downloaded artifacts (a browser download,
/// a directory, a test recorder).
pub trait ArtifactSink {
    fn save(&self, artifact: &Artifact) -> Result<(), GatewayError>;
}
