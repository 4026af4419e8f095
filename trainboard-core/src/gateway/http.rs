use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use url::Url;

use super::{Artifact, ArtifactKind, Gateway};
use crate::config::ApiConfig;
use crate::error::GatewayError;
use crate::model::{DatasetPreview, ResetAck, RunId, TrainRequest, TrainResponse, UploadFile};

/// [`Gateway`] backed by the service's HTTP API.
///
/// Works in the browser (reqwest's fetch backend) and natively. The base
/// URL must be absolute, e.g. `http://localhost:8000/api/`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base: Url,
}

impl HttpGateway {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    /// Build a gateway for the service mounted at `api.base_path` under `origin`.
    pub fn from_origin(origin: &str, api: &ApiConfig) -> Result<Self, GatewayError> {
        let prefix = api.base_path.trim_matches('/');
        let joined = if prefix.is_empty() {
            format!("{}/", origin.trim_end_matches('/'))
        } else {
            format!("{}/{}/", origin.trim_end_matches('/'), prefix)
        };
        let base = Url::parse(&joined).map_err(|e| GatewayError::Address(e.to_string()))?;
        Ok(Self::new(base))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path)
            .map_err(|e| GatewayError::Address(format!("{}: {}", path, e)))
    }
}

/// Read a response body and decode it, normalizing non-2xx statuses.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, GatewayError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        warn!("Service returned {} ({} bytes)", status, body.len());
        return Err(GatewayError::from_status(status.as_u16(), &body, fallback));
    }
    serde_json::from_slice(&body).map_err(|e| GatewayError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl Gateway for HttpGateway {
    async fn upload_file(&self, file: UploadFile) -> Result<DatasetPreview, GatewayError> {
        info!("Uploading dataset {} ({} bytes)", file.name, file.bytes.len());
        let part = Part::bytes(file.bytes).file_name(file.name);
        let form = Form::new().part("file", part);
        let response = self
            .client
            .post(self.endpoint("upload-xml")?)
            .multipart(form)
            .send()
            .await?;
        read_json(response, "Upload failed").await
    }

    async fn fetch_preview(&self, limit: usize) -> Result<DatasetPreview, GatewayError> {
        info!("Fetching preview (limit {})", limit);
        let response = self
            .client
            .get(self.endpoint("preview")?)
            .query(&[("limit", limit)])
            .send()
            .await?;
        read_json(response, "").await
    }

    async fn train(&self, request: &TrainRequest) -> Result<TrainResponse, GatewayError> {
        info!(
            "Training {} model(s) on target '{}'",
            request.selected_models.len(),
            request.target
        );
        let response = self
            .client
            .post(self.endpoint("train")?)
            .json(request)
            .send()
            .await?;
        read_json(response, "").await
    }

    async fn reset_run(&self) -> Result<ResetAck, GatewayError> {
        info!("Resetting server-side run state");
        let response = self.client.post(self.endpoint("reset")?).send().await?;
        read_json(response, "Reset failed").await
    }

    async fn download_artifact(
        &self,
        run_id: &RunId,
        kind: ArtifactKind,
    ) -> Result<Artifact, GatewayError> {
        info!("Downloading {} for run {}", kind.label(), run_id);
        let response = self
            .client
            .get(self.endpoint(kind.path())?)
            .query(&[("run_id", run_id.as_str())])
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(GatewayError::from_status(
                status.as_u16(),
                &bytes,
                kind.failure_message(),
            ));
        }

        Ok(Artifact {
            file_name: kind.file_name(run_id),
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}
