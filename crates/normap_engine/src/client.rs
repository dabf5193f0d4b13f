use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};

use crate::{AttemptId, FailureKind, Prediction, SubmitError, UploadPayload};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const UPLOAD_PATH: &str = "process_file";
pub const PREDICT_PATH: &str = "predict";
/// Multipart field carrying the payload.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Overall request deadline; `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

impl SubmitSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    /// Uploads one payload and returns the parsed JSON body.
    async fn submit(
        &self,
        attempt: AttemptId,
        payload: UploadPayload,
    ) -> Result<Value, SubmitError>;

    /// Normalizes a single line through the JSON endpoint.
    async fn predict(&self, text: &str) -> Result<Prediction, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SubmitSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, SubmitError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))
    }

    fn endpoint_url(&self, path: &str) -> Result<reqwest::Url, SubmitError> {
        reqwest::Url::parse(&self.settings.endpoint(path))
            .map_err(|err| SubmitError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(
        &self,
        attempt: AttemptId,
        payload: UploadPayload,
    ) -> Result<Value, SubmitError> {
        let url = self.endpoint_url(UPLOAD_PATH)?;
        let client = self.build_client()?;

        engine_info!(
            "Submitting attempt={} name={} bytes={} to {}",
            attempt,
            payload.file_name,
            payload.bytes.len(),
            url
        );

        let mut part = Part::bytes(payload.bytes).file_name(payload.file_name);
        if !payload.media_type.is_empty() {
            part = part
                .mime_str(&payload.media_type)
                .map_err(|err| SubmitError::new(FailureKind::InvalidPayload, err.to_string()))?;
        }
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let body = read_success_body(response).await?;
        engine_debug!("attempt={} received {} bytes", attempt, body.len());
        parse_json(&body)
    }

    async fn predict(&self, text: &str) -> Result<Prediction, SubmitError> {
        let url = self.endpoint_url(PREDICT_PATH)?;
        let client = self.build_client()?;

        engine_info!("Predicting {} chars via {}", text.chars().count(), url);

        let response = client
            .post(url)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let body = read_success_body(response).await?;
        serde_json::from_slice(&body)
            .map_err(|err| SubmitError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<Vec<u8>, SubmitError> {
    let status = response.status();
    engine_debug!("{} answered {}", response.url(), status);
    if !status.is_success() {
        return Err(SubmitError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    Ok(bytes.to_vec())
}

fn parse_json(body: &[u8]) -> Result<Value, SubmitError> {
    serde_json::from_slice(body)
        .map_err(|err| SubmitError::new(FailureKind::MalformedResponse, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let settings = SubmitSettings::with_base_url("http://normap.local:5000/");
        assert_eq!(
            settings.endpoint(UPLOAD_PATH),
            "http://normap.local:5000/process_file"
        );
        assert_eq!(
            SubmitSettings::default().endpoint(PREDICT_PATH),
            "http://localhost:5000/predict"
        );
    }

    #[test]
    fn defaults_have_no_request_deadline() {
        let settings = SubmitSettings::default();
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert!(settings.request_timeout.is_none());
    }
}
