use std::time::Duration;

use futures_util::StreamExt;
use leafid_logging::{leaf_debug, leaf_warn};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::{PlantInfoResponse, PredictResponse};
use crate::{Classification, ClassifyError, FailureKind, UploadFile};

/// A prediction strategy. The engine is handed one at construction.
#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, file: &UploadFile) -> Result<Classification, ClassifyError>;

    /// Uses for `name`, or `None` when the plant is unknown.
    async fn plant_info(&self, name: &str) -> Result<Option<Vec<String>>, ClassifyError>;
}

#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_response_bytes: 1024 * 1024,
        }
    }
}

/// Talks to the classification service over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    settings: RemoteSettings,
    base: Url,
    client: reqwest::Client,
}

impl RemoteClassifier {
    pub fn new(settings: RemoteSettings) -> Result<Self, ClassifyError> {
        let base = parse_base(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClassifyError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClassifyError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClassifyError::new(FailureKind::InvalidUrl, "base url cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClassifyError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_response_bytes;
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(ClassifyError::new(
                FailureKind::TooLarge { max_bytes },
                "response too large",
            ));
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(ClassifyError::new(
                    FailureKind::TooLarge { max_bytes },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&body)
            .map_err(|err| ClassifyError::new(FailureKind::InvalidResponse, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Classifier for RemoteClassifier {
    async fn classify(&self, file: &UploadFile) -> Result<Classification, ClassifyError> {
        let url = self.endpoint(&["predict"])?;
        let part = Part::bytes(file.content.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|err| ClassifyError::new(FailureKind::Misconfigured, err.to_string()))?;
        let form = Form::new().part("file", part);

        leaf_debug!(
            "POST {} name={} bytes={}",
            url,
            file.name,
            file.content.len()
        );
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let parsed: PredictResponse = self.read_json(response).await?;
        parsed.into_classification().inspect_err(|err| {
            if err.kind == FailureKind::Rejected {
                leaf_warn!("Prediction rejected: {}", err.message);
            }
        })
    }

    async fn plant_info(&self, name: &str) -> Result<Option<Vec<String>>, ClassifyError> {
        let url = self.endpoint(&["plant_info", name])?;
        leaf_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let parsed: PlantInfoResponse = self.read_json(response).await?;
        Ok(parsed.into_uses())
    }
}

fn parse_base(raw: &str) -> Result<Url, ClassifyError> {
    let url = Url::parse(raw)
        .map_err(|err| ClassifyError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClassifyError::new(
            FailureKind::InvalidUrl,
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    Ok(url)
}

fn map_reqwest_error(err: reqwest::Error) -> ClassifyError {
    if err.is_timeout() {
        return ClassifyError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ClassifyError::new(FailureKind::InvalidResponse, err.to_string());
    }
    ClassifyError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(base_url: &str) -> RemoteClassifier {
        RemoteClassifier::new(RemoteSettings {
            base_url: base_url.to_string(),
            ..RemoteSettings::default()
        })
        .expect("valid settings")
    }

    #[test]
    fn endpoints_append_to_base_path() {
        let remote = classifier("http://localhost:5000");
        assert_eq!(
            remote.endpoint(&["predict"]).unwrap().as_str(),
            "http://localhost:5000/predict"
        );

        let remote = classifier("http://example.com/api/");
        assert_eq!(
            remote.endpoint(&["predict"]).unwrap().as_str(),
            "http://example.com/api/predict"
        );

        let remote = classifier("http://example.com/api");
        assert_eq!(
            remote.endpoint(&["predict"]).unwrap().as_str(),
            "http://example.com/api/predict"
        );
    }

    #[test]
    fn plant_names_are_percent_encoded() {
        let remote = classifier("http://localhost:5000/");
        assert_eq!(
            remote.endpoint(&["plant_info", "Holy Basil"]).unwrap().as_str(),
            "http://localhost:5000/plant_info/Holy%20Basil"
        );
    }

    #[test]
    fn non_http_base_is_rejected() {
        let err = RemoteClassifier::new(RemoteSettings {
            base_url: "file:///tmp/predict".to_string(),
            ..RemoteSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
