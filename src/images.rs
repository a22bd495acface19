use reqwest::Client;
use serde::Deserialize;

use crate::config::ImageHostConfig;
use crate::error::{AppError, AppResult};

/// Client for the external image hosting service. Event images are passed
/// through as raw bytes; only the returned URL is stored.
#[derive(Clone)]
pub struct ImageHost {
    client: Client,
    config: ImageHostConfig,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

impl ImageHost {
    pub fn new(config: ImageHostConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.upload_url.is_some()
    }

    /// Upload image bytes and return the hosted URL.
    pub async fn upload(&self, bytes: Vec<u8>, content_type: &str) -> AppResult<String> {
        let url = self
            .config
            .upload_url
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("Image uploads are not configured".into()))?;

        let mut request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ImageUpload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::ImageUpload(format!(
                "image host returned {}",
                response.status()
            )));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::ImageUpload(e.to_string()))?;
        Ok(parsed.url)
    }
}
