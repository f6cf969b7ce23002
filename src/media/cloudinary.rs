//! Client Cloudinary per il media host

use super::{ImageUpload, MediaError, MediaHost, UploadedImage};
use crate::core::config::CloudinaryConfig;
use chrono::Utc;
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

const API_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

// crop 500x500 centrato sul volto, eseguito dal media host
const UPLOAD_TRANSFORMATION: &str = "c_fill,g_face,h_500,w_500";

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: Option<String>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    client: Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl CloudinaryClient {
    pub fn new(config: &CloudinaryConfig) -> Self {
        Self {
            client: Client::new(),
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", self.base_url, self.cloud_name, action)
    }

    /// Firma SHA-256 dei parametri: `k1=v1&k2=v2...` ordinati per chiave, seguiti dal secret
    fn sign(&self, params: &[(&str, String)]) -> String {
        let mut sorted: Vec<&(&str, String)> = params.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let to_sign = sorted
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    #[instrument(skip(self, image), fields(file_name = %image.file_name, size = image.bytes.len()))]
    async fn upload_image(&self, image: ImageUpload) -> Result<UploadedImage, MediaError> {
        if image.bytes.is_empty() {
            return Err(MediaError::EmptyFile);
        }

        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("timestamp", timestamp.clone()),
            ("transformation", UPLOAD_TRANSFORMATION.to_string()),
        ]);

        let mut part = Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("transformation", UPLOAD_TRANSFORMATION)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        debug!("Uploading image to media host");
        let body: UploadResponse = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;

        match body {
            UploadResponse {
                secure_url: Some(url),
                public_id: Some(public_id),
                ..
            } => {
                info!("Image uploaded with public id {}", public_id);
                Ok(UploadedImage { url, public_id })
            }
            UploadResponse { error, .. } => {
                let message = error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "upload response without url".to_string());
                warn!("Upload rejected: {}", message);
                Err(MediaError::Rejected(message))
            }
        }
    }

    #[instrument(skip(self))]
    async fn destroy_image(&self, public_id: &str) -> Result<bool, MediaError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp.clone()),
        ]);

        let params = [
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp),
            ("api_key", self.api_key.clone()),
            ("signature", signature),
            ("signature_algorithm", "sha256".to_string()),
        ];

        let body: DestroyResponse = self
            .client
            .post(self.endpoint("destroy"))
            .form(&params)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = body.error {
            return Err(MediaError::Rejected(error.message));
        }

        let removed = body.result.as_deref() == Some("ok");
        if !removed {
            warn!("Media host did not remove image: {:?}", body.result);
        }
        Ok(removed)
    }
}

impl MediaHost for CloudinaryClient {
    fn upload(&self, image: ImageUpload) -> BoxFuture<'_, Result<UploadedImage, MediaError>> {
        self.upload_image(image).boxed()
    }

    fn destroy<'a>(&'a self, public_id: &'a str) -> BoxFuture<'a, Result<bool, MediaError>> {
        self.destroy_image(public_id).boxed()
    }
}
