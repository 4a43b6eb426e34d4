use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("storage returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// Bucket-scoped object storage.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
        upsert: bool,
    ) -> Result<(), StorageError>;

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError>;

    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Recovers the object path from a public URL previously issued for `bucket`.
    fn object_path(&self, bucket: &str, url: &str) -> Option<String> {
        let prefix = self.public_url(bucket, "");
        url.trim_end_matches('?')
            .strip_prefix(&prefix)
            .filter(|path| !path.is_empty())
            .map(str::to_owned)
    }
}

#[derive(Clone)]
pub struct SupabaseStorage {
    http_client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStorage {
    pub fn new(http_client: Client, project_url: &str, service_key: &str) -> Self {
        Self {
            http_client,
            base_url: format!("{}/storage/v1", project_url.trim_end_matches('/')),
            service_key: service_key.to_string(),
        }
    }
}

async fn check(response: Response) -> Result<(), StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let message = response.text().await.unwrap_or_default();
    Err(StorageError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
        upsert: bool,
    ) -> Result<(), StorageError> {
        let response = self
            .http_client
            .post(format!("{}/object/{}/{}", self.base_url, bucket, path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes)
            .send()
            .await?;
        check(response).await
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        let response = self
            .http_client
            .delete(format!("{}/object/{}", self.base_url, bucket))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&json!({ "prefixes": paths }))
            .send()
            .await?;
        check(response).await
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/object/public/{}/{}", self.base_url, bucket, path)
    }
}
