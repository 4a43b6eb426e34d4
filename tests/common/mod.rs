#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header::CONTENT_TYPE, Request, Response},
    Router,
};
use fansite_api::{
    routes::build_router,
    utils::{
        config::Config,
        state::{postgrest_client, AppState},
        storage::{ObjectStorage, StorageError},
    },
};
use mockito::{Server, ServerGuard};
use serde_json::Value;
use tower::ServiceExt;

pub const BOUNDARY: &str = "fansite-test-boundary";

#[derive(Debug, Clone, PartialEq)]
pub enum StorageOp {
    Upload {
        bucket: String,
        path: String,
        content_type: String,
    },
    Remove {
        bucket: String,
        paths: Vec<String>,
    },
}

/// Object storage that records every call instead of talking to a backend.
#[derive(Default)]
pub struct RecordingStorage {
    ops: Mutex<Vec<StorageOp>>,
}

impl RecordingStorage {
    pub fn ops(&self) -> Vec<StorageOp> {
        self.ops.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for RecordingStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        _bytes: Bytes,
        content_type: &str,
        _upsert: bool,
    ) -> Result<(), StorageError> {
        self.ops.lock().unwrap().push(StorageOp::Upload {
            bucket: bucket.to_string(),
            path: path.to_string(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        self.ops.lock().unwrap().push(StorageOp::Remove {
            bucket: bucket.to_string(),
            paths: paths.to_vec(),
        });
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://cdn.test/{}/{}", bucket, path)
    }
}

pub struct TestApp {
    pub server: ServerGuard,
    pub storage: Arc<RecordingStorage>,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let config = Config {
            supabase_url: server.url(),
            supabase_service_key: "service-key".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            audio_bucket: "songs".to_string(),
            cover_bucket: "covers".to_string(),
            news_image_bucket: "covers".to_string(),
        };
        let storage = Arc::new(RecordingStorage::default());
        let state = Arc::new(AppState {
            supabase: postgrest_client(&config),
            storage: storage.clone(),
            config,
        });

        TestApp {
            server,
            storage,
            router: build_router(state),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart(method: &str, uri: &str, parts: &[Part]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn urlencoded(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
