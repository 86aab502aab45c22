use std::pin::Pin;

use serde_json::Value;

use crate::config;
use crate::ports;
use crate::ports::StoreError;
use crate::ports::UploadError;

/// HTTP adapter for the remote collection store: plain GET for reads, PUT
/// with a JSON body for full-document writes, against `<base>/admin/<id>`.
/// The client carries no request timeout and nothing here retries; a hung
/// upstream holds only the request that hit it.
#[derive(Clone)]
pub struct HttpRemoteStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRemoteStore {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("innboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| panic!("failed to build HTTP client: {err}"));
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn resource_url(&self, resource: u64) -> String {
        format!("{}/admin/{resource}", self.base_url)
    }
}

impl ports::RemoteStore for HttpRemoteStore {
    type FetchFut<'a> = Pin<Box<dyn Future<Output = Result<Value, StoreError>> + Send + 'a>>;
    type PutFut<'a> = Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;

    fn fetch_document<'a>(&'a self, resource: u64) -> Self::FetchFut<'a> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.resource_url(resource))
                .send()
                .await
                .map_err(|err| StoreError::Transport(err.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(StoreError::FetchStatus(status.as_u16()));
            }
            response
                .json::<Value>()
                .await
                .map_err(|err| StoreError::Transport(err.to_string()))
        })
    }

    fn put_document<'a>(&'a self, resource: u64, document: &'a Value) -> Self::PutFut<'a> {
        Box::pin(async move {
            let response = self
                .client
                .put(self.resource_url(resource))
                .json(document)
                .send()
                .await
                .map_err(|err| StoreError::Transport(err.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(StoreError::WriteStatus(status.as_u16()));
            }
            Ok(())
        })
    }
}

/// Multipart adapter for the third-party image host: one POST with the
/// binary part and the fixed preset name, answered with a JSON body whose
/// `secure_url` field is stored on the record verbatim.
#[derive(Clone)]
pub struct HttpAssetUploader {
    endpoint: String,
    preset: String,
    client: reqwest::Client,
}

impl HttpAssetUploader {
    pub fn new(upload: config::UploadConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("innboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| panic!("failed to build HTTP client: {err}"));
        Self {
            endpoint: upload.endpoint,
            preset: upload.preset,
            client,
        }
    }
}

impl ports::AssetUploader for HttpAssetUploader {
    type UploadFut<'a> = Pin<Box<dyn Future<Output = Result<String, UploadError>> + Send + 'a>>;

    fn upload<'a>(
        &'a self,
        file_name: &'a str,
        content_type: &'a str,
        bytes: Vec<u8>,
    ) -> Self::UploadFut<'a> {
        Box::pin(async move {
            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(file_name.to_string())
                .mime_str(content_type)
                .map_err(|err| UploadError::Transport(err.to_string()))?;
            let form = reqwest::multipart::Form::new()
                .text("upload_preset", self.preset.clone())
                .part("file", part);
            let response = self
                .client
                .post(&self.endpoint)
                .multipart(form)
                .send()
                .await
                .map_err(|err| UploadError::Transport(err.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(UploadError::Status(status.as_u16()));
            }
            let payload: Value = response
                .json()
                .await
                .map_err(|err| UploadError::Transport(err.to_string()))?;
            payload
                .get("secure_url")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(UploadError::MissingUrl)
        })
    }
}
