use serde_json::Value;

/// Read failures and write failures carry the upstream HTTP status so the
/// pages can surface it next to the retry affordance.
#[derive(Debug)]
pub enum StoreError {
    FetchStatus(u16),
    WriteStatus(u16),
    Transport(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::FetchStatus(status) => {
                write!(f, "store read rejected with HTTP status {status}")
            }
            StoreError::WriteStatus(status) => {
                write!(f, "store write rejected with HTTP status {status}")
            }
            StoreError::Transport(detail) => write!(f, "store unreachable: {detail}"),
        }
    }
}

#[derive(Debug)]
pub enum UploadError {
    Status(u16),
    MissingUrl,
    Transport(String),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::Status(status) => {
                write!(f, "upload rejected with HTTP status {status}")
            }
            UploadError::MissingUrl => f.write_str("upload response carried no URL"),
            UploadError::Transport(detail) => write!(f, "upload endpoint unreachable: {detail}"),
        }
    }
}

/// The remote collection store: one JSON document per resource, read whole
/// and replaced whole. Last write wins; there is no partial-update verb.
pub trait RemoteStore: Clone + Send + Sync + 'static {
    type FetchFut<'a>: Future<Output = Result<Value, StoreError>> + Send + 'a
    where
        Self: 'a;
    type PutFut<'a>: Future<Output = Result<(), StoreError>> + Send + 'a
    where
        Self: 'a;

    fn fetch_document<'a>(&'a self, resource: u64) -> Self::FetchFut<'a>;
    fn put_document<'a>(&'a self, resource: u64, document: &'a Value) -> Self::PutFut<'a>;
}

/// Hands a binary image to the third-party upload endpoint and returns the
/// secure URL to store verbatim on the record.
pub trait AssetUploader: Clone + Send + Sync + 'static {
    type UploadFut<'a>: Future<Output = Result<String, UploadError>> + Send + 'a
    where
        Self: 'a;

    fn upload<'a>(
        &'a self,
        file_name: &'a str,
        content_type: &'a str,
        bytes: Vec<u8>,
    ) -> Self::UploadFut<'a>;
}
