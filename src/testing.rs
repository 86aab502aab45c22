use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use serde_json::Value;

use crate::ports;
use crate::ports::StoreError;
use crate::ports::UploadError;

/// In-memory stand-in for the remote collection store. Missing documents
/// answer 404 like the hosted mock does; writes can be forced to fail to
/// exercise the no-rollback path.
#[derive(Clone, Default)]
pub(crate) struct FakeStore {
    documents: Arc<Mutex<HashMap<u64, Value>>>,
    puts: Arc<AtomicUsize>,
    failing_writes: Arc<AtomicBool>,
    failing_reads: Arc<AtomicBool>,
}

impl FakeStore {
    pub(crate) fn with_document(self, resource: u64, document: Value) -> Self {
        self.documents
            .lock()
            .expect("fake store lock")
            .insert(resource, document);
        self
    }

    pub(crate) fn document(&self, resource: u64) -> Option<Value> {
        self.documents
            .lock()
            .expect("fake store lock")
            .get(&resource)
            .cloned()
    }

    pub(crate) fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn fail_reads(&self, failing: bool) {
        self.failing_reads.store(failing, Ordering::SeqCst);
    }
}

impl ports::RemoteStore for FakeStore {
    type FetchFut<'a> = Pin<Box<dyn Future<Output = Result<Value, StoreError>> + Send + 'a>>;
    type PutFut<'a> = Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;

    fn fetch_document<'a>(&'a self, resource: u64) -> Self::FetchFut<'a> {
        Box::pin(async move {
            if self.failing_reads.load(Ordering::SeqCst) {
                return Err(StoreError::FetchStatus(500));
            }
            self.document(resource)
                .ok_or(StoreError::FetchStatus(404))
        })
    }

    fn put_document<'a>(&'a self, resource: u64, document: &'a Value) -> Self::PutFut<'a> {
        Box::pin(async move {
            if self.failing_writes.load(Ordering::SeqCst) {
                return Err(StoreError::WriteStatus(500));
            }
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.documents
                .lock()
                .expect("fake store lock")
                .insert(resource, document.clone());
            Ok(())
        })
    }
}

/// Upload fake: records what was submitted and answers a fixed URL.
#[derive(Clone)]
pub(crate) struct FakeUploader {
    pub(crate) url: String,
    pub(crate) received: Arc<Mutex<Vec<(String, String, usize)>>>,
    failing: Arc<AtomicBool>,
}

impl Default for FakeUploader {
    fn default() -> Self {
        Self {
            url: "https://assets.example/pool.png".to_string(),
            received: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl FakeUploader {
    pub(crate) fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl ports::AssetUploader for FakeUploader {
    type UploadFut<'a> = Pin<Box<dyn Future<Output = Result<String, UploadError>> + Send + 'a>>;

    fn upload<'a>(
        &'a self,
        file_name: &'a str,
        content_type: &'a str,
        bytes: Vec<u8>,
    ) -> Self::UploadFut<'a> {
        Box::pin(async move {
            if self.failing.load(Ordering::SeqCst) {
                return Err(UploadError::Status(500));
            }
            self.received
                .lock()
                .expect("fake uploader lock")
                .push((file_name.to_string(), content_type.to_string(), bytes.len()));
            Ok(self.url.clone())
        })
    }
}
