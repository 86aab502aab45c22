use crate::auth::AdminSession;
use crate::config::AppConfig;
use crate::ports::AssetUploader;
use crate::ports::RemoteStore;

#[derive(Clone)]
pub(crate) struct AppState<S: RemoteStore, U: AssetUploader> {
    pub(crate) config: AppConfig,
    pub(crate) session: Option<AdminSession>,
    pub(crate) store: S,
    /// Absent when no upload endpoint is configured; the facility image
    /// action then answers 404.
    pub(crate) uploader: Option<U>,
}
