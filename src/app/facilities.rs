use crate::catalog;
use crate::collection::Record;
use crate::ports::AssetUploader;
use crate::ports::RemoteStore;
use crate::state::AppState;
use crate::store::CollectionClient;
use crate::store::Mutation;
use crate::templates;

use axum::extract::Multipart;
use axum::extract::Path as AxumPath;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use serde_json::Value;

use super::admin::{not_found, store_error_page};

/// Pushes a facility photo to the third-party image host and stores the
/// returned URL on the record. The action is absent (404) when no upload
/// endpoint is configured.
pub(crate) async fn facility_image<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath(id): AxumPath<u64>,
    mut multipart: Multipart,
) -> Result<Redirect, Response> {
    let Some(uploader) = state.uploader.as_ref() else {
        return Err(not_found());
    };

    let mut submitted: Option<(String, String, Vec<u8>)> = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                eprintln!("failed to read upload form: {err}");
                return Err(upload_error_page(
                    &state.config.app_name,
                    "The upload form could not be read.",
                ));
            }
        };
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("facility").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        match field.bytes().await {
            Ok(bytes) => submitted = Some((file_name, content_type, bytes.to_vec())),
            Err(err) => {
                eprintln!("failed to read upload body: {err}");
                return Err(upload_error_page(
                    &state.config.app_name,
                    "The image could not be read.",
                ));
            }
        }
    }

    let Some((file_name, content_type, bytes)) = submitted else {
        return Err(upload_error_page(
            &state.config.app_name,
            "No image was selected.",
        ));
    };
    if bytes.is_empty() {
        return Err(upload_error_page(
            &state.config.app_name,
            "The selected image was empty.",
        ));
    }

    let url = match uploader.upload(&file_name, &content_type, bytes).await {
        Ok(url) => url,
        Err(err) => {
            eprintln!("facility image upload failed: {err}");
            return Err(upload_error_page(
                &state.config.app_name,
                "The image host rejected the upload.",
            ));
        }
    };

    let client = CollectionClient::new(&state.store, &catalog::FACILITIES);
    let mut records = client.load().await.map_err(|err| {
        eprintln!("failed to load facilities: {err}");
        store_error_page(&state.config.app_name, "/admin/facilities")
    })?;
    let mut patch = Record::new();
    patch.insert("image".to_string(), Value::from(url));
    client
        .apply(&mut records, Mutation::Update { id, patch })
        .await
        .map_err(|err| {
            eprintln!("failed to sync facilities: {err}");
            store_error_page(&state.config.app_name, "/admin/facilities")
        })?;
    Ok(Redirect::to("/admin/facilities"))
}

fn upload_error_page(app_name: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        templates::ErrorTemplate {
            app_name: app_name.to_string(),
            message: message.to_string(),
            retry_href: "/admin/facilities".to_string(),
        },
    )
        .into_response()
}
