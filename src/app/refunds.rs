use crate::catalog;
use crate::collection;
use crate::collection::Record;
use crate::format;
use crate::ports::AssetUploader;
use crate::ports::RemoteStore;
use crate::state::AppState;
use crate::store::CollectionClient;
use crate::store::Mutation;
use crate::templates;

use axum::extract::Form;
use axum::extract::Path as AxumPath;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

use super::admin::{not_found, store_error_page};

/// Approval is a specialized update: set the status and stamp the
/// processed date, then resync the whole collection.
pub(crate) async fn refund_approve<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath(id): AxumPath<u64>,
) -> Result<Redirect, Response> {
    let client = CollectionClient::new(&state.store, &catalog::REFUNDS);
    let mut records = client.load().await.map_err(|err| {
        eprintln!("failed to load refunds: {err}");
        store_error_page(&state.config.app_name, "/admin/refunds")
    })?;
    let patch = approve_patch(OffsetDateTime::now_utc().date());
    client
        .apply(&mut records, Mutation::Update { id, patch })
        .await
        .map_err(|err| {
            eprintln!("failed to sync refunds: {err}");
            store_error_page(&state.config.app_name, "/admin/refunds")
        })?;
    Ok(Redirect::to("/admin/refunds"))
}

pub(crate) async fn refund_reject_form<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath(id): AxumPath<u64>,
) -> Result<templates::RejectTemplate, Response> {
    let client = CollectionClient::new(&state.store, &catalog::REFUNDS);
    let records = client.load().await.map_err(|err| {
        eprintln!("failed to load refunds: {err}");
        store_error_page(&state.config.app_name, "/admin/refunds")
    })?;
    let record = collection::find_record(&records, id).ok_or_else(not_found)?;
    Ok(reject_template(&state.config.app_name, id, record, String::new(), String::new()))
}

#[derive(Debug, Deserialize)]
pub(crate) struct RejectForm {
    reason: String,
}

pub(crate) async fn refund_reject_submit<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath(id): AxumPath<u64>,
    Form(form): Form<RejectForm>,
) -> Result<Redirect, Response> {
    let reason = form.reason.trim().to_string();

    let client = CollectionClient::new(&state.store, &catalog::REFUNDS);
    let records = client.load().await.map_err(|err| {
        eprintln!("failed to load refunds: {err}");
        store_error_page(&state.config.app_name, "/admin/refunds")
    })?;
    let record = collection::find_record(&records, id).ok_or_else(not_found)?;

    // An empty reason is refused locally; the collection stays untouched
    // and no write goes out.
    if reason.is_empty() {
        let rerender = reject_template(
            &state.config.app_name,
            id,
            record,
            "A reason is required to reject a refund.".to_string(),
            reason,
        );
        return Err((StatusCode::BAD_REQUEST, rerender).into_response());
    }

    let mut records = records;
    let patch = reject_patch(&reason, OffsetDateTime::now_utc().date());
    client
        .apply(&mut records, Mutation::Update { id, patch })
        .await
        .map_err(|err| {
            eprintln!("failed to sync refunds: {err}");
            store_error_page(&state.config.app_name, "/admin/refunds")
        })?;
    Ok(Redirect::to("/admin/refunds"))
}

fn approve_patch(today: time::Date) -> Record {
    let mut patch = Record::new();
    patch.insert("refundStatus".to_string(), Value::from("approved"));
    patch.insert("processedDate".to_string(), Value::from(format::iso_date(today)));
    patch
}

/// Rejection records the reason and zeroes the amount so the table shows
/// `$0` for refunds that will never be paid out.
fn reject_patch(reason: &str, today: time::Date) -> Record {
    let mut patch = Record::new();
    patch.insert("refundStatus".to_string(), Value::from("rejected"));
    patch.insert("rejectReason".to_string(), Value::from(reason));
    patch.insert("refundAmount".to_string(), Value::from(0));
    patch.insert("processedDate".to_string(), Value::from(format::iso_date(today)));
    patch
}

fn reject_template(
    app_name: &str,
    id: u64,
    record: &Record,
    error: String,
    reason: String,
) -> templates::RejectTemplate {
    let guest = collection::field_str(record, "name");
    let amount = format::display_price(record.get("refundAmount"));
    let summary = if guest.trim().is_empty() {
        format!("Refund request #{id} for {amount}.")
    } else {
        format!("Refund request #{id} from {guest} for {amount}.")
    };
    templates::RejectTemplate {
        app_name: app_name.to_string(),
        summary,
        action: format!("/admin/refunds/{id}/reject"),
        error,
        reason,
    }
}
