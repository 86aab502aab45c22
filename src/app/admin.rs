use crate::catalog;
use crate::catalog::CollectionSpec;
use crate::catalog::FieldKind;
use crate::collection;
use crate::collection::Record;
use crate::collection::field_str;
use crate::export;
use crate::ports::AssetUploader;
use crate::ports::RemoteStore;
use crate::state::AppState;
use crate::status;
use crate::store::CollectionClient;
use crate::store::Mutation;
use crate::templates;
use crate::view;

use axum::extract::Form;
use axum::extract::Path as AxumPath;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    pub(crate) q: Option<String>,
}

pub(crate) async fn dashboard<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
) -> Result<templates::DashboardTemplate, Response> {
    let mut tiles = Vec::with_capacity(catalog::CATALOG.len());
    for spec in catalog::CATALOG {
        let records = CollectionClient::new(&state.store, spec)
            .load()
            .await
            .map_err(|err| {
                eprintln!("failed to load {}: {err}", spec.slug);
                store_error_page(&state.config.app_name, "/admin")
            })?;
        let pending = pending_count(spec, &records);
        tiles.push(templates::DashboardTile {
            slug: spec.slug.to_string(),
            title: spec.title.to_string(),
            total: records.len(),
            pending,
            has_pending: pending > 0,
        });
    }
    Ok(templates::DashboardTemplate {
        app_name: state.config.app_name,
        tiles,
    })
}

fn pending_count(spec: &CollectionSpec, records: &[Record]) -> usize {
    let Some((field, _)) = spec.status_column() else {
        return 0;
    };
    records
        .iter()
        .filter(|record| status::is_pending(&field_str(record, field)))
        .count()
}

pub(crate) async fn collection_page<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath(slug): AxumPath<String>,
    Query(query): Query<SearchQuery>,
) -> Result<templates::CollectionTemplate, Response> {
    let spec = catalog::by_slug(&slug).ok_or_else(not_found)?;
    let records = CollectionClient::new(&state.store, spec)
        .load()
        .await
        .map_err(|err| {
            eprintln!("failed to load {slug}: {err}");
            store_error_page(&state.config.app_name, &format!("/admin/{slug}"))
        })?;
    let query = query.q.unwrap_or_default();
    let filtered = collection::filter_records(&records, &query, spec.search_fields);

    Ok(templates::CollectionTemplate {
        app_name: state.config.app_name,
        title: spec.title.to_string(),
        slug: spec.slug.to_string(),
        query: query.trim().to_string(),
        column_labels: spec
            .columns
            .iter()
            .map(|column| column.label.to_string())
            .collect(),
        rows: view::project_rows(spec, &filtered),
        total: records.len(),
        can_create: spec.can_create,
        can_edit: spec.can_edit,
        can_delete: spec.can_delete,
        is_refunds: spec.slug == catalog::REFUNDS.slug,
    })
}

pub(crate) async fn record_new<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath(slug): AxumPath<String>,
) -> Result<templates::RecordFormTemplate, Response> {
    let spec = catalog::by_slug(&slug)
        .filter(|spec| spec.can_create)
        .ok_or_else(not_found)?;
    Ok(record_form(&state.config.app_name, spec, None, |_| String::new(), String::new()))
}

pub(crate) async fn record_create<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath(slug): AxumPath<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect, Response> {
    let spec = catalog::by_slug(&slug)
        .filter(|spec| spec.can_create)
        .ok_or_else(not_found)?;

    // Required-field validation happens before any network traffic.
    let record = record_from_form(spec, &form).map_err(|message| {
        let rerender =
            record_form(&state.config.app_name, spec, None, |name| form_value(&form, name), message);
        (StatusCode::BAD_REQUEST, rerender).into_response()
    })?;

    let client = CollectionClient::new(&state.store, spec);
    let mut records = client.load().await.map_err(|err| {
        eprintln!("failed to load {slug}: {err}");
        store_error_page(&state.config.app_name, &format!("/admin/{slug}/new"))
    })?;
    client
        .apply(&mut records, Mutation::Insert(record))
        .await
        .map_err(|err| {
            eprintln!("failed to sync {slug}: {err}");
            store_error_page(&state.config.app_name, &format!("/admin/{slug}/new"))
        })?;
    Ok(Redirect::to(&format!("/admin/{slug}")))
}

pub(crate) async fn record_edit<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath((slug, id)): AxumPath<(String, u64)>,
) -> Result<templates::RecordFormTemplate, Response> {
    let spec = catalog::by_slug(&slug)
        .filter(|spec| spec.can_edit)
        .ok_or_else(not_found)?;
    let records = CollectionClient::new(&state.store, spec)
        .load()
        .await
        .map_err(|err| {
            eprintln!("failed to load {slug}: {err}");
            store_error_page(&state.config.app_name, &format!("/admin/{slug}"))
        })?;
    let record = collection::find_record(&records, id).ok_or_else(not_found)?;
    Ok(record_form(
        &state.config.app_name,
        spec,
        Some(id),
        |name| field_str(record, name),
        String::new(),
    ))
}

pub(crate) async fn record_save<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath((slug, id)): AxumPath<(String, u64)>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect, Response> {
    let spec = catalog::by_slug(&slug)
        .filter(|spec| spec.can_edit)
        .ok_or_else(not_found)?;

    let patch = record_from_form(spec, &form).map_err(|message| {
        let rerender = record_form(
            &state.config.app_name,
            spec,
            Some(id),
            |name| form_value(&form, name),
            message,
        );
        (StatusCode::BAD_REQUEST, rerender).into_response()
    })?;

    let client = CollectionClient::new(&state.store, spec);
    let mut records = client.load().await.map_err(|err| {
        eprintln!("failed to load {slug}: {err}");
        store_error_page(&state.config.app_name, &format!("/admin/{slug}"))
    })?;
    client
        .apply(&mut records, Mutation::Update { id, patch })
        .await
        .map_err(|err| {
            eprintln!("failed to sync {slug}: {err}");
            store_error_page(&state.config.app_name, &format!("/admin/{slug}"))
        })?;
    Ok(Redirect::to(&format!("/admin/{slug}")))
}

pub(crate) async fn delete_confirm<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath((slug, id)): AxumPath<(String, u64)>,
) -> Result<templates::ConfirmDeleteTemplate, Response> {
    let spec = catalog::by_slug(&slug)
        .filter(|spec| spec.can_delete)
        .ok_or_else(not_found)?;
    let records = CollectionClient::new(&state.store, spec)
        .load()
        .await
        .map_err(|err| {
            eprintln!("failed to load {slug}: {err}");
            store_error_page(&state.config.app_name, &format!("/admin/{slug}"))
        })?;
    let record = collection::find_record(&records, id).ok_or_else(not_found)?;

    Ok(templates::ConfirmDeleteTemplate {
        app_name: state.config.app_name,
        title: spec.title.to_string(),
        summary: record_summary(spec, record),
        action: format!("/admin/{slug}/{id}/delete"),
        cancel_href: format!("/admin/{slug}"),
    })
}

pub(crate) async fn delete_submit<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath((slug, id)): AxumPath<(String, u64)>,
) -> Result<Redirect, Response> {
    let spec = catalog::by_slug(&slug)
        .filter(|spec| spec.can_delete)
        .ok_or_else(not_found)?;
    let client = CollectionClient::new(&state.store, spec);
    let mut records = client.load().await.map_err(|err| {
        eprintln!("failed to load {slug}: {err}");
        store_error_page(&state.config.app_name, &format!("/admin/{slug}"))
    })?;
    client
        .apply(&mut records, Mutation::Remove { id })
        .await
        .map_err(|err| {
            eprintln!("failed to sync {slug}: {err}");
            store_error_page(&state.config.app_name, &format!("/admin/{slug}"))
        })?;
    Ok(Redirect::to(&format!("/admin/{slug}")))
}

pub(crate) async fn collection_export<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath(slug): AxumPath<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, Response> {
    let spec = catalog::by_slug(&slug).ok_or_else(not_found)?;
    let records = CollectionClient::new(&state.store, spec)
        .load()
        .await
        .map_err(|err| {
            eprintln!("failed to load {slug}: {err}");
            store_error_page(&state.config.app_name, &format!("/admin/{slug}"))
        })?;
    let filtered = collection::filter_records(
        &records,
        &query.q.unwrap_or_default(),
        spec.search_fields,
    );
    let filename = export::export_filename(spec, OffsetDateTime::now_utc());

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/csv; charset=utf-8")
        .header(
            "content-disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(export::csv_document(spec, &filtered).into())
        .unwrap())
}

fn record_form(
    app_name: &str,
    spec: &'static CollectionSpec,
    id: Option<u64>,
    value_of: impl Fn(&str) -> String,
    error: String,
) -> templates::RecordFormTemplate {
    let (heading, action) = match id {
        Some(id) => (
            format!("Edit {} record", spec.title.to_lowercase()),
            format!("/admin/{}/{id}/edit", spec.slug),
        ),
        None => (
            format!("New {} record", spec.title.to_lowercase()),
            format!("/admin/{}/new", spec.slug),
        ),
    };
    templates::RecordFormTemplate {
        app_name: app_name.to_string(),
        title: spec.title.to_string(),
        heading,
        action,
        back_href: format!("/admin/{}", spec.slug),
        error,
        fields: field_views(spec, value_of),
    }
}

fn field_views(
    spec: &CollectionSpec,
    value_of: impl Fn(&str) -> String,
) -> Vec<templates::FieldView> {
    spec.form_fields
        .iter()
        .map(|field| {
            let value = value_of(field.name);
            let options = match field.kind {
                FieldKind::Select(choices) => choices
                    .iter()
                    .map(|choice| templates::SelectOption {
                        value: choice.to_string(),
                        selected: *choice == value,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            templates::FieldView {
                name: field.name.to_string(),
                label: field.label.to_string(),
                value,
                required: field.required,
                is_select: matches!(field.kind, FieldKind::Select(_)),
                is_long: field.kind == FieldKind::LongText,
                input_type: if field.kind == FieldKind::Date {
                    "date"
                } else {
                    "text"
                },
                options,
            }
        })
        .collect()
}

fn form_value(form: &HashMap<String, String>, name: &str) -> String {
    form.get(name).cloned().unwrap_or_default()
}

/// Builds a record (or patch) from the submitted form, keeping only the
/// fields the catalog declares for the feature.
fn record_from_form(
    spec: &CollectionSpec,
    form: &HashMap<String, String>,
) -> Result<Record, String> {
    let mut record = Record::new();
    for field in spec.form_fields {
        let value = form
            .get(field.name)
            .map(|raw| raw.trim())
            .unwrap_or_default();
        if field.required && value.is_empty() {
            return Err(format!("{} is required.", field.label));
        }
        record.insert(field.name.to_string(), Value::from(value));
    }
    Ok(record)
}

fn record_summary(spec: &CollectionSpec, record: &Record) -> String {
    let id = collection::record_id(record).unwrap_or(0);
    match spec.columns.first() {
        Some(column) => {
            let value = field_str(record, column.field);
            if value.trim().is_empty() {
                format!("Record #{id}")
            } else {
                format!("{value} (#{id})")
            }
        }
        None => format!("Record #{id}"),
    }
}

pub(crate) fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
}

/// Store failures degrade to an error page with a manual retry link; nothing
/// retries automatically.
pub(crate) fn store_error_page(app_name: &str, retry_href: &str) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        templates::ErrorTemplate {
            app_name: app_name.to_string(),
            message: "The booking store could not be reached.".to_string(),
            retry_href: retry_href.to_string(),
        },
    )
        .into_response()
}
