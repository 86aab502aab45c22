use crate::assets;
use crate::auth as auth_service;
use crate::config;
use crate::ports::AssetUploader;
use crate::ports::RemoteStore;
use crate::state;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;

mod admin;
mod auth;
mod facilities;
mod public;
mod refunds;

pub(crate) fn app<S: RemoteStore, U: AssetUploader>(
    config: config::AppConfig,
    store: S,
    uploader: Option<U>,
) -> Router {
    let session = auth_service::AdminSession::from_config(&config)
        .unwrap_or_else(|err| panic!("invalid auth configuration: {err}"));
    let state = state::AppState {
        config,
        session,
        store,
        uploader,
    };
    Router::new()
        .route("/", get(public::home::<S, U>))
        .route(
            "/book/{room_id}",
            get(public::booking_form::<S, U>).post(public::booking_submit::<S, U>),
        )
        .route(
            "/contact",
            get(public::contact_form::<S, U>).post(public::contact_submit::<S, U>),
        )
        .route(
            "/login",
            get(auth::login_form::<S, U>).post(auth::login_submit::<S, U>),
        )
        .route("/logout", post(auth::logout::<S, U>))
        .route("/admin", get(admin::dashboard::<S, U>))
        .route("/admin/{slug}", get(admin::collection_page::<S, U>))
        .route(
            "/admin/{slug}/new",
            get(admin::record_new::<S, U>).post(admin::record_create::<S, U>),
        )
        .route("/admin/{slug}/export", get(admin::collection_export::<S, U>))
        .route(
            "/admin/{slug}/{id}/edit",
            get(admin::record_edit::<S, U>).post(admin::record_save::<S, U>),
        )
        .route(
            "/admin/{slug}/{id}/delete",
            get(admin::delete_confirm::<S, U>).post(admin::delete_submit::<S, U>),
        )
        .route(
            "/admin/refunds/{id}/approve",
            post(refunds::refund_approve::<S, U>),
        )
        .route(
            "/admin/refunds/{id}/reject",
            get(refunds::refund_reject_form::<S, U>).post(refunds::refund_reject_submit::<S, U>),
        )
        .route(
            "/admin/facilities/{id}/image",
            post(facilities::facility_image::<S, U>),
        )
        .route("/static/style.css", get(assets::stylesheet))
        .route("/health", get(health))
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            state,
            auth::admin_gate::<S, U>,
        ))
}

pub(crate) async fn health() -> &'static str {
    "ok"
}
