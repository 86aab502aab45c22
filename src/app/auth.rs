use crate::catalog;
use crate::collection::field_str;
use crate::ports::AssetUploader;
use crate::ports::RemoteStore;
use crate::state::AppState;
use crate::store::CollectionClient;
use crate::templates;

use axum::body::Body;
use axum::extract::Form;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

/// Gates `/admin` paths behind a valid session cookie. With auth
/// unconfigured the gate stays open, matching the legacy site's loosely
/// enforced admin pages.
pub(crate) async fn admin_gate<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(session) = &state.session else {
        return next.run(req).await;
    };
    if !req.uri().path().starts_with("/admin") {
        return next.run(req).await;
    }
    if let Some(token) = session_cookie(req.headers(), session.cookie_name())
        && session.admin_name(token).is_ok()
    {
        return next.run(req).await;
    }
    Redirect::to("/login").into_response()
}

fn session_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    for header in headers.get_all(COOKIE).iter() {
        if let Ok(raw) = header.to_str()
            && let Some(value) = cookie_from_header(raw, name)
        {
            return Some(value);
        }
    }
    None
}

fn cookie_from_header<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    for part in header.split(';') {
        if let Some((cookie_name, cookie_value)) = part.trim().split_once('=')
            && cookie_name == name
        {
            return Some(cookie_value);
        }
    }
    None
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginQuery {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    name: String,
    password: String,
    next: Option<String>,
}

pub(crate) async fn login_form<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    Query(query): Query<LoginQuery>,
) -> Result<templates::LoginTemplate, (StatusCode, &'static str)> {
    if state.session.is_none() {
        return Err((StatusCode::NOT_FOUND, "not found"));
    }
    Ok(templates::LoginTemplate {
        app_name: state.config.app_name,
        error: String::new(),
        next: sanitize_next(query.next.as_deref()).unwrap_or_else(|| "/admin".to_string()),
    })
}

pub(crate) async fn login_submit<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    Form(form): Form<LoginForm>,
) -> Result<Response, (StatusCode, templates::LoginTemplate)> {
    let Some(session) = state.session.as_ref() else {
        return Err((
            StatusCode::NOT_FOUND,
            templates::LoginTemplate {
                app_name: state.config.app_name.clone(),
                error: "Admin sign-in is not enabled.".to_string(),
                next: String::new(),
            },
        ));
    };
    let name = form.name.trim();
    let password = form.password.trim();
    let next = sanitize_next(form.next.as_deref()).unwrap_or_else(|| "/admin".to_string());

    if name.is_empty() || password.is_empty() {
        return Err(login_error(&state.config.app_name, &next));
    }

    // The store keeps admin credentials in the clear; sign-in is a plain
    // comparison against that collection.
    let admins = match CollectionClient::new(&state.store, &catalog::ADMINS).load().await {
        Ok(admins) => admins,
        Err(err) => {
            eprintln!("failed to load admins: {err}");
            return Err((
                StatusCode::BAD_GATEWAY,
                templates::LoginTemplate {
                    app_name: state.config.app_name,
                    error: "Could not reach the booking store. Try again.".to_string(),
                    next,
                },
            ));
        }
    };

    let matched = admins
        .iter()
        .any(|admin| field_str(admin, "name") == name && field_str(admin, "password") == password);
    if !matched {
        return Err(login_error(&state.config.app_name, &next));
    }

    let token = match session.issue(name) {
        Ok(token) => token,
        Err(err) => {
            eprintln!("failed to issue session token: {err}");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                templates::LoginTemplate {
                    app_name: state.config.app_name,
                    error: "Failed to sign in.".to_string(),
                    next,
                },
            ));
        }
    };

    let mut response = Redirect::to(&next).into_response();
    response.headers_mut().append(
        SET_COOKIE,
        HeaderValue::from_str(&session.login_cookie(&token)).expect("session cookie header"),
    );
    Ok(response)
}

pub(crate) async fn logout<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
) -> Response {
    let Some(session) = state.session.as_ref() else {
        return Redirect::to("/").into_response();
    };
    let mut response = Redirect::to("/login").into_response();
    response.headers_mut().append(
        SET_COOKIE,
        HeaderValue::from_str(&session.logout_cookie()).expect("logout cookie header"),
    );
    response
}

fn sanitize_next(next: Option<&str>) -> Option<String> {
    let next = next?.trim();
    if next.is_empty() {
        return None;
    }
    if !next.starts_with('/') || next.starts_with("//") || next.contains("://") {
        return None;
    }
    Some(next.to_string())
}

fn login_error(app_name: &str, next: &str) -> (StatusCode, templates::LoginTemplate) {
    (
        StatusCode::UNAUTHORIZED,
        templates::LoginTemplate {
            app_name: app_name.to_string(),
            error: "Invalid name or password.".to_string(),
            next: next.to_string(),
        },
    )
}
