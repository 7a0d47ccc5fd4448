//! Public resolve handlers: the redirect hot path and the password gate.

use axum::{
    Form, Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};

use crate::api::dto::resolve::{PasswordForm, PasswordGateResponse};
use crate::application::services::{Resolution, VisitorMeta};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_domain::extract_hostname;

/// CDN geography headers consulted for coarse location. Raw IPs are
/// never read for analytics.
const COUNTRY_HEADERS: &[&str] = &["cf-ipcountry", "x-geo-country"];
const CITY_HEADERS: &[&str] = &["x-geo-city"];

/// Resolves a short link and redirects.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - `307` — redirect to the destination (the click is counted)
/// - `401` — password required (no click counted)
/// - `404` — unknown, paused or expired; deliberately indistinguishable
pub async fn resolve_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let hostname = extract_hostname(&headers)?;
    let visitor = visitor_meta(&headers);

    let outcome = state
        .resolution
        .resolve(&hostname, &code, None, visitor)
        .await?;

    Ok(render(outcome))
}

/// Accepts a password for a protected link and redirects on success.
///
/// # Endpoint
///
/// `POST /{code}` (form body `password=...`)
pub async fn resolve_with_password_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PasswordForm>,
) -> Result<Response, AppError> {
    let hostname = extract_hostname(&headers)?;
    let visitor = visitor_meta(&headers);

    let outcome = state
        .resolution
        .resolve(&hostname, &code, Some(&form.password), visitor)
        .await?;

    Ok(render(outcome))
}

/// Maps a resolution outcome onto the wire.
///
/// `NotFound` and `Expired` collapse into one generic 404 so visitors
/// cannot probe which codes exist or once existed.
fn render(outcome: Resolution) -> Response {
    match outcome {
        Resolution::Redirect { destination } => Redirect::temporary(&destination).into_response(),
        Resolution::PasswordRequired => (
            StatusCode::UNAUTHORIZED,
            Json(PasswordGateResponse::new()),
        )
            .into_response(),
        Resolution::NotFound | Resolution::Expired => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "not_found",
                "message": "This link does not exist or is no longer available."
            })),
        )
            .into_response(),
    }
}

fn visitor_meta(headers: &HeaderMap) -> VisitorMeta {
    let get = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let get_first = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()))
            .map(str::to_string)
    };

    VisitorMeta {
        referrer: get(header::REFERER),
        user_agent: get(header::USER_AGENT),
        country: get_first(COUNTRY_HEADERS),
        city: get_first(CITY_HEADERS),
    }
}
