use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::AppError;
use crate::models::property::PropertyView;
use crate::property::{service, snapshot};
use crate::state::AppState;

/// CORS headers for the public endpoint. The allow-origin value is computed
/// per tenant from the property's domain allow-list; anything else gets the
/// literal `null` so embedding from unknown origins fails in the browser.
/// `method` echoes the served verb: `GET` on reads, `OPTIONS` on preflights.
fn cors_headers(
    view: &PropertyView,
    origin: Option<&str>,
    method: &str,
) -> [(header::HeaderName, String); 3] {
    let allow_origin = match origin {
        Some(origin) => {
            let origin = origin.to_lowercase();
            if view.domains.iter().any(|d| *d == origin) {
                origin
            } else {
                "null".to_string()
            }
        }
        None => "null".to_string(),
    };
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "Content-Type, Authorization".to_string(),
        ),
        (header::ACCESS_CONTROL_ALLOW_METHODS, method.to_string()),
    ]
}

/// Resolve the tenant's property for the public surface. Every load
/// failure collapses into the plain-text 404; backend errors are logged
/// but never surfaced to embedders.
async fn load_view(
    state: &AppState,
    username: &str,
) -> Result<std::sync::Arc<PropertyView>, Response> {
    match service::get_property_view(state, username).await {
        Ok(view) => Ok(view),
        Err(AppError::NotFound(_)) => {
            Err((StatusCode::NOT_FOUND, "Not Found").into_response())
        }
        Err(e) => {
            tracing::error!("Public property lookup for '{username}' failed: {e:?}");
            Err((StatusCode::NOT_FOUND, "Not Found").into_response())
        }
    }
}

fn origin_of(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::ORIGIN).and_then(|v| v.to_str().ok())
}

fn bearer_of(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// `?draft` selects the live document; presence is enough, no value needed.
fn has_draft_flag(query: Option<&str>) -> bool {
    query.is_some_and(|q| {
        q.split('&')
            .any(|pair| pair == "draft" || pair.starts_with("draft="))
    })
}

/// Serve the rendered property document to embedding sites.
///
/// This endpoint speaks plain text on failure and never uses the admin
/// API's JSON error shape; embedders only see `Not Found` or
/// `Unauthorized`. Reads gate on the per-property access token alone.
#[instrument(skip(state, headers, query))]
pub async fn get_public_property(
    State(state): State<AppState>,
    Path(username): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let view = match load_view(&state, &username).await {
        Ok(view) => view,
        Err(response) => return response,
    };

    let cors = cors_headers(&view, origin_of(&headers), "GET");

    if bearer_of(&headers) != Some(view.access_token.as_str()) {
        return (StatusCode::UNAUTHORIZED, cors, "Unauthorized").into_response();
    }

    // Draft mode off: always the live list. Draft mode on: the live list
    // only behind the ?draft flag, the frozen snapshot otherwise.
    let blocks = if !view.is_draft || has_draft_flag(query.as_deref()) {
        view.blocks.clone()
    } else {
        match view.fixed_data.as_deref().map(snapshot::parse_snapshot) {
            Some(Ok(blocks)) => blocks,
            Some(Err(e)) => {
                tracing::error!("Stored snapshot for '{username}' is corrupt: {e:?}");
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                    .into_response();
            }
            None => vec![],
        }
    };

    let html = render::render_document(&blocks, &view.style, None);

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            "text/html; charset=utf-8".to_string(),
        )],
        cors,
        html,
    )
        .into_response()
}

/// CORS preflight for the public endpoint. Performs the same property load
/// as the read path (missing tenants stay 404), but no token check:
/// browsers send preflights without credentials.
#[instrument(skip(state, headers))]
pub async fn options_public_property(
    State(state): State<AppState>,
    Path(username): Path<String>,
    headers: HeaderMap,
) -> Response {
    let view = match load_view(&state, &username).await {
        Ok(view) => view,
        Err(response) => return response,
    };
    let cors = cors_headers(&view, origin_of(&headers), "OPTIONS");
    (StatusCode::OK, cors).into_response()
}
