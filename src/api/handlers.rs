use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

use crate::{
    config::NotFoundMode,
    error::{AppError, Result},
    state::AppState,
    types::{
        NameForm, ShortenForm, ShortenRequest, ShortenResponse, ShortenerView, UrlDetailResponse,
    },
    views,
};

pub const NOT_FOUND_MESSAGE: &str = "Short URL not found.";

fn request_host(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::HOST).and_then(|value| value.to_str().ok())
}

fn short_url(state: &AppState, headers: &HeaderMap, short_code: &str) -> String {
    format!("{}/{}", state.link_root(request_host(headers)), short_code)
}

// `Redirect::temporary` panics on values that are not valid header values,
// which unvalidated submissions can produce
fn redirect_to(long_url: &str) -> Response {
    match HeaderValue::try_from(long_url) {
        Ok(location) => {
            (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response()
        }
        Err(e) => {
            error!(error = %e, long_url = %long_url, "Stored URL is not a valid Location header");
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            (status, views::error_page(status, "This link cannot be followed.")).into_response()
        }
    }
}

#[instrument]
pub async fn health_check() -> (StatusCode, Json<Value>) {
    let response = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

pub async fn shortener_form() -> impl IntoResponse {
    views::shortener_page(&ShortenerView::default())
}

#[instrument(skip(state, headers, form))]
pub async fn submit_long_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ShortenForm>,
) -> Result<Response> {
    match state.shortener.shorten(&form.long_url).await {
        Ok(mapping) => {
            let short_url = short_url(&state, &headers, &mapping.short_code);
            Ok(views::shortener_page(&ShortenerView::created(short_url)).into_response())
        }
        Err(err @ AppError::InvalidUrl(_)) => {
            let view = ShortenerView::error(err.public_message(), Some(form.long_url));
            Ok((StatusCode::BAD_REQUEST, views::shortener_page(&view)).into_response())
        }
        Err(err) => Err(err),
    }
}

#[instrument(skip(state))]
pub async fn handle_short_url(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Response> {
    if let Some(long_url) = state.shortener.resolve(&short_code).await? {
        info!(short_code = %short_code, "Redirecting to long URL");
        return Ok(redirect_to(&long_url));
    }

    warn!(short_code = %short_code, "Short code not found");
    let response = match state.not_found {
        NotFoundMode::Inline => {
            views::shortener_page(&ShortenerView::error(NOT_FOUND_MESSAGE, None)).into_response()
        }
        NotFoundMode::Page => {
            (StatusCode::NOT_FOUND, views::not_found_page(&short_code)).into_response()
        }
    };
    Ok(response)
}

#[instrument(skip(state))]
pub async fn names_form(State(state): State<AppState>) -> Result<Response> {
    let records = state.names.list_all().await?;
    Ok(views::names_page(&records).into_response())
}

#[instrument(skip(state, form))]
pub async fn submit_name(
    State(state): State<AppState>,
    Form(form): Form<NameForm>,
) -> Result<Redirect> {
    // stored verbatim, whitespace included
    if !form.name.is_empty() {
        state.names.insert(&form.name).await?;
    }
    Ok(Redirect::to("/"))
}

#[instrument(skip(state, headers, payload))]
pub async fn create_short_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(payload) => payload.0,
        Err(rejection) => {
            let error_message = match rejection {
                JsonRejection::MissingJsonContentType(_) => {
                    json!({"error": "Expected 'Content-Type: application/json' header"})
                }
                JsonRejection::JsonSyntaxError(_) => json!({"error": "JSON syntax error"}),
                JsonRejection::JsonDataError(_) => json!({"error": "JSON data structure mismatch"}),
                _ => json!({"error": "Unknown JSON parsing error"}),
            };
            error!(error = ?rejection, "JSON parsing error");
            return (StatusCode::BAD_REQUEST, Json(error_message)).into_response();
        }
    };

    match state.shortener.shorten(&payload.long_url).await {
        Ok(mapping) => {
            let response = ShortenResponse {
                short_url: short_url(&state, &headers, &mapping.short_code),
                short_code: mapping.short_code,
                long_url: mapping.long_url,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => {
            let status = err.status_code();
            if status.is_server_error() {
                error!(error = %err, "Failed to create short URL");
            }
            (status, Json(json!({"error": err.public_message()}))).into_response()
        }
    }
}

#[instrument(skip(state, headers))]
pub async fn get_short_url_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(short_code): Path<String>,
) -> std::result::Result<Json<UrlDetailResponse>, StatusCode> {
    match state.shortener.store().find(&short_code).await {
        Ok(Some(detail)) => Ok(Json(UrlDetailResponse {
            short_url: short_url(&state, &headers, &detail.short_code),
            short_code: detail.short_code,
            long_url: detail.long_url,
        })),
        Ok(None) => {
            warn!(short_code = %short_code, "Short code not found");
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            error!(error = %e, "Database error");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
