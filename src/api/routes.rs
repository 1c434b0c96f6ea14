use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::{config::AppMode, state::AppState};

use super::handlers;

pub fn router(state: AppState, mode: AppMode) -> Router {
    let routes = match mode {
        AppMode::Shortener => Router::new()
            .route(
                "/",
                get(handlers::shortener_form).post(handlers::submit_long_url),
            )
            .route("/{short_code}", get(handlers::handle_short_url))
            .route("/api/v1/shorten", post(handlers::create_short_url))
            .route(
                "/api/v1/urls/{short_code}",
                get(handlers::get_short_url_details),
            ),
        AppMode::Names => {
            Router::new().route("/", get(handlers::names_form).post(handlers::submit_name))
        }
    };

    routes
        .route("/api/v1/health", get(handlers::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .latency_unit(LatencyUnit::Millis)
                                .level(Level::DEBUG),
                        )
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
