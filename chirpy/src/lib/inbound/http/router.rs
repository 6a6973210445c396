use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin::metrics;
use super::handlers::admin::reset;
use super::handlers::create_chirp::create_chirp;
use super::handlers::create_user::create_user;
use super::handlers::get_chirp::get_chirp;
use super::handlers::healthz::healthz;
use super::handlers::list_chirps::list_chirps;
use super::handlers::login::login;
use super::metrics::ApiMetrics;
use super::middleware::authenticate as auth_middleware;
use super::middleware::count_file_server_hits;
use crate::config::Platform;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::user::ports::UserServicePort;

/// Everything a handler may touch. Cloned per request, so all members are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub chirp_service: Arc<dyn ChirpServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub metrics: Arc<ApiMetrics>,
    pub platform: Platform,
}

pub fn create_router(state: AppState, file_root: impl AsRef<Path>) -> Router {
    let public_routes = Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/users", post(create_user))
        .route("/api/login", post(login))
        .route("/api/chirps", get(list_chirps))
        .route("/api/chirps/:chirp_id", get(get_chirp))
        .route("/admin/metrics", get(metrics))
        .route("/admin/reset", post(reset));

    let protected_routes = Router::new()
        .route("/api/chirps", post(create_chirp))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let file_server = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            count_file_server_hits,
        ))
        .service(ServeDir::new(file_root));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/app", file_server)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
