use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::AuthVerifier;
use crate::config::{AppConfig, SecurityConfig};
use crate::database::NoteStore;
use crate::error::ApiError;
use crate::handlers;
use crate::middleware::require_claims;
use crate::services::NotesService;

/// Shared application state, built once at startup
pub struct AppState {
    pub notes: NotesService,
    pub verifier: Arc<dyn AuthVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn NoteStore>, verifier: Arc<dyn AuthVerifier>) -> Self {
        Self {
            notes: NotesService::new(store),
            verifier,
        }
    }
}

pub fn app(state: Arc<AppState>, config: &AppConfig) -> Router {
    Router::new()
        // Public
        .route("/health", get(handlers::health))
        // Protected
        .merge(notes_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(config.server.max_request_size_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
        .layer(cors_layer(&config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn notes_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use handlers::notes;

    Router::new()
        .route(
            "/notes",
            get(notes::list_notes)
                .post(notes::add_note)
                .put(notes::add_note),
        )
        .route_layer(middleware::from_fn_with_state(state, require_claims))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!("An error occurred during a request: handler panicked: {}", detail);
    ApiError::internal_server_error(detail).into_response()
}
