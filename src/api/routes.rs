//! API route definitions

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use super::access_log;
use super::handlers::{self, ErrorResponse, HealthResponse};
use crate::config::Config;
use crate::store::PersonStore;
use crate::types::{CreatePersonRequest, Person};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Phonebook API",
        version = "0.1.0",
        description = "In-memory phonebook entries"
    ),
    tags(
        (name = "persons", description = "Phonebook entries"),
        (name = "info", description = "Phonebook summary"),
        (name = "health", description = "Health checks")
    ),
    paths(
        handlers::health,
        handlers::info,
        handlers::list_persons,
        handlers::get_person,
        handlers::create_person,
        handlers::delete_person,
    ),
    components(schemas(
        Person,
        CreatePersonRequest,
        ErrorResponse,
        HealthResponse,
    ))
)]
pub struct ApiDoc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PersonStore>,
    /// Largest accepted request body, in bytes
    pub max_body_bytes: usize,
    /// Include request bodies in access log lines
    pub log_request_body: bool,
}

impl AppState {
    pub fn new(store: PersonStore) -> Self {
        Self::from_config(store, &Config::default())
    }

    pub fn from_config(store: PersonStore, config: &Config) -> Self {
        Self {
            store: Arc::new(store),
            max_body_bytes: config.max_body_bytes,
            log_request_body: config.log_request_body,
        }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Persons CRUD
        .route("/api/persons", get(handlers::list_persons))
        .route("/api/persons", post(handlers::create_person))
        .route("/api/persons/{id}", get(handlers::get_person))
        .route("/api/persons/{id}", delete(handlers::delete_person))

        // Summary
        .route("/info", get(handlers::info))

        // Health
        .route("/health", get(handlers::health))

        // OpenAPI spec
        .route("/api/openapi.json", get(handlers::openapi_spec))

        // Unknown paths and unsupported methods share the same 404
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)

        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(cors)
        .layer(middleware::from_fn_with_state(state.clone(), access_log::log_requests))
        .with_state(state)
}
