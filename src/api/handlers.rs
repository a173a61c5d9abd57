//! API request handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use super::routes::{ApiDoc, AppState};
use crate::error::Error;
use crate::types::{CreatePersonRequest, Person};

// Response types

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::PersonNotFound(_) => StatusCode::NOT_FOUND,
            Error::MissingField | Error::DuplicateName(_) | Error::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// Handlers

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Entry count and server time as an HTML fragment
#[utoipa::path(
    get,
    path = "/info",
    responses(
        (status = 200, description = "Phonebook summary", body = String, content_type = "text/html")
    ),
    tag = "info"
)]
pub async fn info(State(state): State<AppState>) -> Html<String> {
    let count = state.store.len().await;
    let now = chrono::Local::now();

    Html(format!(
        "<p>Phonebook has info for {} people</p>\n<p>{}</p>",
        count,
        now.format("%a %b %d %Y %H:%M:%S GMT%z (%Z)")
    ))
}

/// List all entries
#[utoipa::path(
    get,
    path = "/api/persons",
    responses(
        (status = 200, description = "All entries in storage order", body = Vec<Person>)
    ),
    tag = "persons"
)]
pub async fn list_persons(State(state): State<AppState>) -> Json<Vec<Person>> {
    Json(state.store.list().await)
}

/// Get a single entry by ID
#[utoipa::path(
    get,
    path = "/api/persons/{id}",
    params(
        ("id" = String, Path, description = "Entry id")
    ),
    responses(
        (status = 200, description = "Entry found", body = Person),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    ),
    tag = "persons"
)]
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Person>, Error> {
    state
        .store
        .get(&id)
        .await
        .map(Json)
        .ok_or(Error::PersonNotFound(id))
}

/// Create a new entry
#[utoipa::path(
    post,
    path = "/api/persons",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Entry created", body = Person),
        (status = 400, description = "Missing field, duplicate name or malformed body", body = ErrorResponse)
    ),
    tag = "persons"
)]
pub async fn create_person(
    State(state): State<AppState>,
    payload: Result<Json<CreatePersonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Person>), Error> {
    let req = match payload {
        Ok(Json(req)) => req,
        // A body without a JSON content type carries no fields
        Err(JsonRejection::MissingJsonContentType(_)) => CreatePersonRequest::default(),
        Err(rejection) => return Err(Error::MalformedBody(rejection.body_text())),
    };

    let person = state.store.create(req.validate()?).await?;
    tracing::info!("Added {} to the phonebook", person.name);

    Ok((StatusCode::CREATED, Json(person)))
}

/// Delete an entry. Missing ids are not an error.
#[utoipa::path(
    delete,
    path = "/api/persons/{id}",
    params(
        ("id" = String, Path, description = "Entry id")
    ),
    responses(
        (status = 204, description = "Entry deleted or never existed")
    ),
    tag = "persons"
)]
pub async fn delete_person(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    state.store.delete(&id).await;
    StatusCode::NO_CONTENT
}

/// OpenAPI document
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Fallback for unmatched routes
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}
