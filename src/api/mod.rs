//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod members;
pub mod openapi;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
    routing::get,
    Router,
};
use serde::{de::DeserializeOwned, Deserialize};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::IntoParams;

use crate::{
    error::{AppError, INVALID_PAYLOAD},
    models::Claims,
    AppState,
};

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route(
            "/book",
            get(books::list_books)
                .post(books::create_book)
                .put(books::update_book),
        )
        // Members
        .route(
            "/member",
            get(members::list_members)
                .post(members::create_member)
                .put(members::update_member),
        )
        .with_state(state);

    Router::new()
        .nest("/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Query string of list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Full-text keyword; when present the search index is queried instead of the store
    pub search: Option<String>,
}

impl ListQuery {
    pub fn keyword(&self) -> Option<&str> {
        self.search.as_deref().filter(|keyword| !keyword.is_empty())
    }
}

/// JSON body extractor whose rejection is the API's own error body.
///
/// The body is decoded whatever the `Content-Type` header says; only a body
/// that is not valid JSON for `T` is rejected.
pub struct JsonPayload<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Failed to read request body: {}", rejection.body_text());
            AppError::BadRequest(INVALID_PAYLOAD.to_string())
        })?;

        let value = serde_json::from_slice::<T>(&bytes).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            AppError::BadRequest(INVALID_PAYLOAD.to_string())
        })?;
        Ok(Self(value))
    }
}

/// Write permission on guarded routes.
///
/// Requires a valid bearer token when `auth.enabled` is set; otherwise every
/// request passes with no claims.
pub struct WriteAccess(pub Option<Claims>);

#[async_trait]
impl FromRequestParts<AppState> for WriteAccess {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if !state.config.auth.enabled {
            return Ok(WriteAccess(None));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Forbidden("missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Forbidden("invalid token format".to_string()))?;

        let claims = Claims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {}", e);
                AppError::Forbidden("cannot parse token".to_string())
            })?;

        Ok(WriteAccess(Some(claims)))
    }
}
