//! Book endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::Book,
    AppState,
};

use super::{JsonPayload, ListQuery, WriteAccess};

/// Create a new book
#[utoipa::path(
    post,
    path = "/book",
    tag = "book",
    security(("bearer_auth" = [])),
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid request payload", body = ErrorResponse),
        (status = 403, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 500, description = "Failed to create book", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    _access: WriteAccess,
    JsonPayload(mut book): JsonPayload<Book>,
) -> AppResult<(StatusCode, Json<Book>)> {
    state
        .services
        .books
        .create(&mut book)
        .await
        .map_err(|e| e.context("create book"))?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// List all books, or search them by keyword
#[utoipa::path(
    get,
    path = "/book",
    tag = "book",
    params(ListQuery),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 500, description = "Failed to get books", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = match query.keyword() {
        Some(keyword) => state.services.books.search(keyword).await,
        None => state.services.books.get_all().await,
    }
    .map_err(|e| e.context("get books"))?;

    Ok(Json(books))
}

/// Update a book by the id in the body; empty fields are left unchanged
#[utoipa::path(
    put,
    path = "/book",
    tag = "book",
    security(("bearer_auth" = [])),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid request payload", body = ErrorResponse),
        (status = 403, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 500, description = "Failed to update book", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    _access: WriteAccess,
    JsonPayload(mut book): JsonPayload<Book>,
) -> AppResult<Json<Book>> {
    state
        .services
        .books
        .update(&mut book)
        .await
        .map_err(|e| e.context("update book"))?;
    Ok(Json(book))
}
