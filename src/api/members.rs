//! Member endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::Member,
    AppState,
};

use super::{JsonPayload, ListQuery};

/// Create a new member
#[utoipa::path(
    post,
    path = "/member",
    tag = "member",
    request_body = Member,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 400, description = "Invalid request payload", body = ErrorResponse),
        (status = 500, description = "Failed to create member", body = ErrorResponse)
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    JsonPayload(mut member): JsonPayload<Member>,
) -> AppResult<(StatusCode, Json<Member>)> {
    state
        .services
        .members
        .create(&mut member)
        .await
        .map_err(|e| e.context("create member"))?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// List all members, or search them by keyword
#[utoipa::path(
    get,
    path = "/member",
    tag = "member",
    params(ListQuery),
    responses(
        (status = 200, description = "List of members", body = Vec<Member>),
        (status = 500, description = "Failed to get members", body = ErrorResponse)
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Member>>> {
    let members = match query.keyword() {
        Some(keyword) => state.services.members.search(keyword).await,
        None => state.services.members.get_all().await,
    }
    .map_err(|e| e.context("get members"))?;

    Ok(Json(members))
}

/// Update a member by the id in the body
#[utoipa::path(
    put,
    path = "/member",
    tag = "member",
    request_body = Member,
    responses(
        (status = 200, description = "Member updated", body = Member),
        (status = 400, description = "Invalid request payload", body = ErrorResponse),
        (status = 500, description = "Failed to update member", body = ErrorResponse)
    )
)]
pub async fn update_member(
    State(state): State<AppState>,
    JsonPayload(mut member): JsonPayload<Member>,
) -> AppResult<Json<Member>> {
    state
        .services
        .members
        .update(&mut member)
        .await
        .map_err(|e| e.context("update member"))?;
    Ok(Json(member))
}
