//! Group routes: creation, membership, details, and balances.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use tally_core::balance::MemberBalance;
use tally_core::group::{Group, GroupDetails, UserSummary};
use tally_shared::auth::{AddMemberRequest, CreateGroupRequest};
use tally_shared::types::GroupId;
use tracing::info;
use validator::Validate;

use crate::{
    AppState,
    error::ApiError,
    extract::{ApiJson, ApiPath},
    middleware::AuthUser,
};

/// Creates the group routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/groups", post(create_group).get(list_groups))
        .route("/groups/{group_id}", get(get_group))
        .route("/groups/{group_id}/members", post(add_member))
        .route("/groups/{group_id}/balances", get(get_balances))
}

/// Response for a successful member add.
#[derive(Debug, Serialize)]
pub struct AddMemberResponse {
    /// Human-readable confirmation.
    pub message: &'static str,
    /// The member that was added.
    pub member: UserSummary,
}

/// POST `/groups`
async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    payload.validate()?;

    let group = state
        .group_service()
        .create_group(&state.caller(&auth), &payload.name)
        .await?;

    info!(group_id = %group.id, user_id = %auth.user_id(), "Group created via API");
    Ok((StatusCode::CREATED, Json(group)))
}

/// GET `/groups`
async fn list_groups(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Group>>, ApiError> {
    let groups = state
        .group_service()
        .list_groups(&state.caller(&auth))
        .await?;

    Ok(Json(groups))
}

/// GET `/groups/{group_id}`
async fn get_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(group_id): ApiPath<GroupId>,
) -> Result<Json<GroupDetails>, ApiError> {
    let details = state
        .group_service()
        .get_group(&state.caller(&auth), group_id)
        .await?;

    Ok(Json(details))
}

/// POST `/groups/{group_id}/members`
async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(group_id): ApiPath<GroupId>,
    ApiJson(payload): ApiJson<AddMemberRequest>,
) -> Result<Json<AddMemberResponse>, ApiError> {
    let member = state
        .group_service()
        .add_member(&state.caller(&auth), group_id, &payload.email)
        .await?;

    info!(
        group_id = %group_id,
        user_id = %member.user_id,
        added_by = %auth.user_id(),
        "Member added via API"
    );
    Ok(Json(AddMemberResponse {
        message: "member added",
        member,
    }))
}

/// GET `/groups/{group_id}/balances`
async fn get_balances(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(group_id): ApiPath<GroupId>,
) -> Result<Json<Vec<MemberBalance>>, ApiError> {
    let balances = state
        .group_service()
        .compute_balances(&state.caller(&auth), group_id)
        .await?;

    Ok(Json(balances.into_member_balances()))
}
