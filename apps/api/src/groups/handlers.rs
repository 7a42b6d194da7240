use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, StoreError};
use crate::groups::models::{Account, AccountGroups, SortOrder};
use crate::state::AppState;

/// Response envelope shared by every account-groups endpoint.
/// Domain failures come back as `{success: false, message}` with HTTP 200 so
/// UI call sites check `success` explicitly; infrastructure failures surface
/// as HTTP errors through `AppError`.
#[derive(Debug, Serialize)]
pub struct GroupsEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AccountGroups>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GroupsEnvelope {
    fn ok(data: AccountGroups) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Success with no aggregate: the client has no groups yet.
    fn absent() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }

    fn fail(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

fn envelope(result: Result<AccountGroups, StoreError>) -> Result<Json<GroupsEnvelope>, AppError> {
    match result {
        Ok(data) => Ok(Json(GroupsEnvelope::ok(data))),
        Err(StoreError::Storage(e)) => Err(AppError::Internal(e)),
        Err(domain) => Ok(Json(GroupsEnvelope::fail(domain.to_string()))),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub email: String,
    pub groups: BTreeMap<String, Vec<Account>>,
    pub group_order: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveAccountRequest {
    pub email: String,
    pub account_id: String,
    pub source_group: String,
    pub target_group: String,
    pub new_index: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub email: String,
    pub group_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupRequest {
    pub email: String,
    pub old_name: String,
    pub new_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGroupRequest {
    pub email: String,
    pub group_name: String,
    #[serde(default)]
    pub target_group: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomGroupRequest {
    pub email: String,
    pub group_name: String,
    pub accounts: Vec<Account>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub email: String,
    pub sort_order: SortOrder,
}

/// POST /api/v1/account-groups
pub async fn handle_create(
    State(state): State<AppState>,
    Json(req): Json<CreateRequest>,
) -> Result<Json<GroupsEnvelope>, AppError> {
    envelope(state.store.create(&req.email).await)
}

/// GET /api/v1/account-groups/:email
pub async fn handle_get(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<GroupsEnvelope>, AppError> {
    match state.store.get(&email).await {
        Ok(Some(data)) => Ok(Json(GroupsEnvelope::ok(data))),
        Ok(None) => Ok(Json(GroupsEnvelope::absent())),
        Err(StoreError::Storage(e)) => Err(AppError::Internal(e)),
        Err(domain) => Ok(Json(GroupsEnvelope::fail(domain.to_string()))),
    }
}

/// PUT /api/v1/account-groups
pub async fn handle_update(
    State(state): State<AppState>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<GroupsEnvelope>, AppError> {
    envelope(
        state
            .store
            .update(&req.email, req.groups, req.group_order)
            .await,
    )
}

/// PATCH /api/v1/account-groups/move-account
pub async fn handle_move_account(
    State(state): State<AppState>,
    Json(req): Json<MoveAccountRequest>,
) -> Result<Json<GroupsEnvelope>, AppError> {
    envelope(
        state
            .store
            .move_account(
                &req.email,
                &req.account_id,
                &req.source_group,
                &req.target_group,
                req.new_index,
            )
            .await,
    )
}

/// POST /api/v1/account-groups/create-group
pub async fn handle_create_group(
    State(state): State<AppState>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<GroupsEnvelope>, AppError> {
    envelope(state.store.create_group(&req.email, &req.group_name).await)
}

/// PATCH /api/v1/account-groups/rename-group
pub async fn handle_rename_group(
    State(state): State<AppState>,
    Json(req): Json<RenameGroupRequest>,
) -> Result<Json<GroupsEnvelope>, AppError> {
    envelope(
        state
            .store
            .rename_group(&req.email, &req.old_name, &req.new_name)
            .await,
    )
}

/// DELETE /api/v1/account-groups/delete-group
pub async fn handle_delete_group(
    State(state): State<AppState>,
    Json(req): Json<DeleteGroupRequest>,
) -> Result<Json<GroupsEnvelope>, AppError> {
    envelope(
        state
            .store
            .delete_group(&req.email, &req.group_name, req.target_group.as_deref())
            .await,
    )
}

/// POST /api/v1/account-groups/custom
pub async fn handle_create_custom_group(
    State(state): State<AppState>,
    Json(req): Json<CustomGroupRequest>,
) -> Result<Json<GroupsEnvelope>, AppError> {
    envelope(
        state
            .store
            .create_custom_group(&req.email, &req.group_name, req.accounts)
            .await,
    )
}

/// POST /api/v1/account-groups/reorder-all
pub async fn handle_reorder_all(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<GroupsEnvelope>, AppError> {
    envelope(
        state
            .store
            .reorder_all_groups(&req.email, req.sort_order)
            .await,
    )
}
