pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::groups::handlers as groups;
use crate::report::handlers as reports;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Account groups API
        .route(
            "/api/v1/account-groups",
            post(groups::handle_create).put(groups::handle_update),
        )
        .route("/api/v1/account-groups/:email", get(groups::handle_get))
        .route(
            "/api/v1/account-groups/move-account",
            patch(groups::handle_move_account),
        )
        .route(
            "/api/v1/account-groups/create-group",
            post(groups::handle_create_group),
        )
        .route(
            "/api/v1/account-groups/rename-group",
            patch(groups::handle_rename_group),
        )
        .route(
            "/api/v1/account-groups/delete-group",
            delete(groups::handle_delete_group),
        )
        .route(
            "/api/v1/account-groups/custom",
            post(groups::handle_create_custom_group),
        )
        .route(
            "/api/v1/account-groups/reorder-all",
            post(groups::handle_reorder_all),
        )
        // Credit report normalization
        .route("/api/v1/reports/transform", post(reports::handle_transform))
        .with_state(state)
}
