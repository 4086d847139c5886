// ============================================================================
// Portal API - Menu Handlers
// File: crates/portal-api/src/handlers/menus.rs
// ============================================================================
//! Menu tree HTTP handlers (list, save, show, delete)

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use portal_core::domain::{MenuNode, MenuSubmission};
use portal_shared::constants::DEFAULT_MENU_POSITION;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListMenusQuery {
    pub position: Option<String>,
}

/// Save request payload: the whole forest of one position. Both fields are required.
#[derive(Debug, Deserialize)]
pub struct SaveMenusRequest {
    pub position: String,
    pub menus: Vec<MenuSubmission>,
}

#[derive(Debug, Serialize)]
pub struct DeleteMenuResponse {
    pub id: i64,
    pub deleted: usize,
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// List handler - GET /api/v1/menus?position=header
pub async fn list_menus(
    State(state): State<AppState>,
    Query(query): Query<ListMenusQuery>,
) -> Result<Json<ApiResponse<Vec<MenuNode>>>, ApiError> {
    let position = query
        .position
        .unwrap_or_else(|| DEFAULT_MENU_POSITION.to_string());

    let menus = state.menu_service.get_menus(&position).await?;
    Ok(Json(ApiResponse::success("Menus retrieved successfully", menus)))
}

/// Save handler - POST /api/v1/menus
pub async fn save_menus(
    State(state): State<AppState>,
    payload: Result<Json<SaveMenusRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<MenuNode>>>, ApiError> {
    let Json(payload) = payload
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e.body_text())))?;

    let saved = state
        .menu_service
        .save_menus(&payload.position, &payload.menus)
        .await?;

    Ok(Json(ApiResponse::success("Menus saved successfully", saved.menus)))
}

/// Show handler - GET /api/v1/menus/{id}
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MenuNode>>, ApiError> {
    let id = parse_id(&id)?;
    let menu = state.menu_service.get_menu(id).await?;
    Ok(Json(ApiResponse::success("Menu retrieved successfully", menu)))
}

/// Delete handler - DELETE /api/v1/menus/{id}
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeleteMenuResponse>>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state.menu_service.delete_menu(id).await?;
    Ok(Json(ApiResponse::success(
        "Menu deleted successfully",
        DeleteMenuResponse { id, deleted },
    )))
}
