//! Handlers for equipment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use questline_core::equipment::{validate_cost, validate_slot_type};
use questline_core::error::CoreError;
use questline_core::types::DbId;
use questline_db::models::equipment::CreateEquipment;
use questline_db::repositories::EquipmentRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/equipment
pub async fn list_equipment(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = EquipmentRepo::list(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/equipment
///
/// New items start unequipped.
pub async fn create_equipment(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateEquipment>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_slot_type(&input.slot_type)?;
    if let Some(cost) = input.cost {
        validate_cost(cost)?;
    }

    let item = EquipmentRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(
        user_id = user.user_id,
        equipment_id = item.id,
        slot = %item.slot_type,
        "Equipment created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// POST /api/v1/equipment/{id}/equip
///
/// Unequips whatever else occupies the same slot.
pub async fn equip(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = EquipmentRepo::equip(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;

    tracing::info!(
        user_id = user.user_id,
        equipment_id = id,
        slot = %item.slot_type,
        "Equipment equipped",
    );

    Ok(Json(DataResponse { data: item }))
}
