//! Client self-service handlers under `/cms/profile`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use validator::Validate;

use crate::api::error::ApiError;
use crate::api::handlers::{PasswordChangeRequest, PASSWORD_UPDATED, PASSWORD_UPDATE_FAILED};
use crate::api::routes::ApiState;
use crate::domain::{ClientDto, ClientId, UpdateClientRequest};
use crate::services::ClientService;

fn client_service_for_state(state: &ApiState) -> ClientService {
    ClientService::with_sqlx(state.pool.clone())
}

#[instrument(skip(state), fields(client_id = %id))]
pub async fn get_profile_handler(
    State(state): State<ApiState>,
    Path(id): Path<ClientId>,
) -> Result<Json<ClientDto>, ApiError> {
    let service = client_service_for_state(&state);
    let client = service.get_client(&id).await?;
    Ok(Json(client.into()))
}

#[instrument(skip(state, payload), fields(client_id = %id))]
pub async fn update_profile_handler(
    State(state): State<ApiState>,
    Path(id): Path<ClientId>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<Json<ClientDto>, ApiError> {
    let service = client_service_for_state(&state);
    let client = service.update_client(&id, payload.into()).await?;
    Ok(Json(client.into()))
}

/// Change the client's own password. Same contract as the employee path.
#[instrument(skip(state, payload), fields(client_id = %id))]
pub async fn change_profile_password_handler(
    State(state): State<ApiState>,
    Path(id): Path<ClientId>,
    Json(payload): Json<PasswordChangeRequest>,
) -> Result<(StatusCode, &'static str), ApiError> {
    payload.validate().map_err(|e| ApiError::bad_request(e.to_string()))?;

    let service = client_service_for_state(&state);
    if service.change_password(&id, &payload.old_password, &payload.new_password).await? {
        Ok((StatusCode::OK, PASSWORD_UPDATED))
    } else {
        Ok((StatusCode::BAD_REQUEST, PASSWORD_UPDATE_FAILED))
    }
}
