//! Client management handlers (employee/admin facing).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use crate::api::error::ApiError;
use crate::api::routes::ApiState;
use crate::domain::{ClientDto, ClientId, CreateClientRequest, UpdateClientRequest};
use crate::services::ClientService;

fn client_service_for_state(state: &ApiState) -> ClientService {
    ClientService::with_sqlx(state.pool.clone())
}

/// Create a new client. The stored password is the fixed default and the
/// status always starts `Pending`, regardless of the payload.
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn create_client_handler(
    State(state): State<ApiState>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientDto>), ApiError> {
    let service = client_service_for_state(&state);
    let client = service.create_client(payload).await?;
    Ok((StatusCode::CREATED, Json(client.into())))
}

#[instrument(skip(state))]
pub async fn list_clients_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<ClientDto>>, ApiError> {
    let service = client_service_for_state(&state);
    let clients = service.list_clients().await?;
    Ok(Json(clients.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state), fields(client_id = %id))]
pub async fn get_client_handler(
    State(state): State<ApiState>,
    Path(id): Path<ClientId>,
) -> Result<Json<ClientDto>, ApiError> {
    let service = client_service_for_state(&state);
    let client = service.get_client(&id).await?;
    Ok(Json(client.into()))
}

/// Update a client's name and email. Other payload fields are ignored.
#[instrument(skip(state, payload), fields(client_id = %id))]
pub async fn update_client_handler(
    State(state): State<ApiState>,
    Path(id): Path<ClientId>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<Json<ClientDto>, ApiError> {
    let service = client_service_for_state(&state);
    let client = service.update_client(&id, payload.into()).await?;
    Ok(Json(client.into()))
}

#[instrument(skip(state), fields(client_id = %id))]
pub async fn approve_client_handler(
    State(state): State<ApiState>,
    Path(id): Path<ClientId>,
) -> Result<Json<ClientDto>, ApiError> {
    let service = client_service_for_state(&state);
    let client = service.approve_client(&id).await?;
    Ok(Json(client.into()))
}

#[instrument(skip(state), fields(client_id = %id))]
pub async fn reject_client_handler(
    State(state): State<ApiState>,
    Path(id): Path<ClientId>,
) -> Result<Json<ClientDto>, ApiError> {
    let service = client_service_for_state(&state);
    let client = service.reject_client(&id).await?;
    Ok(Json(client.into()))
}

/// Delete a client. Always confirms, even for an unknown ID.
#[instrument(skip(state), fields(client_id = %id))]
pub async fn delete_client_handler(
    State(state): State<ApiState>,
    Path(id): Path<ClientId>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let service = client_service_for_state(&state);
    service.delete_client(&id).await?;
    Ok((StatusCode::OK, "Deleted client from system successfully"))
}
