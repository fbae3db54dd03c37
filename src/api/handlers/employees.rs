//! Employee management handlers (admin facing).

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
use crate::domain::{CreateEmployeeRequest, EmployeeDto, EmployeeId, UpdateEmployeeRequest};
use crate::services::EmployeeService;

fn employee_service_for_state(state: &ApiState) -> EmployeeService {
    EmployeeService::with_sqlx(state.pool.clone())
}

/// Create a new employee with the fixed default password.
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn create_employee_handler(
    State(state): State<ApiState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeDto>), ApiError> {
    let service = employee_service_for_state(&state);
    let employee = service.create_employee(payload).await?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

#[instrument(skip(state))]
pub async fn list_employees_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<EmployeeDto>>, ApiError> {
    let service = employee_service_for_state(&state);
    let employees = service.list_employees().await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state), fields(employee_id = %id))]
pub async fn get_employee_handler(
    State(state): State<ApiState>,
    Path(id): Path<EmployeeId>,
) -> Result<Json<EmployeeDto>, ApiError> {
    let service = employee_service_for_state(&state);
    let employee = service.get_employee(&id).await?;
    Ok(Json(employee.into()))
}

/// Update an employee's name and department. Username and email in the
/// payload are ignored.
#[instrument(skip(state, payload), fields(employee_id = %id))]
pub async fn update_employee_handler(
    State(state): State<ApiState>,
    Path(id): Path<EmployeeId>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeDto>, ApiError> {
    let service = employee_service_for_state(&state);
    let employee = service.update_employee(&id, payload.into()).await?;
    Ok(Json(employee.into()))
}

#[instrument(skip(state), fields(employee_id = %id))]
pub async fn delete_employee_handler(
    State(state): State<ApiState>,
    Path(id): Path<EmployeeId>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let service = employee_service_for_state(&state);
    service.delete_employee(&id).await?;
    Ok((StatusCode::OK, "Employee deleted from system!"))
}

/// Change an employee's password. A mismatched old password responds 400
/// with a plain-text body; the stored hash is left unchanged.
#[instrument(skip(state, payload), fields(employee_id = %id))]
pub async fn change_employee_password_handler(
    State(state): State<ApiState>,
    Path(id): Path<EmployeeId>,
    Json(payload): Json<PasswordChangeRequest>,
) -> Result<(StatusCode, &'static str), ApiError> {
    payload.validate().map_err(|e| ApiError::bad_request(e.to_string()))?;

    let service = employee_service_for_state(&state);
    if service.change_password(&id, &payload.old_password, &payload.new_password).await? {
        Ok((StatusCode::OK, PASSWORD_UPDATED))
    } else {
        Ok((StatusCode::BAD_REQUEST, PASSWORD_UPDATE_FAILED))
    }
}
