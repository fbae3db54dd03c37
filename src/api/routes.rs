use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::middleware::{authenticate, ensure_roles, RoleState};
use crate::auth::AuthService;
use crate::storage::DbPool;

use super::handlers::{
    approve_client_handler, change_employee_password_handler, change_profile_password_handler,
    create_client_handler, create_employee_handler, delete_client_handler,
    delete_employee_handler, get_client_handler, get_employee_handler, get_profile_handler,
    list_clients_handler, list_employees_handler, reject_client_handler, update_client_handler,
    update_employee_handler, update_profile_handler,
};

#[derive(Clone)]
pub struct ApiState {
    pub pool: DbPool,
}

/// Build the full `/cms` router with authentication and per-path-family
/// role layers applied.
pub fn build_router(pool: DbPool) -> Router {
    let api_state = ApiState { pool: pool.clone() };

    let auth_layer = {
        let auth_service = Arc::new(AuthService::with_sqlx(pool));
        middleware::from_fn_with_state(auth_service, authenticate)
    };

    let role_layer = |roles: Vec<&str>| {
        let allowed: RoleState =
            Arc::new(roles.into_iter().map(|role| role.to_string()).collect());
        middleware::from_fn_with_state(allowed, ensure_roles)
    };

    // The singular /cms/client/{id} path carries no role rule, only
    // authentication. The rest of the surface is gated per path family.
    Router::new()
        .merge(
            Router::new()
                .route("/cms/clients", post(create_client_handler))
                .route("/cms/clients", get(list_clients_handler))
                .route("/cms/clients/{id}", get(get_client_handler))
                .route("/cms/clients/{id}", delete(delete_client_handler))
                .route("/cms/clients/{id}/approve", patch(approve_client_handler))
                .route("/cms/clients/{id}/reject", patch(reject_client_handler))
                .route_layer(role_layer(vec!["EMPLOYEE", "ADMIN"])),
        )
        .merge(Router::new().route("/cms/client/{id}", put(update_client_handler)))
        .merge(
            Router::new()
                .route("/cms/profile/{id}", get(get_profile_handler))
                .route("/cms/profile/{id}", patch(update_profile_handler))
                .route(
                    "/cms/profile/{id}/change-password",
                    patch(change_profile_password_handler),
                )
                .route_layer(role_layer(vec!["CLIENT"])),
        )
        .merge(
            Router::new()
                .route("/cms/employees", post(create_employee_handler))
                .route("/cms/employees", get(list_employees_handler))
                .route("/cms/employees/{id}", get(get_employee_handler))
                .route("/cms/employees/{id}", put(update_employee_handler))
                .route("/cms/employees/{id}", delete(delete_employee_handler))
                .route(
                    "/cms/employees/{id}/change-password",
                    patch(change_employee_password_handler),
                )
                .route_layer(role_layer(vec!["ADMIN"])),
        )
        .with_state(api_state)
        .layer(auth_layer)
        .layer(TraceLayer::new_for_http())
}
