mod common;

use axum::http::{Method, StatusCode};
use cms_backend::startup::ensure_bootstrap_admin;
use serde_json::{json, Value};

use common::{read_json, read_text, send_request, setup_test_app};

const ADMIN: (&str, &str) = ("boss", "bossPassword");

fn jane_smith() -> Value {
    json!({
        "firstName": "Jane",
        "lastName": "Smith",
        "username": "jsmith",
        "email": "jsmith@example.com",
        "department": "Legal"
    })
}

#[tokio::test]
async fn bootstrap_admin_is_idempotent() {
    let app = setup_test_app().await;

    ensure_bootstrap_admin(&app.pool).await.unwrap();
    ensure_bootstrap_admin(&app.pool).await.unwrap();

    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM employees WHERE username = 'admin'",
    )
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn bootstrap_admin_can_authenticate_with_default_credentials() {
    let app = setup_test_app().await;
    ensure_bootstrap_admin(&app.pool).await.unwrap();

    let response = send_request(
        &app,
        Method::GET,
        "/cms/employees",
        Some(("admin", "strongAdminPassword")),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_employee_as_admin_returns_created() {
    let app = setup_test_app().await;
    app.seed_employee(ADMIN.0, "boss@example.com", ADMIN.1, "ADMIN").await;

    let response =
        send_request(&app, Method::POST, "/cms/employees", Some(ADMIN), Some(jane_smith())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = read_json(response).await;
    assert_eq!(body["username"], "jsmith");
    assert_eq!(body["department"], "Legal");
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn create_employee_as_employee_is_forbidden() {
    let app = setup_test_app().await;
    app.seed_employee("emp1", "emp1@example.com", "employeePass1", "ROLE_EMPLOYEE").await;

    let response = send_request(
        &app,
        Method::POST,
        "/cms/employees",
        Some(("emp1", "employeePass1")),
        Some(jane_smith()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = read_json(response).await;
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn new_employee_logs_in_with_default_password() {
    let app = setup_test_app().await;
    app.seed_employee(ADMIN.0, "boss@example.com", ADMIN.1, "ADMIN").await;

    let response =
        send_request(&app, Method::POST, "/cms/employees", Some(ADMIN), Some(jane_smith())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The fixed default password grants the new employee access to the
    // client surface.
    let response = send_request(
        &app,
        Method::GET,
        "/cms/clients",
        Some(("jsmith", "defaultEmployeePassword")),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_missing_employee_returns_not_found() {
    let app = setup_test_app().await;
    app.seed_employee(ADMIN.0, "boss@example.com", ADMIN.1, "ADMIN").await;

    let response =
        send_request(&app, Method::GET, "/cms/employees/9999", Some(ADMIN), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_ignores_username_and_email() {
    let app = setup_test_app().await;
    app.seed_employee(ADMIN.0, "boss@example.com", ADMIN.1, "ADMIN").await;
    let employee =
        app.seed_employee("jsmith", "jsmith@example.com", "somePassword1", "ROLE_EMPLOYEE").await;

    let path = format!("/cms/employees/{}", employee.id);
    let payload = json!({
        "firstName": "Janet",
        "lastName": "Smythe",
        "department": "Finance",
        "username": "attempted-rename",
        "email": "attempted@example.com"
    });
    let response = send_request(&app, Method::PUT, &path, Some(ADMIN), Some(payload)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    assert_eq!(body["firstName"], "Janet");
    assert_eq!(body["department"], "Finance");
    assert_eq!(body["username"], "jsmith");
    assert_eq!(body["email"], "jsmith@example.com");
}

#[tokio::test]
async fn delete_removes_role_associations_then_employee() {
    let app = setup_test_app().await;
    app.seed_employee(ADMIN.0, "boss@example.com", ADMIN.1, "ADMIN").await;
    let employee =
        app.seed_employee("jsmith", "jsmith@example.com", "somePassword1", "ROLE_EMPLOYEE").await;
    assert_eq!(app.employee_role_rows(&employee.id).await, 1);

    let path = format!("/cms/employees/{}", employee.id);
    let response = send_request(&app, Method::DELETE, &path, Some(ADMIN), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await, "Employee deleted from system!");

    assert_eq!(app.employee_role_rows(&employee.id).await, 0);

    let response = send_request(&app, Method::GET, &path, Some(ADMIN), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_employee_returns_not_found() {
    let app = setup_test_app().await;
    app.seed_employee(ADMIN.0, "boss@example.com", ADMIN.1, "ADMIN").await;

    let response =
        send_request(&app, Method::DELETE, "/cms/employees/9999", Some(ADMIN), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn change_password_with_wrong_old_password_fails_and_keeps_hash() {
    let app = setup_test_app().await;
    app.seed_employee(ADMIN.0, "boss@example.com", ADMIN.1, "ADMIN").await;
    let employee =
        app.seed_employee("jsmith", "jsmith@example.com", "somePassword1", "ROLE_EMPLOYEE").await;
    let hash_before = app.employee_password_hash(&employee.id).await;

    let path = format!("/cms/employees/{}/change-password", employee.id);
    let payload = json!({"oldPassword": "wrongPassword", "newPassword": "brandNewPassword"});
    let response = send_request(&app, Method::PATCH, &path, Some(ADMIN), Some(payload)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_text(response).await, "Password update failed");
    assert_eq!(app.employee_password_hash(&employee.id).await, hash_before);
}

#[tokio::test]
async fn change_password_succeeds_and_new_password_logs_in() {
    let app = setup_test_app().await;
    app.seed_employee(ADMIN.0, "boss@example.com", ADMIN.1, "ADMIN").await;
    let employee =
        app.seed_employee("jsmith", "jsmith@example.com", "somePassword1", "ROLE_EMPLOYEE").await;

    let path = format!("/cms/employees/{}/change-password", employee.id);
    let payload = json!({"oldPassword": "somePassword1", "newPassword": "brandNewPassword"});
    let response = send_request(&app, Method::PATCH, &path, Some(ADMIN), Some(payload)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await, "Password updated successfully");

    let response = send_request(
        &app,
        Method::GET,
        "/cms/clients",
        Some(("jsmith", "brandNewPassword")),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The old password no longer authenticates.
    let response = send_request(
        &app,
        Method::GET,
        "/cms/clients",
        Some(("jsmith", "somePassword1")),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn change_password_validates_new_password_length() {
    let app = setup_test_app().await;
    app.seed_employee(ADMIN.0, "boss@example.com", ADMIN.1, "ADMIN").await;
    let employee =
        app.seed_employee("jsmith", "jsmith@example.com", "somePassword1", "ROLE_EMPLOYEE").await;

    let path = format!("/cms/employees/{}/change-password", employee.id);
    let payload = json!({"oldPassword": "somePassword1", "newPassword": "short"});
    let response = send_request(&app, Method::PATCH, &path, Some(ADMIN), Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_json(response).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn change_password_path_is_admin_gated() {
    let app = setup_test_app().await;
    let employee =
        app.seed_employee("jsmith", "jsmith@example.com", "somePassword1", "ROLE_EMPLOYEE").await;

    let path = format!("/cms/employees/{}/change-password", employee.id);
    let payload = json!({"oldPassword": "somePassword1", "newPassword": "brandNewPassword"});
    let response = send_request(
        &app,
        Method::PATCH,
        &path,
        Some(("jsmith", "somePassword1")),
        Some(payload),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
