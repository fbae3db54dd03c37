mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{read_json, read_text, send_request, setup_test_app};

const CLIENT: (&str, &str) = ("clientuser", "clientPass1");

#[tokio::test]
async fn client_reads_own_profile() {
    let app = setup_test_app().await;
    let client = app.seed_client(CLIENT.0, CLIENT.1).await;

    let path = format!("/cms/profile/{}", client.id);
    let response = send_request(&app, Method::GET, &path, Some(CLIENT), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    assert_eq!(body["username"], CLIENT.0);
    assert_eq!(body["status"], "Pending");
}

#[tokio::test]
async fn profile_surface_is_client_only() {
    let app = setup_test_app().await;
    let client = app.seed_client(CLIENT.0, CLIENT.1).await;
    app.seed_employee("emp1", "emp1@example.com", "employeePass1", "ROLE_EMPLOYEE").await;

    let path = format!("/cms/profile/{}", client.id);
    let response =
        send_request(&app, Method::GET, &path, Some(("emp1", "employeePass1")), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn client_updates_own_profile() {
    let app = setup_test_app().await;
    let client = app.seed_client(CLIENT.0, CLIENT.1).await;

    let path = format!("/cms/profile/{}", client.id);
    let payload =
        json!({"firstName": "Selfie", "lastName": "Update", "email": "selfie@example.com"});
    let response = send_request(&app, Method::PATCH, &path, Some(CLIENT), Some(payload)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    assert_eq!(body["firstName"], "Selfie");
    assert_eq!(body["email"], "selfie@example.com");
    assert_eq!(body["username"], CLIENT.0);
}

#[tokio::test]
async fn client_changes_own_password() {
    let app = setup_test_app().await;
    let client = app.seed_client(CLIENT.0, CLIENT.1).await;

    let path = format!("/cms/profile/{}/change-password", client.id);
    let payload = json!({"oldPassword": CLIENT.1, "newPassword": "myBrandNewSecret"});
    let response = send_request(&app, Method::PATCH, &path, Some(CLIENT), Some(payload)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await, "Password updated successfully");

    let profile_path = format!("/cms/profile/{}", client.id);
    let response = send_request(
        &app,
        Method::GET,
        &profile_path,
        Some((CLIENT.0, "myBrandNewSecret")),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn change_password_with_wrong_old_password_keeps_hash() {
    let app = setup_test_app().await;
    let client = app.seed_client(CLIENT.0, CLIENT.1).await;
    let hash_before = app.client_password_hash(&client.id).await;

    let path = format!("/cms/profile/{}/change-password", client.id);
    let payload = json!({"oldPassword": "notTheRightOne", "newPassword": "myBrandNewSecret"});
    let response = send_request(&app, Method::PATCH, &path, Some(CLIENT), Some(payload)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_text(response).await, "Password update failed");
    assert_eq!(app.client_password_hash(&client.id).await, hash_before);
}

#[tokio::test]
async fn change_password_rejects_short_new_password() {
    let app = setup_test_app().await;
    let client = app.seed_client(CLIENT.0, CLIENT.1).await;

    let path = format!("/cms/profile/{}/change-password", client.id);
    let payload = json!({"oldPassword": CLIENT.1, "newPassword": "tiny"});
    let response = send_request(&app, Method::PATCH, &path, Some(CLIENT), Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_json(response).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn change_password_rejects_empty_old_password() {
    let app = setup_test_app().await;
    let client = app.seed_client(CLIENT.0, CLIENT.1).await;

    let path = format!("/cms/profile/{}/change-password", client.id);
    let payload = json!({"oldPassword": "", "newPassword": "myBrandNewSecret"});
    let response = send_request(&app, Method::PATCH, &path, Some(CLIENT), Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_json(response).await;
    assert_eq!(body["error"], "bad_request");
}
