#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use cms_backend::{
    domain::{Client, ClientId, ClientStatus, Employee, EmployeeId, NewClient, NewEmployee},
    storage::{
        repositories::{
            ClientRepository, EmployeeRepository, RoleRepository, SqlxClientRepository,
            SqlxEmployeeRepository, SqlxRoleRepository,
        },
        run_migrations, DbPool,
    },
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

// Minimum bcrypt cost, to keep seeding fast. Production hashing uses
// DEFAULT_COST.
const TEST_BCRYPT_COST: u32 = 4;

pub struct TestApp {
    pub pool: DbPool,
}

impl TestApp {
    pub fn router(&self) -> Router {
        cms_backend::api::build_router(self.pool.clone())
    }

    pub async fn seed_employee(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role_name: &str,
    ) -> Employee {
        let roles = SqlxRoleRepository::new(self.pool.clone());
        let role = roles.find_by_name(role_name).await.expect("role lookup").expect("seeded role");

        let repo = SqlxEmployeeRepository::new(self.pool.clone());
        repo.create(
            NewEmployee {
                first_name: "Test".to_string(),
                last_name: "Employee".to_string(),
                username: username.to_string(),
                email: email.to_string(),
                password_hash: bcrypt::hash(password, TEST_BCRYPT_COST).expect("hash password"),
                department: "QA".to_string(),
            },
            role.id,
        )
        .await
        .expect("seed employee")
    }

    pub async fn seed_client(&self, username: &str, password: &str) -> Client {
        let roles = SqlxRoleRepository::new(self.pool.clone());
        let role = roles
            .find_by_name("ROLE_CLIENT")
            .await
            .expect("role lookup")
            .expect("seeded role");

        let repo = SqlxClientRepository::new(self.pool.clone());
        repo.create(
            NewClient {
                first_name: "Test".to_string(),
                last_name: "Client".to_string(),
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password_hash: bcrypt::hash(password, TEST_BCRYPT_COST).expect("hash password"),
                ssn: format!("ssn-{}", username),
                date_of_birth: birth_date(),
                status: ClientStatus::Pending,
            },
            role.id,
        )
        .await
        .expect("seed client")
    }

    pub async fn client_password_hash(&self, id: &ClientId) -> String {
        let repo = SqlxClientRepository::new(self.pool.clone());
        repo.get_with_password(id).await.expect("fetch client").expect("client exists").1
    }

    pub async fn employee_password_hash(&self, id: &EmployeeId) -> String {
        let repo = SqlxEmployeeRepository::new(self.pool.clone());
        repo.get_with_password(id).await.expect("fetch employee").expect("employee exists").1
    }

    pub async fn employee_role_rows(&self, id: &EmployeeId) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employee_roles WHERE employee_id = ?")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .expect("count role rows")
    }
}

pub fn birth_date() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("1990-01-01T00:00:00Z").expect("parse date").with_timezone(&Utc)
}

pub async fn setup_test_app() -> TestApp {
    // A single never-expiring connection keeps the in-memory database alive
    // for the duration of the test.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("create sqlite pool");

    run_migrations(&pool).await.expect("run migrations for tests");

    TestApp { pool }
}

pub fn basic_auth(login: &str, password: &str) -> String {
    format!("Basic {}", BASE64.encode(format!("{}:{}", login, password)))
}

pub async fn send_request(
    app: &TestApp,
    method: Method,
    path: &str,
    credentials: Option<(&str, &str)>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some((login, password)) = credentials {
        builder = builder.header("Authorization", basic_auth(login, password));
    }

    let request = if let Some(json) = body {
        let bytes = serde_json::to_vec(&json).expect("serialize body");
        builder
            .header("content-type", "application/json")
            .body(Body::from(bytes))
            .expect("build request")
    } else {
        builder.body(Body::empty()).expect("build request")
    };

    app.router().oneshot(request).await.expect("request")
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

pub async fn read_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
