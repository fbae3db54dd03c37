//! Employee repository: CRUD and credential lookups by username or email.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::instrument;

use crate::domain::{Employee, EmployeeId, NewEmployee, RoleId, UpdateEmployee};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

#[derive(Debug, Clone, FromRow)]
struct EmployeeRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, username, email, password_hash, \
     department, created_at, updated_at";

fn row_to_employee(row: EmployeeRow) -> Employee {
    Employee {
        id: EmployeeId::new(row.id),
        first_name: row.first_name,
        last_name: row.last_name,
        username: row.username,
        email: row.email,
        department: row.department,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Create a new employee and assign the given role inside one transaction
    async fn create(&self, employee: NewEmployee, role_id: RoleId) -> Result<Employee>;

    /// Get an employee by ID
    async fn get(&self, id: &EmployeeId) -> Result<Option<Employee>>;

    /// Get an employee with their password hash (for password changes)
    async fn get_with_password(&self, id: &EmployeeId) -> Result<Option<(Employee, String)>>;

    /// Find an employee whose username or email matches the login, with their
    /// password hash (for authentication)
    async fn find_by_username_or_email_with_password(
        &self,
        login: &str,
    ) -> Result<Option<(Employee, String)>>;

    /// Check whether an employee with the given username exists
    async fn exists_by_username(&self, username: &str) -> Result<bool>;

    /// List all employees
    async fn list(&self) -> Result<Vec<Employee>>;

    /// Overwrite the updatable record fields (name and department)
    async fn update(&self, id: &EmployeeId, update: UpdateEmployee) -> Result<Employee>;

    /// Replace the stored password hash
    async fn update_password(&self, id: &EmployeeId, password_hash: String) -> Result<()>;

    /// Delete an employee and their role assignments
    async fn delete(&self, id: &EmployeeId) -> Result<()>;

    /// List the role names assigned to an employee
    async fn list_roles(&self, id: &EmployeeId) -> Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct SqlxEmployeeRepository {
    pool: DbPool,
}

impl SqlxEmployeeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for SqlxEmployeeRepository {
    #[instrument(skip(self, employee), fields(username = %employee.username), name = "db_create_employee")]
    async fn create(&self, employee: NewEmployee, role_id: RoleId) -> Result<Employee> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(|err| Error::Database {
            source: err,
            context: "Failed to begin employee create transaction".to_string(),
        })?;

        let result = sqlx::query(
            r#"
            INSERT INTO employees (first_name, last_name, username, email, password_hash,
                                   department, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.username)
        .bind(&employee.email)
        .bind(&employee.password_hash)
        .bind(&employee.department)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to create employee".to_string(),
        })?;

        let id = EmployeeId::new(result.last_insert_rowid());

        sqlx::query("INSERT INTO employee_roles (employee_id, role_id) VALUES (?, ?)")
            .bind(id)
            .bind(role_id)
            .execute(&mut *tx)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to assign employee role".to_string(),
            })?;

        tx.commit().await.map_err(|err| Error::Database {
            source: err,
            context: "Failed to commit employee create transaction".to_string(),
        })?;

        self.get(&id)
            .await?
            .ok_or_else(|| Error::internal("Employee not found after creation"))
    }

    #[instrument(skip(self), fields(employee_id = %id), name = "db_get_employee")]
    async fn get(&self, id: &EmployeeId) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {} FROM employees WHERE id = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch employee".to_string(),
        })?;

        Ok(row.map(row_to_employee))
    }

    #[instrument(skip(self), fields(employee_id = %id), name = "db_get_employee_with_password")]
    async fn get_with_password(&self, id: &EmployeeId) -> Result<Option<(Employee, String)>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {} FROM employees WHERE id = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch employee with password".to_string(),
        })?;

        Ok(row.map(|row| {
            let password_hash = row.password_hash.clone();
            (row_to_employee(row), password_hash)
        }))
    }

    #[instrument(skip(self), fields(login = %login), name = "db_find_employee_by_login")]
    async fn find_by_username_or_email_with_password(
        &self,
        login: &str,
    ) -> Result<Option<(Employee, String)>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {} FROM employees WHERE username = ? OR email = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(login)
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to fetch employee by login".to_string(),
        })?;

        Ok(row.map(|row| {
            let password_hash = row.password_hash.clone();
            (row_to_employee(row), password_hash)
        }))
    }

    #[instrument(skip(self), fields(username = %username), name = "db_employee_exists")]
    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE username = ?",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to check employee existence".to_string(),
        })?;

        Ok(count > 0)
    }

    #[instrument(skip(self), name = "db_list_employees")]
    async fn list(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {} FROM employees ORDER BY id",
            EMPLOYEE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to list employees".to_string(),
        })?;

        Ok(rows.into_iter().map(row_to_employee).collect())
    }

    #[instrument(skip(self, update), fields(employee_id = %id), name = "db_update_employee")]
    async fn update(&self, id: &EmployeeId, update: UpdateEmployee) -> Result<Employee> {
        sqlx::query(
            r#"
            UPDATE employees
            SET first_name = ?, last_name = ?, department = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.department)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to update employee".to_string(),
        })?;

        self.get(id)
            .await?
            .ok_or_else(|| Error::internal("Employee not found after update"))
    }

    #[instrument(skip(self, password_hash), fields(employee_id = %id), name = "db_update_employee_password")]
    async fn update_password(&self, id: &EmployeeId, password_hash: String) -> Result<()> {
        sqlx::query("UPDATE employees SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(&password_hash)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to update employee password".to_string(),
            })?;

        Ok(())
    }

    #[instrument(skip(self), fields(employee_id = %id), name = "db_delete_employee")]
    async fn delete(&self, id: &EmployeeId) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|err| Error::Database {
            source: err,
            context: "Failed to begin employee delete transaction".to_string(),
        })?;

        sqlx::query("DELETE FROM employee_roles WHERE employee_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to delete employee roles".to_string(),
            })?;

        sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|err| Error::Database {
                source: err,
                context: "Failed to delete employee".to_string(),
            })?;

        tx.commit().await.map_err(|err| Error::Database {
            source: err,
            context: "Failed to commit employee delete transaction".to_string(),
        })?;

        Ok(())
    }

    #[instrument(skip(self), fields(employee_id = %id), name = "db_list_employee_roles")]
    async fn list_roles(&self, id: &EmployeeId) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.name FROM roles r
            JOIN employee_roles er ON er.role_id = r.id
            WHERE er.employee_id = ?
            ORDER BY r.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::Database {
            source: err,
            context: "Failed to list employee roles".to_string(),
        })?;

        Ok(names)
    }
}
