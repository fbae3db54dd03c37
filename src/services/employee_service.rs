//! Employee management operations and bootstrap admin provisioning.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::auth::hashing;
use crate::domain::{
    CreateEmployeeRequest, Employee, EmployeeId, NewEmployee, UpdateEmployee, ADMIN_ROLE,
    EMPLOYEE_ROLE,
};
use crate::errors::{AuthErrorType, Error, Result};
use crate::storage::repositories::{
    EmployeeRepository, RoleRepository, SqlxEmployeeRepository, SqlxRoleRepository,
};
use crate::storage::DbPool;

/// Password assigned to every newly created employee.
pub const DEFAULT_EMPLOYEE_PASSWORD: &str = "defaultEmployeePassword";

const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";
const BOOTSTRAP_ADMIN_PASSWORD: &str = "strongAdminPassword";

pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl EmployeeService {
    pub fn new(employees: Arc<dyn EmployeeRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { employees, roles }
    }

    /// Convenience constructor wiring the sqlx-backed repositories.
    pub fn with_sqlx(pool: DbPool) -> Self {
        Self::new(
            Arc::new(SqlxEmployeeRepository::new(pool.clone())),
            Arc::new(SqlxRoleRepository::new(pool)),
        )
    }

    /// Create the default admin account if no employee named `admin` exists.
    /// Safe to call on every startup.
    #[instrument(skip(self))]
    pub async fn ensure_bootstrap_admin(&self) -> Result<()> {
        if self.employees.exists_by_username(BOOTSTRAP_ADMIN_USERNAME).await? {
            info!("Bootstrap admin already present, skipping seed");
            return Ok(());
        }

        let password_hash = hashing::hash_password(BOOTSTRAP_ADMIN_PASSWORD)?;
        let role = self
            .roles
            .find_by_name(ADMIN_ROLE)
            .await?
            .ok_or_else(|| Error::internal(format!("Role '{}' is not seeded", ADMIN_ROLE)))?;

        let admin = self
            .employees
            .create(
                NewEmployee {
                    first_name: "Admin".to_string(),
                    last_name: "User".to_string(),
                    username: BOOTSTRAP_ADMIN_USERNAME.to_string(),
                    email: "admin@example.com".to_string(),
                    password_hash,
                    department: "IT".to_string(),
                },
                role.id,
            )
            .await?;

        info!(employee_id = %admin.id, "Bootstrap admin created");
        Ok(())
    }

    /// Create a new employee with the default password and the employee role.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_employee(&self, request: CreateEmployeeRequest) -> Result<Employee> {
        let password_hash = hashing::hash_password(DEFAULT_EMPLOYEE_PASSWORD)?;
        let role = self
            .roles
            .find_by_name(EMPLOYEE_ROLE)
            .await?
            .ok_or_else(|| Error::internal(format!("Role '{}' is not seeded", EMPLOYEE_ROLE)))?;

        let employee = self
            .employees
            .create(
                NewEmployee {
                    first_name: request.first_name,
                    last_name: request.last_name,
                    username: request.username,
                    email: request.email,
                    password_hash,
                    department: request.department,
                },
                role.id,
            )
            .await?;

        info!(employee_id = %employee.id, "Employee created");
        Ok(employee)
    }

    #[instrument(skip(self), fields(employee_id = %id))]
    pub async fn get_employee(&self, id: &EmployeeId) -> Result<Employee> {
        self.employees
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found("Employee", id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.employees.list().await
    }

    /// Overwrite the employee's name and department. Username and email are
    /// never changed through this path.
    #[instrument(skip(self, update), fields(employee_id = %id))]
    pub async fn update_employee(
        &self,
        id: &EmployeeId,
        update: UpdateEmployee,
    ) -> Result<Employee> {
        self.get_employee(id).await?;
        self.employees.update(id, update).await
    }

    /// Delete an employee. Unknown IDs surface as not-found.
    #[instrument(skip(self), fields(employee_id = %id))]
    pub async fn delete_employee(&self, id: &EmployeeId) -> Result<()> {
        self.get_employee(id).await?;
        self.employees.delete(id).await?;
        info!(employee_id = %id, "Employee deleted");
        Ok(())
    }

    /// Change an employee's password. Returns `Ok(false)` when the old
    /// password does not match the stored hash.
    #[instrument(skip(self, old_password, new_password), fields(employee_id = %id))]
    pub async fn change_password(
        &self,
        id: &EmployeeId,
        old_password: &str,
        new_password: &str,
    ) -> Result<bool> {
        let (_, password_hash) = self.employees.get_with_password(id).await?.ok_or_else(|| {
            Error::auth(
                format!("Employee {} not found", id),
                AuthErrorType::PrincipalNotFound,
            )
        })?;

        if !hashing::verify_password(old_password, &password_hash)? {
            return Ok(false);
        }

        let new_hash = hashing::hash_password(new_password)?;
        self.employees.update_password(id, new_hash).await?;
        info!(employee_id = %id, "Employee password updated");
        Ok(true)
    }
}
