//! Role catalog entity.
//!
//! Roles exist solely to derive authorization grants; no business logic ever
//! branches on them.

use crate::domain::RoleId;

/// A named role assignable to employees and clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

/// Role granted to every newly created client.
pub const CLIENT_ROLE: &str = "ROLE_CLIENT";

/// Role granted to every newly created employee.
pub const EMPLOYEE_ROLE: &str = "ROLE_EMPLOYEE";

/// Role granted to the bootstrap admin account.
pub const ADMIN_ROLE: &str = "ADMIN";
