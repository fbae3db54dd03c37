//! Repository traits and their sqlx-backed implementations.

mod client;
mod employee;
mod role;

pub use client::{ClientRepository, SqlxClientRepository};
pub use employee::{EmployeeRepository, SqlxEmployeeRepository};
pub use role::{RoleRepository, SqlxRoleRepository};
