//! Business logic built on top of the storage repositories.

mod client_service;
mod employee_service;

pub use client_service::{ClientService, DEFAULT_CLIENT_PASSWORD};
pub use employee_service::{EmployeeService, DEFAULT_EMPLOYEE_PASSWORD};
