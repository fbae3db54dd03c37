//! Domain types: entities, statuses, and wire representations.

pub mod client;
pub mod employee;
pub mod id;
pub mod role;

pub use client::{
    Client, ClientDto, ClientStatus, ClientStatusParseError, CreateClientRequest, NewClient,
    UpdateClient, UpdateClientRequest,
};
pub use employee::{
    CreateEmployeeRequest, Employee, EmployeeDto, NewEmployee, UpdateEmployee,
    UpdateEmployeeRequest,
};
pub use id::{ClientId, EmployeeId, RoleId};
pub use role::{Role, ADMIN_ROLE, CLIENT_ROLE, EMPLOYEE_ROLE};
