//! Employee domain model and wire representations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::EmployeeId;

/// Stored representation of an employee (password hash excluded).
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New employee database payload.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub department: String,
}

/// Update payload for an existing employee. Username and email changes are
/// intentionally not applied even when present in the request payload.
#[derive(Debug, Clone)]
pub struct UpdateEmployee {
    pub first_name: String,
    pub last_name: String,
    pub department: String,
}

/// Wire representation of an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub department: String,
}

impl From<Employee> for EmployeeDto {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            username: employee.username,
            email: employee.email,
            department: employee.department,
        }
    }
}

/// Request to create a new employee. No password is accepted; a fixed default
/// password is assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub department: String,
}

/// Request to update an employee record. Username and email fields in the
/// payload are not read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub department: String,
}

impl From<UpdateEmployeeRequest> for UpdateEmployee {
    fn from(request: UpdateEmployeeRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            department: request.department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dto_serializes_camel_case() {
        let dto = EmployeeDto {
            id: EmployeeId::new(3),
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            username: "jsmith".into(),
            email: "jsmith@example.com".into(),
            department: "Legal".into(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["department"], "Legal");
        assert_eq!(json["id"], 3);
    }

    #[test]
    fn update_request_drops_username_and_email() {
        // Unknown fields are ignored by serde, so a full representation can be
        // submitted and only the updatable fields are read.
        let raw = r#"{
            "firstName": "Jane",
            "lastName": "Smith",
            "username": "attempted-rename",
            "email": "attempted@example.com",
            "department": "Legal"
        }"#;
        let request: UpdateEmployeeRequest = serde_json::from_str(raw).unwrap();
        let update = UpdateEmployee::from(request);
        assert_eq!(update.first_name, "Jane");
        assert_eq!(update.department, "Legal");
    }
}
