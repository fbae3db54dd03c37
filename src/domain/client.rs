//! Client domain model and wire representations.
//!
//! The client entity carries the shared login field group (username, email,
//! password hash) plus the client-specific SSN, date of birth, and lifecycle
//! status. The DTOs below are the wire-facing shapes; conversions between
//! the two form the mapping layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

use crate::domain::ClientId;

/// Lifecycle status of a client profile. New profiles start `Pending` and are
/// moved to `Approved` or `Rejected` by an employee action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientStatus {
    Pending,
    Approved,
    Rejected,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Pending => "Pending",
            ClientStatus::Approved => "Approved",
            ClientStatus::Rejected => "Rejected",
        }
    }
}

impl Display for ClientStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = ClientStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ClientStatus::Pending),
            "Approved" => Ok(ClientStatus::Approved),
            "Rejected" => Ok(ClientStatus::Rejected),
            other => Err(ClientStatusParseError(other.to_string())),
        }
    }
}

/// Error returned when client status parsing fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid client status: {0}")]
pub struct ClientStatusParseError(pub String);

/// Stored representation of a client (password hash excluded).
#[derive(Debug, Clone)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub ssn: String,
    pub date_of_birth: DateTime<Utc>,
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New client database payload. The password hash is assigned by the service
/// layer (clients are created with a fixed default password).
#[derive(Debug, Clone)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub ssn: String,
    pub date_of_birth: DateTime<Utc>,
    pub status: ClientStatus,
}

/// Update payload for an existing client. Only the name and email are
/// updatable through this path; username, SSN, date of birth, and status are
/// never touched by a record update.
#[derive(Debug, Clone)]
pub struct UpdateClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Wire representation of a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "SSN")]
    pub ssn: String,
    pub date_of_birth: DateTime<Utc>,
    pub status: ClientStatus,
}

impl From<Client> for ClientDto {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            first_name: client.first_name,
            last_name: client.last_name,
            username: client.username,
            email: client.email,
            ssn: client.ssn,
            date_of_birth: client.date_of_birth,
            status: client.status,
        }
    }
}

/// Request to create a new client. No password is accepted; a supplied status
/// is ignored and the server-assigned default (`Pending`) always wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "SSN")]
    pub ssn: String,
    pub date_of_birth: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<ClientStatus>,
}

/// Request to update a client record. Extra fields in the payload (username,
/// SSN, status) are simply not read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<UpdateClientRequest> for UpdateClient {
    fn from(request: UpdateClientRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for (input, expected) in [
            ("Pending", ClientStatus::Pending),
            ("Approved", ClientStatus::Approved),
            ("Rejected", ClientStatus::Rejected),
        ] {
            let parsed = input.parse::<ClientStatus>().unwrap();
            assert_eq!(parsed, expected);
            assert_eq!(parsed.to_string(), input);
        }

        let err = "pending".parse::<ClientStatus>().unwrap_err();
        assert_eq!(err.0, "pending");
    }

    #[test]
    fn status_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&ClientStatus::Pending).unwrap(), "\"Pending\"");
        let parsed: ClientStatus = serde_json::from_str("\"Approved\"").unwrap();
        assert_eq!(parsed, ClientStatus::Approved);
    }

    #[test]
    fn create_request_accepts_offset_date_and_ignores_unknown_status() {
        let raw = r#"{
            "firstName": "John",
            "lastName": "Doe",
            "username": "johndoe",
            "email": "johndoe@example.com",
            "SSN": "1234567890",
            "dateOfBirth": "1990-01-01T00:00:00.000+00:00"
        }"#;
        let request: CreateClientRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.username, "johndoe");
        assert_eq!(request.ssn, "1234567890");
        assert!(request.status.is_none());
    }

    #[test]
    fn dto_uses_uppercase_ssn_field() {
        let dto = ClientDto {
            id: ClientId::new(1),
            first_name: "John".into(),
            last_name: "Doe".into(),
            username: "johndoe".into(),
            email: "johndoe@example.com".into(),
            ssn: "1234567890".into(),
            date_of_birth: Utc::now(),
            status: ClientStatus::Pending,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("SSN").is_some());
        assert!(json.get("firstName").is_some());
        assert_eq!(json["status"], "Pending");
    }
}
