//! HTTP handlers for the `/cms` API surface.

mod clients;
mod employees;
mod profile;

pub use clients::{
    approve_client_handler, create_client_handler, delete_client_handler, get_client_handler,
    list_clients_handler, reject_client_handler, update_client_handler,
};
pub use employees::{
    change_employee_password_handler, create_employee_handler, delete_employee_handler,
    get_employee_handler, list_employees_handler, update_employee_handler,
};
pub use profile::{change_profile_password_handler, get_profile_handler, update_profile_handler};

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body payload for password changes on every change-password path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    #[validate(length(min = 8, message = "New password must be at least 8 characters long"))]
    pub new_password: String,
}

/// Confirmation body sent on a successful password change.
pub(crate) const PASSWORD_UPDATED: &str = "Password updated successfully";
/// Body sent when the supplied old password does not match.
pub(crate) const PASSWORD_UPDATE_FAILED: &str = "Password update failed";
