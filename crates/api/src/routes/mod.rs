pub mod attendance;
pub mod classes;
pub mod enrollments;
pub mod health;
pub mod profile;
pub mod reports;
pub mod student_portal;
pub mod students;

use serde::Serialize;

/// `{ success, message }` body for deletes and removals.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
