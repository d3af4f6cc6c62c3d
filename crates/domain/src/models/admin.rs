//! Administrator profile model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// An administrator as exposed through the profile endpoint. Credentials are
/// held by the identity provider, never here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
