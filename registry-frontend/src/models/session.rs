use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session details served by the registry's session endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetails {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub authority_id: Option<String>,
}

/// The console's snapshot of an authenticated user.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Session {
    pub user_name: String,
    pub user_email: String,
    pub user_groups: Vec<String>,
    pub expire_at: DateTime<Utc>,
}
