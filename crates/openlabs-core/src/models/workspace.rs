use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub default_time_limit: i64,
    pub owner_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_time_limit: Option<i64>,
}

/// A user's membership record within a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub time_limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceUserCreate {
    pub user_id: i64,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<i64>,
}

/// Partial update; at least one field must be set, which the command
/// layer enforces before sending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceUserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<i64>,
}

/// A blueprint shared into a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceBlueprint {
    pub blueprint_id: i64,
    pub blueprint_type: String,
    pub permission: String,
}
