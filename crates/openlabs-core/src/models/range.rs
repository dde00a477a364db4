use serde::{Deserialize, Serialize};

/// Payload for deploying a range from a blueprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployRangeRequest {
    pub name: String,
    pub blueprint_id: i64,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Summary row returned when listing deployed ranges.
///
/// Timestamps are passed through as the RFC 3339 strings the API returns;
/// the CLI only ever displays them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployedRangeHeader {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub blueprint_id: i64,
    pub state: String,
    pub user_id: i64,
    pub created_at: String,
    pub updated_at: String,
}
