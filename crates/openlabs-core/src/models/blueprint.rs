use serde::{Deserialize, Serialize};

/// Summary row returned when listing range blueprints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintHeader {
    pub id: i64,
    pub provider: String,
    pub name: String,
    pub vpn: bool,
    pub vnc: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Identifier assigned to a freshly uploaded blueprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintId {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpcBlueprint {
    pub id: i64,
    pub name: String,
    pub cidr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubnetBlueprint {
    pub id: i64,
    pub name: String,
    pub cidr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostBlueprint {
    pub id: i64,
    pub hostname: String,
    pub os: String,
    pub spec: String,
    pub size: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl HostBlueprint {
    /// Tags joined for single-cell table display.
    pub fn display_tags(&self) -> String {
        self.tags.join(", ")
    }
}
