use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsSecrets {
    pub aws_access_key: String,
    pub aws_secret_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureSecrets {
    pub azure_client_id: String,
    pub azure_client_secret: String,
    pub azure_tenant_id: String,
    pub azure_subscription_id: String,
}

/// Whether credentials are on file for one provider. The server never
/// returns the secrets themselves, only their status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretStatus {
    pub has_credentials: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl SecretStatus {
    pub fn display_status(&self) -> &'static str {
        if self.has_credentials {
            "Configured"
        } else {
            "Not configured"
        }
    }

    pub fn display_created_at(&self) -> &str {
        self.created_at.as_deref().unwrap_or("N/A")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSecrets {
    pub aws: SecretStatus,
    pub azure: SecretStatus,
}
