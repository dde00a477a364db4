use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegister {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    pub admin: bool,
}

impl UserInfo {
    pub fn display_admin(&self) -> &'static str {
        if self.admin {
            "Yes"
        } else {
            "No"
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordUpdate {
    pub current_password: String,
    pub new_password: String,
}

/// Body of login/logout responses: a bare success indicator. The actual
/// credentials travel out-of-band (cookies, headers, or extra body
/// fields) and are handled by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginStatus {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
