//! Request and response payload types for the OpenLabs API.

pub mod blueprint;
pub mod range;
pub mod secrets;
pub mod user;
pub mod workspace;

pub use blueprint::{BlueprintHeader, BlueprintId, HostBlueprint, SubnetBlueprint, VpcBlueprint};
pub use range::{DeployRangeRequest, DeployedRangeHeader};
pub use secrets::{AwsSecrets, AzureSecrets, SecretStatus, UserSecrets};
pub use user::{
    LoginStatus, MessageResponse, PasswordUpdate, RegisteredUser, UserCredentials, UserInfo,
    UserRegister,
};
pub use workspace::{
    Workspace, WorkspaceBlueprint, WorkspaceCreate, WorkspaceUser, WorkspaceUserCreate,
    WorkspaceUserUpdate,
};
