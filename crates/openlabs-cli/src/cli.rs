//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// OpenLabs CLI - manage blueprints, ranges, workspaces, and users.
#[derive(Parser, Debug, Clone)]
#[command(name = "openlabs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// URL of the OpenLabs API server for this invocation.
    #[arg(long, env = "OPENLABS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Authentication token, used when none is stored yet.
    #[arg(long, env = "OPENLABS_TOKEN", global = true)]
    pub token: Option<String>,

    /// Encryption key, used when none is stored yet.
    #[arg(long, env = "OPENLABS_ENC_KEY", global = true)]
    pub enc_key: Option<String>,

    /// Log request and response details to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage your OpenLabs user account.
    User {
        /// User subcommand to execute.
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Upload and manage blueprints for ranges, VPCs, subnets, and hosts.
    #[command(alias = "templates")]
    Blueprints {
        /// Blueprint subcommand to execute.
        #[command(subcommand)]
        command: BlueprintCommands,
    },

    /// Deploy and manage ranges.
    Range {
        /// Range subcommand to execute.
        #[command(subcommand)]
        command: RangeCommands,
    },

    /// Create and manage workspaces.
    Workspace {
        /// Workspace subcommand to execute.
        #[command(subcommand)]
        command: WorkspaceCommands,
    },

    /// Upload and manage cloud provider secrets.
    Secrets {
        /// Secrets subcommand to execute.
        #[command(subcommand)]
        command: SecretsCommands,
    },

    /// View and update CLI configuration.
    Config {
        /// Config subcommand to execute.
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print version information.
    Version,
}

/// User account subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum UserCommands {
    /// Log in to OpenLabs and store the session credentials.
    Login {
        /// Email address (prompted for when omitted).
        #[arg(long)]
        email: Option<String>,

        /// Password (prompted for when omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Register a new user account.
    Register {
        /// Email for the new account.
        #[arg(long)]
        email: Option<String>,

        /// Password for the new account.
        #[arg(long)]
        password: Option<String>,

        /// Full name for the new account.
        #[arg(long)]
        name: Option<String>,

        /// Fail instead of prompting when a value is missing.
        #[arg(long)]
        non_interactive: bool,
    },

    /// Log out and clear stored credentials.
    Logout,

    /// Show your user profile and provider credential status.
    Info,

    /// Update your password and log back in with the new one.
    UpdatePassword {
        /// Current password.
        #[arg(long)]
        current_password: Option<String>,

        /// New password.
        #[arg(long)]
        new_password: Option<String>,

        /// Fail instead of prompting when a value is missing.
        #[arg(long)]
        non_interactive: bool,
    },
}

/// Blueprint subcommands, one family per resource kind.
#[derive(Subcommand, Debug, Clone)]
pub enum BlueprintCommands {
    /// Manage range blueprints.
    Range {
        /// Action to perform.
        #[command(subcommand)]
        command: RangeBlueprintActions,
    },

    /// Manage VPC blueprints.
    Vpc {
        /// Action to perform.
        #[command(subcommand)]
        command: ComponentBlueprintActions,
    },

    /// Manage subnet blueprints.
    Subnet {
        /// Action to perform.
        #[command(subcommand)]
        command: ComponentBlueprintActions,
    },

    /// Manage host blueprints.
    Host {
        /// Action to perform.
        #[command(subcommand)]
        command: ComponentBlueprintActions,
    },
}

/// Actions on range blueprints.
#[derive(Subcommand, Debug, Clone)]
pub enum RangeBlueprintActions {
    /// List all range blueprints.
    List,

    /// Get a range blueprint as JSON.
    Get {
        /// Blueprint ID.
        id: i64,
    },

    /// Upload a range blueprint from a JSON file.
    Upload {
        /// Path to the blueprint JSON file.
        file: PathBuf,
    },

    /// Delete a range blueprint.
    Delete {
        /// Blueprint ID.
        id: i64,
    },
}

/// Actions on VPC, subnet, and host blueprints.
#[derive(Subcommand, Debug, Clone)]
pub enum ComponentBlueprintActions {
    /// List blueprints of this kind.
    List {
        /// List only standalone blueprints (not part of a larger blueprint).
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        standalone: bool,
    },

    /// Get a blueprint as JSON.
    Get {
        /// Blueprint ID.
        id: i64,
    },

    /// Upload a blueprint from a JSON file.
    Upload {
        /// Path to the blueprint JSON file.
        file: PathBuf,
    },

    /// Delete a blueprint.
    Delete {
        /// Blueprint ID.
        id: i64,
    },
}

/// Deployed range subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum RangeCommands {
    /// List deployed ranges.
    List,

    /// Get a deployed range as JSON.
    Get {
        /// Range ID.
        id: i64,
    },

    /// Deploy a range from a blueprint.
    Deploy {
        /// ID of the blueprint to deploy.
        #[arg(long)]
        blueprint_id: i64,

        /// Name for the deployed range.
        #[arg(long)]
        name: String,

        /// Region to deploy into (e.g. us_east_1).
        #[arg(long)]
        region: String,

        /// Optional description for the range.
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a deployed range.
    Delete {
        /// Range ID.
        id: i64,
    },
}

/// Workspace subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum WorkspaceCommands {
    /// List workspaces you have access to.
    List,

    /// Get a workspace as JSON.
    Get {
        /// Workspace ID.
        id: i64,
    },

    /// Create a new workspace.
    Create {
        /// Name for the workspace.
        #[arg(long)]
        name: String,

        /// Optional description.
        #[arg(long)]
        description: Option<String>,

        /// Default time limit for workspace users, in seconds.
        #[arg(long)]
        time_limit: Option<i64>,
    },

    /// Delete a workspace.
    Delete {
        /// Workspace ID.
        id: i64,
    },

    /// List users in a workspace.
    ListUsers {
        /// Workspace ID.
        id: i64,
    },

    /// Add a user to a workspace.
    AddUser {
        /// Workspace ID.
        id: i64,

        /// ID of the user to add.
        #[arg(long)]
        user_id: i64,

        /// Role for the user (owner, manager, or member).
        #[arg(long)]
        role: String,

        /// Time limit for the user, in seconds.
        #[arg(long)]
        time_limit: Option<i64>,
    },

    /// Update a user's role or time limit in a workspace.
    UpdateUser {
        /// Workspace ID.
        id: i64,

        /// ID of the user to update.
        user_id: i64,

        /// New role (owner, manager, or member).
        #[arg(long)]
        role: Option<String>,

        /// New time limit, in seconds.
        #[arg(long)]
        time_limit: Option<i64>,
    },

    /// Remove a user from a workspace.
    RemoveUser {
        /// Workspace ID.
        id: i64,

        /// ID of the user to remove.
        user_id: i64,
    },

    /// List blueprints shared with a workspace.
    ListBlueprints {
        /// Workspace ID.
        id: i64,
    },

    /// Share a blueprint with a workspace.
    AddBlueprint {
        /// Workspace ID.
        id: i64,

        /// ID of the blueprint to share.
        #[arg(long)]
        blueprint_id: i64,

        /// Blueprint kind (range, vpc, subnet, or host).
        #[arg(long)]
        blueprint_type: String,

        /// Permission level (view, deploy, or edit).
        #[arg(long)]
        permission: String,
    },

    /// Remove a blueprint from a workspace.
    RemoveBlueprint {
        /// Workspace ID.
        id: i64,

        /// ID of the blueprint to remove.
        blueprint_id: i64,

        /// Blueprint kind (range, vpc, subnet, or host).
        #[arg(long)]
        blueprint_type: String,
    },
}

/// Cloud provider secret subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum SecretsCommands {
    /// Show the status of your provider secrets.
    Status,

    /// Update AWS credentials.
    Aws {
        /// AWS access key.
        #[arg(long)]
        access_key: Option<String>,

        /// AWS secret key.
        #[arg(long)]
        secret_key: Option<String>,

        /// Fail instead of prompting when a value is missing.
        #[arg(long)]
        non_interactive: bool,
    },

    /// Update Azure credentials.
    Azure {
        /// Azure client ID.
        #[arg(long)]
        client_id: Option<String>,

        /// Azure client secret.
        #[arg(long)]
        client_secret: Option<String>,

        /// Azure tenant ID.
        #[arg(long)]
        tenant_id: Option<String>,

        /// Azure subscription ID.
        #[arg(long)]
        subscription_id: Option<String>,

        /// Fail instead of prompting when a value is missing.
        #[arg(long)]
        non_interactive: bool,
    },
}

/// Configuration subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show the current configuration.
    Get,

    /// Set the API URL.
    SetApiUrl {
        /// New API URL.
        url: String,
    },

    /// Set the authentication token.
    SetToken {
        /// New token value.
        #[arg(value_name = "TOKEN")]
        value: String,
    },

    /// Set the encryption key.
    SetEncKey {
        /// New key value.
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_grammar_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_range_list() {
        let cli = Cli::parse_from(["openlabs", "range", "list"]);
        assert!(matches!(
            cli.command,
            Commands::Range {
                command: RangeCommands::List
            }
        ));
        assert!(cli.api_url.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "openlabs",
            "range",
            "list",
            "--api-url",
            "http://lab:9000",
            "--debug",
        ]);
        assert_eq!(cli.api_url.as_deref(), Some("http://lab:9000"));
        assert!(cli.debug);
    }

    #[test]
    fn parse_user_login_with_flags() {
        let cli = Cli::parse_from([
            "openlabs",
            "user",
            "login",
            "--email",
            "a@b.c",
            "--password",
            "pw",
        ]);
        match cli.command {
            Commands::User {
                command: UserCommands::Login { email, password },
            } => {
                assert_eq!(email.as_deref(), Some("a@b.c"));
                assert_eq!(password.as_deref(), Some("pw"));
            }
            other => panic!("expected user login, got {other:?}"),
        }
    }

    #[test]
    fn parse_blueprint_vpc_list_standalone_default() {
        let cli = Cli::parse_from(["openlabs", "blueprints", "vpc", "list"]);
        match cli.command {
            Commands::Blueprints {
                command:
                    BlueprintCommands::Vpc {
                        command: ComponentBlueprintActions::List { standalone },
                    },
            } => assert!(standalone),
            other => panic!("expected vpc list, got {other:?}"),
        }
    }

    #[test]
    fn parse_blueprint_host_list_standalone_false() {
        let cli = Cli::parse_from([
            "openlabs",
            "blueprints",
            "host",
            "list",
            "--standalone",
            "false",
        ]);
        match cli.command {
            Commands::Blueprints {
                command:
                    BlueprintCommands::Host {
                        command: ComponentBlueprintActions::List { standalone },
                    },
            } => assert!(!standalone),
            other => panic!("expected host list, got {other:?}"),
        }
    }

    #[test]
    fn templates_is_an_alias_for_blueprints() {
        let cli = Cli::parse_from(["openlabs", "templates", "range", "list"]);
        assert!(matches!(
            cli.command,
            Commands::Blueprints {
                command: BlueprintCommands::Range {
                    command: RangeBlueprintActions::List
                }
            }
        ));
    }

    #[test]
    fn parse_range_deploy_requires_flags() {
        let result = Cli::try_parse_from(["openlabs", "range", "deploy", "--name", "lab"]);
        assert!(result.is_err());

        let cli = Cli::parse_from([
            "openlabs",
            "range",
            "deploy",
            "--blueprint-id",
            "3",
            "--name",
            "lab",
            "--region",
            "us_east_1",
        ]);
        match cli.command {
            Commands::Range {
                command:
                    RangeCommands::Deploy {
                        blueprint_id,
                        name,
                        region,
                        description,
                    },
            } => {
                assert_eq!(blueprint_id, 3);
                assert_eq!(name, "lab");
                assert_eq!(region, "us_east_1");
                assert!(description.is_none());
            }
            other => panic!("expected range deploy, got {other:?}"),
        }
    }

    #[test]
    fn parse_workspace_add_user() {
        let cli = Cli::parse_from([
            "openlabs",
            "workspace",
            "add-user",
            "5",
            "--user-id",
            "9",
            "--role",
            "member",
        ]);
        match cli.command {
            Commands::Workspace {
                command:
                    WorkspaceCommands::AddUser {
                        id,
                        user_id,
                        role,
                        time_limit,
                    },
            } => {
                assert_eq!(id, 5);
                assert_eq!(user_id, 9);
                assert_eq!(role, "member");
                assert!(time_limit.is_none());
            }
            other => panic!("expected add-user, got {other:?}"),
        }
    }

    #[test]
    fn parse_workspace_remove_blueprint() {
        let cli = Cli::parse_from([
            "openlabs",
            "workspace",
            "remove-blueprint",
            "5",
            "12",
            "--blueprint-type",
            "vpc",
        ]);
        match cli.command {
            Commands::Workspace {
                command:
                    WorkspaceCommands::RemoveBlueprint {
                        id,
                        blueprint_id,
                        blueprint_type,
                    },
            } => {
                assert_eq!(id, 5);
                assert_eq!(blueprint_id, 12);
                assert_eq!(blueprint_type, "vpc");
            }
            other => panic!("expected remove-blueprint, got {other:?}"),
        }
    }

    #[test]
    fn parse_secrets_aws_non_interactive() {
        let cli = Cli::parse_from([
            "openlabs",
            "secrets",
            "aws",
            "--non-interactive",
            "--access-key",
            "AKIA",
            "--secret-key",
            "shh",
        ]);
        match cli.command {
            Commands::Secrets {
                command:
                    SecretsCommands::Aws {
                        access_key,
                        secret_key,
                        non_interactive,
                    },
            } => {
                assert!(non_interactive);
                assert_eq!(access_key.as_deref(), Some("AKIA"));
                assert_eq!(secret_key.as_deref(), Some("shh"));
            }
            other => panic!("expected secrets aws, got {other:?}"),
        }
    }

    #[test]
    fn parse_config_set_api_url() {
        let cli = Cli::parse_from(["openlabs", "config", "set-api-url", "http://lab:8000"]);
        match cli.command {
            Commands::Config {
                command: ConfigCommands::SetApiUrl { url },
            } => assert_eq!(url, "http://lab:8000"),
            other => panic!("expected set-api-url, got {other:?}"),
        }
    }
}
