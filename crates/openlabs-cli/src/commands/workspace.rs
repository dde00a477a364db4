//! Workspace commands: the workspace itself, its users, and the
//! blueprints shared into it.

use anyhow::{bail, Context, Result};
use reqwest::Method;

use openlabs_core::models::{
    Workspace, WorkspaceBlueprint, WorkspaceCreate, WorkspaceUser, WorkspaceUserCreate,
    WorkspaceUserUpdate,
};
use openlabs_core::{ApiClient, Overrides};

use crate::cli::WorkspaceCommands;
use crate::output::Table;

pub async fn run(overrides: &Overrides, command: WorkspaceCommands) -> Result<()> {
    match command {
        WorkspaceCommands::List => list(overrides).await,
        WorkspaceCommands::Get { id } => get(overrides, id).await,
        WorkspaceCommands::Create {
            name,
            description,
            time_limit,
        } => create(overrides, name, description, time_limit).await,
        WorkspaceCommands::Delete { id } => delete(overrides, id).await,
        WorkspaceCommands::ListUsers { id } => list_users(overrides, id).await,
        WorkspaceCommands::AddUser {
            id,
            user_id,
            role,
            time_limit,
        } => add_user(overrides, id, user_id, role, time_limit).await,
        WorkspaceCommands::UpdateUser {
            id,
            user_id,
            role,
            time_limit,
        } => update_user(overrides, id, user_id, role, time_limit).await,
        WorkspaceCommands::RemoveUser { id, user_id } => remove_user(overrides, id, user_id).await,
        WorkspaceCommands::ListBlueprints { id } => list_blueprints(overrides, id).await,
        WorkspaceCommands::AddBlueprint {
            id,
            blueprint_id,
            blueprint_type,
            permission,
        } => add_blueprint(overrides, id, blueprint_id, blueprint_type, permission).await,
        WorkspaceCommands::RemoveBlueprint {
            id,
            blueprint_id,
            blueprint_type,
        } => remove_blueprint(overrides, id, blueprint_id, blueprint_type).await,
    }
}

async fn list(overrides: &Overrides) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client.get("/api/v1/workspaces").await?;
    let workspaces: Vec<Workspace> = ApiClient::parse(response).await?.unwrap_or_default();

    if workspaces.is_empty() {
        println!("No workspaces found");
        return Ok(());
    }

    let mut table = Table::new(["ID", "Name", "Description", "Default Time Limit", "Created At"]);
    for w in &workspaces {
        table.row([
            w.id.to_string(),
            w.name.clone(),
            w.description.clone(),
            format!("{} seconds", w.default_time_limit),
            w.created_at.clone(),
        ]);
    }
    table.print();
    Ok(())
}

async fn get(overrides: &Overrides, id: i64) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client.get(&format!("/api/v1/workspaces/{id}")).await?;
    let workspace: Workspace = ApiClient::parse(response)
        .await?
        .context("server returned an empty response")?;

    println!("{}", ApiClient::to_pretty(&workspace)?);
    Ok(())
}

async fn create(
    overrides: &Overrides,
    name: String,
    description: Option<String>,
    time_limit: Option<i64>,
) -> Result<()> {
    let request = WorkspaceCreate {
        name,
        description,
        default_time_limit: time_limit,
    };

    let client = super::client(overrides)?;
    let response = client.post("/api/v1/workspaces", &request).await?;
    let workspace: Workspace = ApiClient::parse(response)
        .await?
        .context("server returned an empty response")?;

    println!("Workspace created successfully!");
    println!("  ID:   {}", workspace.id);
    println!("  Name: {}", workspace.name);
    Ok(())
}

async fn delete(overrides: &Overrides, id: i64) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client.delete(&format!("/api/v1/workspaces/{id}")).await?;
    let deleted: bool = ApiClient::parse(response).await?.unwrap_or(false);

    if deleted {
        println!("Workspace deleted successfully");
    } else {
        println!("Failed to delete workspace");
    }
    Ok(())
}

async fn list_users(overrides: &Overrides, id: i64) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client.get(&format!("/api/v1/workspaces/{id}/users")).await?;
    let users: Vec<WorkspaceUser> = ApiClient::parse(response).await?.unwrap_or_default();

    if users.is_empty() {
        println!("No users found in this workspace");
        return Ok(());
    }

    let mut table = Table::new(["ID", "Name", "Email", "Role", "Time Limit"]);
    for u in &users {
        table.row([
            u.id.to_string(),
            u.name.clone(),
            u.email.clone(),
            u.role.clone(),
            format!("{} seconds", u.time_limit),
        ]);
    }
    table.print();
    Ok(())
}

async fn add_user(
    overrides: &Overrides,
    id: i64,
    user_id: i64,
    role: String,
    time_limit: Option<i64>,
) -> Result<()> {
    let request = WorkspaceUserCreate {
        user_id,
        role,
        time_limit,
    };

    let client = super::client(overrides)?;
    let response = client
        .post(&format!("/api/v1/workspaces/{id}/users"), &request)
        .await?;
    let user: WorkspaceUser = ApiClient::parse(response)
        .await?
        .context("server returned an empty response")?;

    println!("User added to workspace successfully!");
    println!("  User ID: {}", user.id);
    println!("  Name:    {}", user.name);
    println!("  Role:    {}", user.role);
    Ok(())
}

async fn update_user(
    overrides: &Overrides,
    id: i64,
    user_id: i64,
    role: Option<String>,
    time_limit: Option<i64>,
) -> Result<()> {
    if role.is_none() && time_limit.is_none() {
        bail!("at least one of --role or --time-limit must be specified");
    }
    let request = WorkspaceUserUpdate { role, time_limit };

    let client = super::client(overrides)?;
    let response = client
        .put(&format!("/api/v1/workspaces/{id}/users/{user_id}"), &request)
        .await?;
    let user: WorkspaceUser = ApiClient::parse(response)
        .await?
        .context("server returned an empty response")?;

    println!("User updated in workspace successfully!");
    println!("  User ID:    {}", user.id);
    println!("  Name:       {}", user.name);
    println!("  Role:       {}", user.role);
    println!("  Time Limit: {} seconds", user.time_limit);
    Ok(())
}

async fn remove_user(overrides: &Overrides, id: i64, user_id: i64) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client
        .delete(&format!("/api/v1/workspaces/{id}/users/{user_id}"))
        .await?;
    let removed: bool = ApiClient::parse(response).await?.unwrap_or(false);

    if removed {
        println!("User removed from workspace successfully");
    } else {
        println!("Failed to remove user from workspace");
    }
    Ok(())
}

async fn list_blueprints(overrides: &Overrides, id: i64) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client
        .get(&format!("/api/v1/workspaces/{id}/blueprints"))
        .await?;
    // Shared blueprints carry kind-specific extras; keep the row loose and
    // pick out the common fields.
    let blueprints: Vec<serde_json::Value> = ApiClient::parse(response).await?.unwrap_or_default();

    if blueprints.is_empty() {
        println!("No blueprints found shared with this workspace");
        return Ok(());
    }

    let field = |b: &serde_json::Value, key: &str| match b.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    let mut table = Table::new(["Blueprint ID", "Blueprint Type", "Permission", "Name"]);
    for b in &blueprints {
        table.row([
            field(b, "blueprint_id"),
            field(b, "blueprint_type"),
            field(b, "permission"),
            field(b, "name"),
        ]);
    }
    table.print();
    Ok(())
}

async fn add_blueprint(
    overrides: &Overrides,
    id: i64,
    blueprint_id: i64,
    blueprint_type: String,
    permission: String,
) -> Result<()> {
    let request = WorkspaceBlueprint {
        blueprint_id,
        blueprint_type: blueprint_type.clone(),
        permission: permission.clone(),
    };

    let client = super::client(overrides)?;
    let response = client
        .post(&format!("/api/v1/workspaces/{id}/blueprints"), &request)
        .await?;
    let _: Option<serde_json::Value> = ApiClient::parse(response).await?;

    println!("Blueprint shared with workspace successfully!");
    println!("  Blueprint ID: {blueprint_id}");
    println!("  Type:         {blueprint_type}");
    println!("  Permission:   {permission}");
    Ok(())
}

async fn remove_blueprint(
    overrides: &Overrides,
    id: i64,
    blueprint_id: i64,
    blueprint_type: String,
) -> Result<()> {
    // The server disambiguates the blueprint kind from the request body on
    // this DELETE.
    let request = serde_json::json!({
        "blueprint_id": blueprint_id,
        "blueprint_type": blueprint_type,
    });

    let client = super::client(overrides)?;
    let response = client
        .send(
            Method::DELETE,
            &format!("/api/v1/workspaces/{id}/blueprints/{blueprint_id}"),
            Some(&request),
        )
        .await?;
    let removed: bool = ApiClient::parse(response).await?.unwrap_or(false);

    if removed {
        println!("Blueprint removed from workspace successfully");
    } else {
        println!("Failed to remove blueprint from workspace");
    }
    Ok(())
}
