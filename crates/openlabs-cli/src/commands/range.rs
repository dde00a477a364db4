//! Deployed range commands.

use anyhow::{Context, Result};

use openlabs_core::models::{DeployRangeRequest, DeployedRangeHeader};
use openlabs_core::{ApiClient, Overrides};

use crate::cli::RangeCommands;
use crate::output::Table;

pub async fn run(overrides: &Overrides, command: RangeCommands) -> Result<()> {
    match command {
        RangeCommands::List => list(overrides).await,
        RangeCommands::Get { id } => get(overrides, id).await,
        RangeCommands::Deploy {
            blueprint_id,
            name,
            region,
            description,
        } => deploy(overrides, blueprint_id, name, region, description).await,
        RangeCommands::Delete { id } => delete(overrides, id).await,
    }
}

async fn list(overrides: &Overrides) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client.get("/api/v1/ranges").await?;
    let ranges: Vec<DeployedRangeHeader> = ApiClient::parse(response).await?.unwrap_or_default();

    if ranges.is_empty() {
        println!("No deployed ranges found");
        return Ok(());
    }

    let mut table = Table::new(["ID", "Name", "Description", "State", "Created At"]);
    for r in &ranges {
        table.row([
            r.id.to_string(),
            r.name.clone(),
            r.description.clone().unwrap_or_default(),
            r.state.clone(),
            r.created_at.clone(),
        ]);
    }
    table.print();
    Ok(())
}

async fn get(overrides: &Overrides, id: i64) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client.get(&format!("/api/v1/ranges/{id}")).await?;
    let range: serde_json::Value = ApiClient::parse(response)
        .await?
        .context("server returned an empty response")?;

    println!("{}", ApiClient::to_pretty(&range)?);
    Ok(())
}

async fn deploy(
    overrides: &Overrides,
    blueprint_id: i64,
    name: String,
    region: String,
    description: Option<String>,
) -> Result<()> {
    let request = DeployRangeRequest {
        name,
        blueprint_id,
        region,
        description,
    };

    let client = super::client(overrides)?;
    let response = client.post("/api/v1/ranges/deploy", &request).await?;
    let status: serde_json::Value = ApiClient::parse(response)
        .await?
        .context("server returned an empty response")?;

    println!("Range deployment initiated successfully");
    println!("Deployment status:");
    println!("{}", ApiClient::to_pretty(&status)?);
    Ok(())
}

async fn delete(overrides: &Overrides, id: i64) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client.delete(&format!("/api/v1/ranges/{id}")).await?;
    let deleted: bool = ApiClient::parse(response).await?.unwrap_or(false);

    if deleted {
        println!("Range deleted successfully");
    } else {
        println!("Failed to delete range");
    }
    Ok(())
}
