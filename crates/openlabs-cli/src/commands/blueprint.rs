//! Blueprint management commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use openlabs_core::models::{
    BlueprintHeader, BlueprintId, HostBlueprint, SubnetBlueprint, VpcBlueprint,
};
use openlabs_core::{ApiClient, Overrides};

use crate::cli::{BlueprintCommands, ComponentBlueprintActions, RangeBlueprintActions};
use crate::output::Table;

/// URL segment and display label for one blueprint family.
#[derive(Debug, Clone, Copy)]
struct Kind {
    segment: &'static str,
    label: &'static str,
}

const RANGE: Kind = Kind { segment: "ranges", label: "Range" };
const VPC: Kind = Kind { segment: "vpcs", label: "VPC" };
const SUBNET: Kind = Kind { segment: "subnets", label: "Subnet" };
const HOST: Kind = Kind { segment: "hosts", label: "Host" };

pub async fn run(overrides: &Overrides, command: BlueprintCommands) -> Result<()> {
    match command {
        BlueprintCommands::Range { command } => match command {
            RangeBlueprintActions::List => list_ranges(overrides).await,
            RangeBlueprintActions::Get { id } => get(overrides, RANGE, id).await,
            RangeBlueprintActions::Upload { file } => upload(overrides, RANGE, &file).await,
            RangeBlueprintActions::Delete { id } => delete(overrides, RANGE, id).await,
        },
        BlueprintCommands::Vpc { command } => match command {
            ComponentBlueprintActions::List { standalone } => {
                list_vpcs(overrides, standalone).await
            }
            ComponentBlueprintActions::Get { id } => get(overrides, VPC, id).await,
            ComponentBlueprintActions::Upload { file } => upload(overrides, VPC, &file).await,
            ComponentBlueprintActions::Delete { id } => delete(overrides, VPC, id).await,
        },
        BlueprintCommands::Subnet { command } => match command {
            ComponentBlueprintActions::List { standalone } => {
                list_subnets(overrides, standalone).await
            }
            ComponentBlueprintActions::Get { id } => get(overrides, SUBNET, id).await,
            ComponentBlueprintActions::Upload { file } => upload(overrides, SUBNET, &file).await,
            ComponentBlueprintActions::Delete { id } => delete(overrides, SUBNET, id).await,
        },
        BlueprintCommands::Host { command } => match command {
            ComponentBlueprintActions::List { standalone } => {
                list_hosts(overrides, standalone).await
            }
            ComponentBlueprintActions::Get { id } => get(overrides, HOST, id).await,
            ComponentBlueprintActions::Upload { file } => upload(overrides, HOST, &file).await,
            ComponentBlueprintActions::Delete { id } => delete(overrides, HOST, id).await,
        },
    }
}

fn list_path(kind: Kind, standalone: bool) -> String {
    let mut path = format!("/api/v1/blueprints/{}", kind.segment);
    if !standalone {
        path.push_str("?standalone_only=false");
    }
    path
}

async fn list_ranges(overrides: &Overrides) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client.get("/api/v1/blueprints/ranges").await?;
    let blueprints: Vec<BlueprintHeader> = ApiClient::parse(response).await?.unwrap_or_default();

    if blueprints.is_empty() {
        println!("No range blueprints found");
        return Ok(());
    }

    let mut table = Table::new(["Name", "ID", "Provider", "VNC", "VPN", "Description"]);
    for b in &blueprints {
        table.row([
            b.name.clone(),
            b.id.to_string(),
            b.provider.clone(),
            b.vnc.to_string(),
            b.vpn.to_string(),
            b.description.clone().unwrap_or_default(),
        ]);
    }
    table.print();
    Ok(())
}

async fn list_vpcs(overrides: &Overrides, standalone: bool) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client.get(&list_path(VPC, standalone)).await?;
    let blueprints: Vec<VpcBlueprint> = ApiClient::parse(response).await?.unwrap_or_default();

    if blueprints.is_empty() {
        println!("No VPC blueprints found");
        return Ok(());
    }

    let mut table = Table::new(["Name", "ID", "CIDR"]);
    for b in &blueprints {
        table.row([b.name.clone(), b.id.to_string(), b.cidr.clone()]);
    }
    table.print();
    Ok(())
}

async fn list_subnets(overrides: &Overrides, standalone: bool) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client.get(&list_path(SUBNET, standalone)).await?;
    let blueprints: Vec<SubnetBlueprint> = ApiClient::parse(response).await?.unwrap_or_default();

    if blueprints.is_empty() {
        println!("No subnet blueprints found");
        return Ok(());
    }

    let mut table = Table::new(["Name", "ID", "CIDR"]);
    for b in &blueprints {
        table.row([b.name.clone(), b.id.to_string(), b.cidr.clone()]);
    }
    table.print();
    Ok(())
}

async fn list_hosts(overrides: &Overrides, standalone: bool) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client.get(&list_path(HOST, standalone)).await?;
    let blueprints: Vec<HostBlueprint> = ApiClient::parse(response).await?.unwrap_or_default();

    if blueprints.is_empty() {
        println!("No host blueprints found");
        return Ok(());
    }

    let mut table = Table::new(["Hostname", "ID", "OS", "Spec", "Size", "Tags"]);
    for b in &blueprints {
        table.row([
            b.hostname.clone(),
            b.id.to_string(),
            b.os.clone(),
            b.spec.clone(),
            b.size.to_string(),
            b.display_tags(),
        ]);
    }
    table.print();
    Ok(())
}

/// The full blueprint document varies by kind and deployment; print it as
/// received rather than forcing a shape on it.
async fn get(overrides: &Overrides, kind: Kind, id: i64) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client
        .get(&format!("/api/v1/blueprints/{}/{id}", kind.segment))
        .await?;
    let blueprint: serde_json::Value = ApiClient::parse(response)
        .await?
        .context("server returned an empty response")?;

    println!("{}", ApiClient::to_pretty(&blueprint)?);
    Ok(())
}

async fn upload(overrides: &Overrides, kind: Kind, file: &Path) -> Result<()> {
    let data = fs::read_to_string(file)
        .with_context(|| format!("failed to read blueprint file {}", file.display()))?;
    let blueprint: serde_json::Value =
        serde_json::from_str(&data).context("blueprint file is not valid JSON")?;

    let client = super::client(overrides)?;
    let response = client
        .post(&format!("/api/v1/blueprints/{}", kind.segment), &blueprint)
        .await?;
    let result: BlueprintId = ApiClient::parse(response)
        .await?
        .context("server returned an empty response")?;

    println!("{} blueprint uploaded successfully!", kind.label);
    println!("  ID: {}", result.id);
    Ok(())
}

async fn delete(overrides: &Overrides, kind: Kind, id: i64) -> Result<()> {
    let client = super::client(overrides)?;
    let response = client
        .delete(&format!("/api/v1/blueprints/{}/{id}", kind.segment))
        .await?;
    let deleted: bool = ApiClient::parse(response).await?.unwrap_or(false);

    if deleted {
        println!("{} blueprint deleted successfully", kind.label);
    } else {
        println!("Failed to delete {} blueprint", kind.label);
    }
    Ok(())
}
