//! Cloud provider secret commands.

use anyhow::{bail, Result};

use openlabs_core::models::{AwsSecrets, AzureSecrets, MessageResponse, UserSecrets};
use openlabs_core::{ApiClient, Error, Overrides};

use crate::cli::SecretsCommands;
use crate::output::Table;
use crate::prompt;

pub async fn run(overrides: &Overrides, command: SecretsCommands) -> Result<()> {
    match command {
        SecretsCommands::Status => status(overrides).await,
        SecretsCommands::Aws {
            access_key,
            secret_key,
            non_interactive,
        } => {
            let (access_key, secret_key) = if non_interactive {
                match (access_key, secret_key) {
                    (Some(a), Some(s)) => (a, s),
                    _ => bail!("both --access-key and --secret-key are required in non-interactive mode"),
                }
            } else {
                prompt::aws_credentials()?
            };
            update_aws(overrides, access_key, secret_key).await
        }
        SecretsCommands::Azure {
            client_id,
            client_secret,
            tenant_id,
            subscription_id,
            non_interactive,
        } => {
            let creds = if non_interactive {
                match (client_id, client_secret, tenant_id, subscription_id) {
                    (Some(c), Some(s), Some(t), Some(u)) => (c, s, t, u),
                    _ => bail!("all Azure credential parameters are required in non-interactive mode"),
                }
            } else {
                prompt::azure_credentials()?
            };
            update_azure(overrides, creds).await
        }
    }
}

async fn status(overrides: &Overrides) -> Result<()> {
    println!("Fetching cloud provider credential status...");

    let client = super::client(overrides)?;
    let response = client.get("/api/v1/users/me/secrets").await?;
    let secrets: UserSecrets = ApiClient::parse(response).await?.unwrap_or_default();

    let mut table = Table::new(["Provider", "Status", "Created At"]);
    table.row([
        "AWS",
        secrets.aws.display_status(),
        secrets.aws.display_created_at(),
    ]);
    table.row([
        "Azure",
        secrets.azure.display_status(),
        secrets.azure.display_created_at(),
    ]);
    table.print();
    Ok(())
}

async fn update_aws(overrides: &Overrides, access_key: String, secret_key: String) -> Result<()> {
    println!("Updating AWS credentials...");

    let secrets = AwsSecrets {
        aws_access_key: access_key,
        aws_secret_key: secret_key,
    };
    let client = super::client(overrides)?;
    let response = client.post("/api/v1/users/me/secrets/aws", &secrets).await?;
    finish(response, "AWS credentials updated successfully").await
}

async fn update_azure(
    overrides: &Overrides,
    (client_id, client_secret, tenant_id, subscription_id): (String, String, String, String),
) -> Result<()> {
    println!("Updating Azure credentials...");

    let secrets = AzureSecrets {
        azure_client_id: client_id,
        azure_client_secret: client_secret,
        azure_tenant_id: tenant_id,
        azure_subscription_id: subscription_id,
    };
    let client = super::client(overrides)?;
    let response = client
        .post("/api/v1/users/me/secrets/azure", &secrets)
        .await?;
    finish(response, "Azure credentials updated successfully").await
}

/// Print the server's confirmation message when it sends one, otherwise a
/// generic success line. A success status with an undecodable body still
/// counts as success; API errors propagate.
async fn finish(response: reqwest::Response, fallback: &str) -> Result<()> {
    match ApiClient::parse::<MessageResponse>(response).await {
        Ok(Some(result)) if !result.message.is_empty() => println!("{}", result.message),
        Ok(_) | Err(Error::Decode(_)) => println!("{fallback}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
