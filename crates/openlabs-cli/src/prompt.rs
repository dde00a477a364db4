//! Interactive prompts for credentials and account details.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};

/// Read one trimmed line from stdin after a visible prompt.
pub fn read_line(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read input")?;
    Ok(line.trim().to_string())
}

/// Read a value without echoing it.
pub fn read_hidden(label: &str) -> Result<String> {
    rpassword::prompt_password(format!("{label}: ")).context("failed to read hidden input")
}

/// Email and password for login, prompting only for the missing pieces.
pub fn login_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String)> {
    let email = match email {
        Some(email) => email,
        None => read_line("Email")?,
    };
    let password = match password {
        Some(password) => password,
        None => read_hidden("Password")?,
    };
    Ok((email, password))
}

/// Full registration flow: name, email, password with confirmation.
pub fn registration_info() -> Result<(String, String, String)> {
    let name = read_line("Full Name")?;
    let email = read_line("Email")?;
    let password = read_hidden("Password")?;
    let confirm = read_hidden("Confirm Password")?;

    if password != confirm {
        bail!("passwords don't match");
    }
    Ok((name, email, password))
}

/// Current and new password, the new one confirmed.
pub fn password_update() -> Result<(String, String)> {
    let current = read_hidden("Current Password")?;
    let new = read_hidden("New Password")?;
    let confirm = read_hidden("Confirm New Password")?;

    if new != confirm {
        bail!("new passwords don't match");
    }
    Ok((current, new))
}

/// AWS access key (visible) and secret key (hidden).
pub fn aws_credentials() -> Result<(String, String)> {
    println!("Enter your AWS credentials:");
    let access_key = read_line("AWS Access Key")?;
    let secret_key = read_hidden("AWS Secret Key")?;

    if access_key.is_empty() || secret_key.trim().is_empty() {
        bail!("both AWS Access Key and Secret Key are required");
    }
    Ok((access_key, secret_key.trim().to_string()))
}

/// Azure service principal credentials, the client secret hidden.
pub fn azure_credentials() -> Result<(String, String, String, String)> {
    println!("Enter your Azure credentials:");
    let client_id = read_line("Azure Client ID")?;
    let client_secret = read_hidden("Azure Client Secret")?;
    let tenant_id = read_line("Azure Tenant ID")?;
    let subscription_id = read_line("Azure Subscription ID")?;

    let client_secret = client_secret.trim().to_string();
    if client_id.is_empty()
        || client_secret.is_empty()
        || tenant_id.is_empty()
        || subscription_id.is_empty()
    {
        bail!("all Azure credential fields are required");
    }
    Ok((client_id, client_secret, tenant_id, subscription_id))
}
