//! Configuration commands.

use anyhow::Result;

use openlabs_core::Config;

use crate::cli::ConfigCommands;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Get => {
            let config = Config::load()?;
            println!("API URL: {}", config.api_url);
            println!("Auth Token: {}", config.auth_token);
            println!("Encryption Key: {}", config.enc_key);
            Ok(())
        }
        ConfigCommands::SetApiUrl { url } => {
            update(|c| c.api_url = url, "API URL updated successfully")
        }
        ConfigCommands::SetToken { value } => {
            update(|c| c.auth_token = value, "Auth token updated successfully")
        }
        ConfigCommands::SetEncKey { key } => {
            update(|c| c.enc_key = key, "Encryption key updated successfully")
        }
    }
}

fn update(apply: impl FnOnce(&mut Config), message: &str) -> Result<()> {
    let mut config = Config::load()?;
    apply(&mut config);
    config.save()?;
    println!("{message}");
    Ok(())
}
