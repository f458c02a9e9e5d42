pub mod browse;
pub mod clear;
pub mod config;
pub mod details;
pub mod prompts;
pub mod reviews;
pub mod search;
pub mod ui;

use crate::output::Output;
use cinesearch_config::{Config, CredentialStore, PathManager};
use cinesearch_sources::{build_clients, ClientError, Clients, ErrorKind};
use color_eyre::Result;

/// Config file (or defaults) with environment overrides applied
pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config.apply_env_overrides();
    Ok(config)
}

pub fn load_credentials(paths: &PathManager) -> Result<CredentialStore> {
    let credentials_file = paths.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(cred_store)
}

/// Everything a data command needs
pub struct Session {
    pub config: Config,
    pub clients: Clients,
}

impl Session {
    pub fn open(paths: &PathManager) -> Result<Self> {
        let config = load_config(paths)?;
        let credentials = load_credentials(paths)?;
        let clients = build_clients(&config, &credentials)
            .map_err(|e| color_eyre::eyre::eyre!("Configuration validation failed: {}", e))?;
        Ok(Self { config, clients })
    }
}

/// Print a client error with what the user can do about it
pub fn print_client_error(error: &ClientError, output: &Output) {
    output.error(error.message());
    match error.kind() {
        ErrorKind::Configuration => {
            output.warn("Set OMDB_API_KEY or run `cinesearch config omdb`, then try again.");
        }
        ErrorKind::NotFound => {}
        ErrorKind::Network | ErrorKind::Decode => {
            output.warn("Run the same command again to retry.");
        }
    }
}

/// [`print_client_error`], then a report for a non-zero exit
pub fn client_failure(error: ClientError, output: &Output) -> color_eyre::Report {
    print_client_error(&error, output);
    color_eyre::eyre::eyre!("{} error", error.kind())
}
