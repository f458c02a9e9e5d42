use super::prompts;
use super::ui::{header_cell, mask_string, new_table, print_section_header};
use super::{load_config, load_credentials};
use crate::output::Output;
use crate::ConfigCommands;
use cinesearch_config::{Config, PathManager};
use color_eyre::Result;
use comfy_table::{Attribute, Cell};
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, paths, output),
        ConfigCommands::Omdb { api_key } => configure_omdb(api_key, paths, output),
        ConfigCommands::Reviews { base_url, page_size } => configure_reviews(base_url, page_size, paths, output),
    }
}

fn show_config(full: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let config = load_config(paths)?;
    let credentials = load_credentials(paths)?;
    let api_key = config.resolve_api_key(&credentials).unwrap_or_default();
    let api_key_display = if full { api_key.clone() } else { mask_string(&api_key) };

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "omdb": {
                "base_url": config.omdb.base_url,
                "api_key": api_key_display,
            },
            "reviews": {
                "base_url": config.reviews.base_url,
                "page_size": config.reviews.page_size,
            },
            "logging": {
                "level": config.logging.level,
                "json": config.logging.json,
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    print_section_header("Configuration", output);

    let mut info_table = new_table();
    info_table.set_header(vec![
        Cell::new("Config File").add_attribute(Attribute::Bold),
        Cell::new(config_file.display().to_string()),
    ]);
    if !config_file.exists() {
        info_table.add_row(vec![Cell::new("Status"), Cell::new("not created yet, showing defaults")]);
    }
    output.println(info_table.to_string());

    let mut table = new_table();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    table.add_row(vec![Cell::new("OMDb base URL"), Cell::new(&config.omdb.base_url)]);
    table.add_row(vec![Cell::new("OMDb API key"), Cell::new(api_key_display)]);
    table.add_row(vec![Cell::new("Reviews base URL"), Cell::new(&config.reviews.base_url)]);
    table.add_row(vec![Cell::new("Reviews page size"), Cell::new(config.reviews.page_size)]);
    table.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
    output.println(table.to_string());

    if api_key.is_empty() {
        output.warn("No OMDb API key configured. Run `cinesearch config omdb` or set OMDB_API_KEY.");
    }
    Ok(())
}

/// Config as stored on disk, without environment overrides, so saving never persists them
fn load_file_config(paths: &PathManager) -> Result<Config> {
    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;
    let config_file = paths.config_file();
    Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

fn configure_omdb(api_key_arg: Option<String>, paths: &PathManager, output: &Output) -> Result<()> {
    let api_key = match api_key_arg {
        Some(key) => key,
        None => {
            print_section_header("OMDb API key", output);
            output.println("Get a free key at https://www.omdbapi.com/apikey.aspx");
            prompts::prompt_password("OMDb API key")?
        }
    };

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(color_eyre::eyre::eyre!("API key cannot be empty"));
    }

    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;
    let mut credentials = load_credentials(paths)?;
    credentials.set_omdb_api_key(api_key);
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("OMDb API key saved to {}", paths.credentials_file().display()));
    if std::env::var("OMDB_API_KEY").map(|v| !v.trim().is_empty()).unwrap_or(false) {
        output.warn("OMDB_API_KEY is set in the environment and takes precedence over the stored key");
    }
    Ok(())
}

fn configure_reviews(base_url: Option<String>, page_size: Option<u32>, paths: &PathManager, output: &Output) -> Result<()> {
    let mut config = load_file_config(paths)?;

    let base_url = match (base_url, page_size) {
        (Some(url), _) => Some(url),
        (None, Some(_)) => None,
        (None, None) => Some(prompts::prompt_string("Reviews backend URL", Some(&config.reviews.base_url))?),
    };

    if let Some(url) = base_url {
        config.reviews.base_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(size) = page_size {
        config.reviews.page_size = size;
    }

    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;

    let config_file = paths.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!(
        "Reviews backend set to {} (page size {})",
        config.reviews.base_url, config.reviews.page_size
    ));
    Ok(())
}
