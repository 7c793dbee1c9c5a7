use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

use crate::service::checker::LANGUAGE_TOOL_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_dsn: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_grammar_check_url")]
    pub grammar_check_url: String,
}

const fn default_port() -> u16 {
    8000
}

fn default_grammar_check_url() -> String {
    LANGUAGE_TOOL_URL.to_string()
}

fn parse(contents: &str) -> Result<Config, Box<dyn std::error::Error>> {
    serde_yaml::from_str(contents).map_err(Into::into)
}

fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let database_dsn =
        env::var("PG_DSN").map_err(|_| "PG_DSN environment variable is required")?;

    let port = match env::var("PORT") {
        Ok(port) => port
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse PORT: {e}"))?,
        Err(_) => default_port(),
    };

    let grammar_check_url =
        env::var("GRAMMAR_CHECK_URL").unwrap_or_else(|_| default_grammar_check_url());

    Ok(Config {
        database_dsn,
        port,
        grammar_check_url,
    })
}

/// Reads the file named by `NOTES_API_CONFIG` (or `config.yaml`). Without a
/// config file, settings come from the environment.
pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let config_path = env::var("NOTES_API_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path)
}

fn load_from(config_path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    if Path::new(&config_path).exists() {
        tracing::info!("Reading config from '{config_path}'");
        return parse(&fs::read_to_string(config_path)?);
    }

    tracing::info!("'{config_path}' does not exist, using environment variables");
    load_from_env().map_err(|e| format!("no config file at '{config_path}' and {e}").into())
}
