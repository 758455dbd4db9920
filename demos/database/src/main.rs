use anyhow::{Context, Result};
use confine_rs::{
    AsNode, ConfigError, ConfigLoader, Constraint, Environment, ProcessEnv, Schema, Validate,
    init_logging,
};
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct Connection {
    driver: String,
    host: String,
    database: String,
    user: String,
    #[serde(default)]
    password: Option<String>,
    url: String,
}

impl Validate for Connection {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .field("driver", |c| c.driver.as_node(), &[Constraint::NotBlank])
            .field("host", |c| c.host.as_node(), &[Constraint::NotBlank])
            .field("database", |c| c.database.as_node(), &[Constraint::NotBlank])
            .field("user", |c| c.user.as_node(), &[Constraint::NotBlank])
            .field("password", |c| c.password.as_node(), &[Constraint::Required])
            .field("url", |c| c.url.as_node(), &[Constraint::NotBlank]);
    }
}

#[derive(Debug, Deserialize)]
struct AppConfig {
    service: String,
    workers: u16,
    primary: Connection,
    #[serde(default)]
    replicas: Vec<Connection>,
}

impl Validate for AppConfig {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .field("service", |c| c.service.as_node(), &[Constraint::NotBlank])
            .field("workers", |c| c.workers.as_node(), &[Constraint::range(1.0, 64.0)])
            .field("primary", |c| c.primary.as_node(), &[Constraint::Required])
            .field("replicas", |c| c.replicas.as_node(), &[Constraint::max_size(4)]);
    }
}

/// Process environment with fallbacks so the demo runs without setup.
struct DemoEnv;

impl Environment for DemoEnv {
    fn var(&self, name: &str) -> Option<String> {
        ProcessEnv.var(name).or_else(|| {
            let fallback = match name {
                "DB_HOST" => "localhost",
                "DB_REPLICA_HOST" => "replica.localhost",
                "DB_USER" => "inventory",
                "DB_PASSWORD" => "",
                _ => return None,
            };
            Some(fallback.to_string())
        })
    }
}

fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    ConfigLoader::new()
        .with_environment(DemoEnv)
        .load_from_path(path)
}

fn main() -> Result<()> {
    init_logging();
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.yaml"));
    let config_display = config_path.display().to_string();

    let config = load_config(&config_path)
        .with_context(|| format!("failed to load config at {config_display}"))?;
    info!("loaded {} with {} replica(s)", config.service, config.replicas.len());

    println!("service: {} ({} workers)", config.service, config.workers);
    println!(
        "primary: {} {}@{}/{}",
        config.primary.driver, config.primary.user, config.primary.host, config.primary.database
    );
    println!("primary url: {}", config.primary.url);
    for (idx, replica) in config.replicas.iter().enumerate() {
        println!("replica[{idx}]: {} via {}", replica.host, replica.url);
    }
    Ok(())
}
