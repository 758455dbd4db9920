//! Nested configuration fixture exercising objects, sequences, mappings and
//! enumerations.

use crate::database::{Database, valid_database};
use confine_rs_validate::{AsNode, Constraint, Node, Schema, Validate};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl AsNode for LogLevel {
    fn as_node(&self) -> Node<'_> {
        Node::Enum(match self {
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warn => "Warn",
            LogLevel::Error => "Error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub host: Option<String>,
    pub port: u16,
}

impl Server {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: Some(host.to_string()),
            port,
        }
    }
}

impl Validate for Server {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .field("host", |s| s.host.as_node(), &[Constraint::NotBlank])
            .field("port", |s| s.port.as_node(), &[Constraint::range(1.0, 65535.0)]);
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Cluster {
    pub name: String,
    pub replicas: u32,
    #[serde(default)]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub pools: BTreeMap<String, Database>,
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Validate for Cluster {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .field("name", |c| c.name.as_node(), &[Constraint::NotBlank])
            .field("replicas", |c| c.replicas.as_node(), &[Constraint::range(4.0, 10.0)])
            .field("servers", |c| c.servers.as_node(), &[Constraint::size(1, 3)])
            .field("pools", |c| c.pools.as_node(), &[Constraint::NotEmpty])
            .field("log_level", |c| c.log_level.as_node(), &[Constraint::Required])
            .field("tags", |c| c.tags.as_node(), &[]);
    }
}

/// A cluster that satisfies every constraint at every depth.
pub fn valid_cluster() -> Cluster {
    Cluster {
        name: "primary".to_string(),
        replicas: 4,
        servers: vec![
            Server::new("a.internal", 8080),
            Server::new("b.internal", 8080),
            Server::new("c.internal", 8080),
        ],
        pools: BTreeMap::from([("main".to_string(), valid_database())]),
        log_level: LogLevel::Info,
        tags: Vec::new(),
    }
}
