//! Database connection settings fixture.

use confine_rs_validate::{AsNode, Constraint, Schema, Validate};
use serde::Deserialize;

/// Connection settings where every entry is optional at parse time and
/// presence is enforced by constraints instead.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Database {
    pub driver: Option<String>,
    pub host: Option<String>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
}

impl Validate for Database {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .field("driver", |d| d.driver.as_node(), &[Constraint::NotBlank])
            .field("host", |d| d.host.as_node(), &[Constraint::NotBlank])
            .field("database", |d| d.database.as_node(), &[Constraint::NotBlank])
            .field("user", |d| d.user.as_node(), &[Constraint::NotBlank])
            .field("password", |d| d.password.as_node(), &[Constraint::Required])
            .field("url", |d| d.url.as_node(), &[Constraint::NotBlank]);
    }
}

/// A database entry that satisfies every constraint.
pub fn valid_database() -> Database {
    Database {
        driver: Some("postgres".to_string()),
        host: Some("localhost".to_string()),
        database: Some("app".to_string()),
        user: Some("app".to_string()),
        password: Some(String::new()),
        url: Some("postgres://localhost/app".to_string()),
    }
}
