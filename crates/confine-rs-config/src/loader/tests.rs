//! Tests for the load pipeline.

use super::*;
use crate::MapEnvironment;
use confine_rs_test_utils::{
    Cluster, Database, INVALID_SAMPLE_YAML, SampleConfig, VALID_SAMPLE_YAML, write_config,
};
use confine_rs_validate::{AccessError, AsNode, Constraint, Node, Schema, ViolationKind};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::io::{self, Cursor};
use tempfile::TempDir;

const CLUSTER_YAML: &str = r#"
name: ${CLUSTER_NAME}
replicas: 5
servers:
  - host: ${PRIMARY_HOST}
    port: 8080
  - host: replica.internal
    port: 8081
pools:
  main:
    driver: postgres
    host: ${PRIMARY_HOST}
    database: app
    user: app
    password: ${DB_PASSWORD}
    url: postgres://${PRIMARY_HOST}/app
log_level: warn
"#;

fn cluster_env() -> MapEnvironment {
    MapEnvironment::new()
        .with("CLUSTER_NAME", "edge")
        .with("PRIMARY_HOST", "primary.internal")
        .with("DB_PASSWORD", "hunter2")
}

#[derive(Debug, Deserialize)]
struct Timeouts {
    connect: String,
    label: String,
}

impl Validate for Timeouts {
    fn describe(schema: &mut Schema<Self>) {
        schema
            .computed(
                "connect",
                |t| {
                    let secs = t.connect.trim_end_matches('s').parse::<u64>()?;
                    Ok(Node::UInt(secs))
                },
                &[Constraint::at_most(120.0)],
            )
            .field("label", |t| t.label.as_node(), &[Constraint::NotBlank]);
    }
}

/// Reader that fails on first use.
struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk on fire"))
    }
}

#[test]
fn loads_valid_sample_from_str() {
    let config: SampleConfig = ConfigLoader::new()
        .load_from_str(VALID_SAMPLE_YAML)
        .expect("config");
    assert_eq!(config.integer, 5);
    assert_eq!(config.string.as_deref(), Some("Some String"));
    assert!(config.bool);
}

#[test]
fn rejects_invalid_sample() {
    let err = ConfigLoader::new()
        .load_from_str::<SampleConfig>(INVALID_SAMPLE_YAML)
        .unwrap_err();
    assert!(err.is_validation());
    let violation = err.violation().expect("violation");
    assert_eq!(violation.field, "integer");
    assert_eq!(violation.owner, "SampleConfig");
}

#[test]
fn interpolates_before_parsing() {
    let loader = ConfigLoader::new().with_environment(cluster_env());
    let cluster: Cluster = loader.load_from_str(CLUSTER_YAML).expect("cluster");
    assert_eq!(cluster.name, "edge");
    assert_eq!(cluster.servers[0].host.as_deref(), Some("primary.internal"));
    let pool = &cluster.pools["main"];
    assert_eq!(pool.password.as_deref(), Some("hunter2"));
    assert_eq!(pool.url.as_deref(), Some("postgres://primary.internal/app"));
}

#[test]
fn missing_variable_aborts_load() {
    let env = MapEnvironment::new().with("CLUSTER_NAME", "edge");
    let err = ConfigLoader::new()
        .with_environment(env)
        .load_from_str::<Cluster>(CLUSTER_YAML)
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Interpolation(crate::InterpolationError::MissingVariable { ref name, .. })
            if name == "PRIMARY_HOST"
    ));
}

#[test]
fn nested_violation_is_attributed() {
    let yaml = CLUSTER_YAML.replace("user: app", "user: \"  \"");
    let err = ConfigLoader::new()
        .with_environment(cluster_env())
        .load_from_str::<Cluster>(&yaml)
        .unwrap_err();
    let violation = err.violation().expect("violation");
    assert_eq!(violation.owner, "Database");
    assert_eq!(violation.field, "user");
    assert_eq!(violation.path, "pools.main.user");
    assert_eq!(violation.kind, ViolationKind::Blank);
    assert_eq!(
        err.to_string(),
        "invalid config at pools.main.user: field 'user' on 'Database' must not be blank"
    );
}

#[test]
fn empty_document_is_a_read_failure() {
    let err = ConfigLoader::new()
        .load_from_str::<SampleConfig>("# nothing configured\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::EmptyDocument { .. }));
    assert!(!err.is_validation());
}

#[test]
fn loads_from_path_with_detected_format() {
    let temp = TempDir::new().expect("tmp");
    let yaml_path = temp.path().join("conf").join("sample.yml");
    write_config(&yaml_path, VALID_SAMPLE_YAML);
    let json_path = temp.path().join("sample.json5");
    write_config(
        &json_path,
        "{ string: \"from json5\", integer: 9, bool: false }",
    );

    let loader = ConfigLoader::new();
    let yaml: SampleConfig = loader.load_from_path(&yaml_path).expect("yaml");
    assert_eq!(yaml.integer, 5);
    let json: SampleConfig = loader.load_from_path(&json_path).expect("json5");
    assert_eq!(json.string.as_deref(), Some("from json5"));
}

#[test]
fn forced_format_overrides_extension() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("sample.conf");
    write_config(&path, "{ string: \"x\", integer: 4 }");
    let config: SampleConfig = ConfigLoader::new()
        .with_format(ConfigFormat::Json5)
        .load_from_path(&path)
        .expect("config");
    assert_eq!(config.integer, 4);
}

#[test]
fn missing_file_names_source() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("absent.yml");
    let err = ConfigLoader::new()
        .load_from_path::<SampleConfig>(&path)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.yml"));
}

#[test]
fn reader_failure_is_a_read_error() {
    let err = ConfigLoader::new()
        .load_from_reader::<SampleConfig, _>(BrokenReader)
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Read { ref from, .. } if from == "input stream"
    ));
}

#[test]
fn loads_from_reader() {
    let env = MapEnvironment::new()
        .with("DB_HOST", "db.internal")
        .with("DB_PASS", "secret");
    let yaml = "driver: pg\nhost: ${DB_HOST}\ndatabase: app\nuser: svc\npassword: ${DB_PASS}\nurl: pg://${DB_HOST}\n";
    let database: Database = ConfigLoader::new()
        .with_environment(env)
        .load_from_reader(Cursor::new(yaml))
        .expect("database");
    assert_eq!(database.host.as_deref(), Some("db.internal"));
    assert_eq!(database.url.as_deref(), Some("pg://db.internal"));
}

#[test]
fn required_is_reported_before_blank() {
    let yaml = "driver: pg\ndatabase: app\nuser: svc\npassword: x\nurl: u\n";
    let err = ConfigLoader::new()
        .load_from_str::<Database>(yaml)
        .unwrap_err();
    let violation = err.violation().expect("violation");
    assert_eq!(violation.field, "host");
    assert_eq!(violation.kind, ViolationKind::Absent);
}

#[test]
fn getter_failure_is_an_access_error() {
    let err = ConfigLoader::new()
        .load_from_str::<Timeouts>("connect: soon\nlabel: \"\"\n")
        .unwrap_err();
    assert!(!err.is_validation());
    assert!(matches!(
        err,
        ConfigError::Access(AccessError::Failed {
            field: "connect",
            owner: "Timeouts",
            ..
        })
    ));

    let config: Timeouts = ConfigLoader::new()
        .load_from_str("connect: 30s\nlabel: edge\n")
        .expect("config");
    assert_eq!(config.connect, "30s");
}

#[test]
fn quoted_empty_variable_stays_present() {
    let env = MapEnvironment::new().with("DB_PASS", "");
    let template = |password: &str| {
        format!("driver: pg\nhost: h\ndatabase: d\nuser: u\npassword: {password}\nurl: pg://h\n")
    };
    let loader = ConfigLoader::new().with_environment(env);

    let database: Database = loader
        .load_from_str(&template("\"${DB_PASS}\""))
        .expect("database");
    assert_eq!(database.password.as_deref(), Some(""));

    let err = loader
        .load_from_str::<Database>(&template("${DB_PASS}"))
        .unwrap_err();
    let violation = err.violation().expect("violation");
    assert_eq!(violation.field, "password");
    assert_eq!(violation.kind, ViolationKind::Absent);
}
