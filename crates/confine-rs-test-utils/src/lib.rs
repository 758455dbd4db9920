//! Test fixtures shared across confine-rs crates.

pub mod cluster;
pub mod database;
pub mod sample;

pub use cluster::{Cluster, LogLevel, Server, valid_cluster};
pub use database::{Database, valid_database};
pub use sample::{INVALID_SAMPLE_YAML, SampleConfig, VALID_SAMPLE_YAML};

use std::fs;
use std::path::Path;

/// Write config contents to a path, creating parent directories if needed.
pub fn write_config(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}
