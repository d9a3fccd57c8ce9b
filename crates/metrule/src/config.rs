// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles metrule.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys.
const KNOWN_KEYS: &[&str] = &["version", "metrics", "traversal"];

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
    #[serde(flatten)]
    rest: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Metric merge configuration.
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Traversal configuration.
    #[serde(default)]
    pub traversal: TraversalConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            metrics: MetricsConfig::default(),
            traversal: TraversalConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MetricsConfig {
    /// What to do when two analyzers report the same metric for one node.
    #[serde(default)]
    pub collisions: CollisionPolicy,
}

/// Handling of duplicate metric names across analyzers.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Later-registered analyzer wins (default).
    #[default]
    Overwrite,
    /// Fail the run.
    Reject,
    /// Store every metric as `<analyzer>.<metric>`.
    Namespace,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TraversalConfig {
    #[serde(default)]
    pub mode: TraversalMode,
}

/// How root nodes are traversed.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TraversalMode {
    /// One root after another on the calling thread (default).
    #[default]
    Sequential,
    /// Roots in parallel; violations are still reported in root order.
    Parallel,
}

/// Load config from a file.
pub fn load(path: &Path) -> Result<Config> {
    tracing::debug!("loading config from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    // First check version
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    for key in version_check.rest.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            tracing::warn!(
                "{}: unrecognized field `{}` (ignored)",
                path.display(),
                key
            );
        }
    }

    toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
