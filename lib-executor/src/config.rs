//! Executor configuration

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::context::DEFAULT_MAX_CALL_DEPTH;

/// Default maximum method-name length accepted by the executor
pub const DEFAULT_MAX_METHOD_LEN: usize = 64;

/// Runtime knobs for [`ContractExecutor`](crate::ContractExecutor)
///
/// ```toml
/// max_call_depth = 10
/// record_logs = true
/// max_method_len = 64
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Maximum nesting of delegate calls
    #[serde(default = "default_max_call_depth")]
    pub max_call_depth: u32,
    /// Keep contract logs of committed transactions
    #[serde(default = "default_record_logs")]
    pub record_logs: bool,
    /// Longest accepted method name
    #[serde(default = "default_max_method_len")]
    pub max_method_len: usize,
}

fn default_max_call_depth() -> u32 {
    DEFAULT_MAX_CALL_DEPTH
}

fn default_record_logs() -> bool {
    true
}

fn default_max_method_len() -> usize {
    DEFAULT_MAX_METHOD_LEN
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_call_depth: default_max_call_depth(),
            record_logs: default_record_logs(),
            max_method_len: default_max_method_len(),
        }
    }
}

impl ExecutorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ExecutorConfig =
            toml::from_str(content).context("Failed to parse executor config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            max_call_depth = config.max_call_depth,
            "Loaded executor config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_call_depth == 0 {
            bail!("max_call_depth must be at least 1 so the front door can forward");
        }
        if self.max_method_len == 0 {
            bail!("max_method_len must be greater than 0");
        }
        Ok(())
    }
}
