//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! The `[simulation]` section deserializes straight into the domain's
//! [`RoundPolicy`], so a partial section overlays the defaults.

use classroom_domain::RoundPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How severe a configuration problem is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The config is usable but something looks wrong
    Warning,
    /// The config cannot drive a simulation
    Error,
}

/// One problem detected while validating a loaded config
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Chat-completions capability settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Model name sent with every request.
    pub model: String,
    /// API root; `/chat/completions` is appended.
    pub base_url: String,
    /// Name of the environment variable holding the API key. The key
    /// itself never lives in the config file.
    pub api_key_env: String,
    /// Per-request deadline in seconds.
    pub timeout_secs: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Storage paths
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Session store directory; platform data dir when absent.
    pub sessions_dir: Option<PathBuf>,
    /// JSONL transcript path; transcript disabled when absent.
    pub transcript: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat-completions capability settings
    pub llm: FileLlmConfig,
    /// Round-processing constants; overlays the built-in defaults
    pub simulation: RoundPolicy,
    /// Storage paths
    pub storage: FileStorageConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.llm.model.trim().is_empty() {
            issues.push(ConfigIssue::error("llm.model", "model name is empty"));
        }
        if self.llm.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error("llm.base_url", "base URL is empty"));
        }
        if self.llm.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "llm.api_key_env",
                "no environment variable named for the API key",
            ));
        }
        if self.llm.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                "llm.timeout_secs",
                "a zero timeout fails every request immediately",
            ));
        }

        if self.simulation.simulate_cap == 0 {
            issues.push(ConfigIssue::warning(
                "simulation.simulate_cap",
                "cap of 0 means no student ever reacts",
            ));
        }
        if self.simulation.frustration_rounds == 0 {
            issues.push(ConfigIssue::warning(
                "simulation.frustration_rounds",
                "0 escalates every ignored hand on its first idle round",
            ));
        }
        if self.simulation.max_delta < 0.0 {
            issues.push(ConfigIssue::error(
                "simulation.max_delta",
                "delta bound must be non-negative",
            ));
        }
        if self.simulation.idle_attention_decay < 0.0 {
            issues.push(ConfigIssue::error(
                "simulation.idle_attention_decay",
                "decay must be non-negative",
            ));
        }

        issues
    }

    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}
