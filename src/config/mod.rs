//! Configuration for the experience engine.
//!
//! The engine ships complete built-in defaults; a TOML file may replace any
//! section. Environment variables in the format `${VAR_NAME}` are expanded
//! before parsing.
//!
//! # Example
//!
//! ```toml
//! [roles]
//! mapping = { "fsm-admins" = "ADMIN" }
//!
//! [experiences.seller]
//! default_route = "/sales"
//! allowed_patterns = ["/sales", "/sales/*", "/offers/*"]
//! ```
//!
//! Note that the experience table must stay exhaustive: overriding one
//! experience means supplying all of them, and a missing entry fails engine
//! construction rather than a later lookup.

mod experiences;
mod roles;

use std::{collections::BTreeMap, path::Path};

pub use experiences::{ExperienceConfig, HeaderOptions, NavigationItem};
use once_cell::sync::Lazy;
use regex::Regex;
pub use roles::{RoleRule, RolesConfig};
use serde::{Deserialize, Serialize};

use crate::experience::Experience;

/// Root configuration for the experience engine.
///
/// All sections are optional with complete defaults, so an empty string — or
/// no configuration file at all — yields the stock engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConcourseConfig {
    /// Role classification rules.
    #[serde(default)]
    pub roles: RolesConfig,

    /// Per-experience configuration. Must cover every experience.
    #[serde(default = "experiences::default_experiences")]
    pub experiences: BTreeMap<Experience, ExperienceConfig>,

    /// Decision audit logging.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for ConcourseConfig {
    fn default() -> Self {
        Self {
            roles: RolesConfig::default(),
            experiences: experiences::default_experiences(),
            audit: AuditConfig::default(),
        }
    }
}

impl ConcourseConfig {
    /// Load configuration from a TOML file.
    ///
    /// Environment variables in the format `${VAR_NAME}` are expanded.
    /// Missing required variables will cause an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e, path.as_ref().to_path_buf()))?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(contents)?;

        let config: ConcourseConfig = toml::from_str(&expanded).map_err(ConfigError::Parse)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration for consistency and completeness.
    fn validate(&self) -> Result<(), ConfigError> {
        self.roles.validate()?;
        for (experience, config) in &self.experiences {
            config.validate(*experience)?;
        }
        Ok(())
    }
}

/// Configuration for authorization decision audit logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Log allowed authorization decisions.
    /// Defaults to false (only denied decisions are logged).
    #[serde(default)]
    pub log_allowed: bool,

    /// Log denied authorization decisions.
    /// Defaults to true for security monitoring.
    #[serde(default = "default_true")]
    pub log_denied: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_allowed: false,
            log_denied: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {1}: {0}")]
    Io(std::io::Error, std::path::PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid expression"));

/// Expand `${VAR_NAME}` references, skipping occurrences inside comments.
fn expand_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(input.len());

    for line in input.lines() {
        // Find if there's a comment on this line
        let comment_pos = line.find('#');

        // Process the line, only expanding variables that appear before any comment
        let mut line_result = String::with_capacity(line.len());
        let mut last_end = 0;

        for cap in ENV_VAR.captures_iter(line) {
            let whole = cap.get(0).expect("capture 0 always present");

            // Skip if this variable is inside a comment
            if let Some(pos) = comment_pos
                && whole.start() >= pos
            {
                continue;
            }

            // Add text before this match
            line_result.push_str(&line[last_end..whole.start()]);

            // Expand the variable
            let var_name = &cap[1];
            let value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;
            line_result.push_str(&value);

            last_end = whole.end();
        }

        // Add remaining text after last match
        line_result.push_str(&line[last_end..]);
        result.push_str(&line_result);
        result.push('\n');
    }

    // Remove trailing newline if input didn't have one
    if !input.ends_with('\n') {
        result.pop();
    }

    Ok(result)
}
