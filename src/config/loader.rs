//! Configuration and accounts-file loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{AccountCredential, ClaimerConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid account entry on line {line}: {reason}")]
    Account { line: usize, reason: String },

    #[error("validation failed: {}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate the TOML configuration file.
pub fn load_config(path: &Path) -> Result<ClaimerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: ClaimerConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the delimited accounts file.
///
/// One `accountId|secretKey|cooldownHours` entry per line; blank lines and
/// lines starting with `#` are skipped. Line order defines display order.
pub fn load_accounts(path: &Path) -> Result<Vec<AccountCredential>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut accounts = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        accounts.push(parse_account_line(line, idx + 1)?);
    }
    Ok(accounts)
}

fn parse_account_line(line: &str, line_no: usize) -> Result<AccountCredential, ConfigError> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(ConfigError::Account {
            line: line_no,
            reason: format!("expected 3 '|'-delimited fields, got {}", fields.len()),
        });
    }

    let account_id = fields[0];
    if account_id.is_empty() {
        return Err(ConfigError::Account {
            line: line_no,
            reason: "account id is empty".into(),
        });
    }
    if fields[1].is_empty() {
        return Err(ConfigError::Account {
            line: line_no,
            reason: "secret key is empty".into(),
        });
    }

    let cooldown_hours: f64 = fields[2].parse().map_err(|_| ConfigError::Account {
        line: line_no,
        reason: format!("cooldown hours '{}' is not a number", fields[2]),
    })?;
    if !cooldown_hours.is_finite() || cooldown_hours < 0.0 {
        return Err(ConfigError::Account {
            line: line_no,
            reason: format!("cooldown hours must be non-negative, got {}", fields[2]),
        });
    }

    Ok(AccountCredential {
        account_id: account_id.to_string(),
        secret_key: fields[1].to_string(),
        cooldown_hours,
    })
}
