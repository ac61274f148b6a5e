//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees syntactically.
//! Returns all violations, not just the first, so a bad config can be fixed
//! in one pass.

use std::fmt;

use crate::config::schema::ClaimerConfig;

/// A single semantic violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ClaimerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.rpc.url.parse::<url::Url>().is_err() {
        errors.push(ValidationError {
            field: "rpc.url".into(),
            message: format!("'{}' is not a valid URL", config.rpc.url),
        });
    }
    for (i, url) in config.rpc.failover_urls.iter().enumerate() {
        if url.parse::<url::Url>().is_err() {
            errors.push(ValidationError {
                field: format!("rpc.failover_urls[{}]", i),
                message: format!("'{}' is not a valid URL", url),
            });
        }
    }
    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "rpc.timeout_secs".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.contract.account_id.is_empty() {
        errors.push(ValidationError {
            field: "contract.account_id".into(),
            message: "must not be empty".into(),
        });
    }
    if config.contract.method.is_empty() {
        errors.push(ValidationError {
            field: "contract.method".into(),
            message: "must not be empty".into(),
        });
    }
    if config.contract.gas == 0 {
        errors.push(ValidationError {
            field: "contract.gas".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.board.refresh_ms == 0 {
        errors.push(ValidationError {
            field: "board.refresh_ms".into(),
            message: "must be greater than zero".into(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
