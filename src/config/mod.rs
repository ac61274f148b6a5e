//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)            accounts file (id|secret|hours lines)
//!     → loader.rs (parse)           → loader.rs (parse & validate lines)
//!     → validation.rs (checks)      → Vec<AccountCredential>
//!     → ClaimerConfig (immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so a minimal config works
//! - Credential parsing is confined here; the scheduler only ever sees
//!   already-validated `AccountCredential` values

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_accounts, load_config, ConfigError};
pub use schema::{AccountCredential, BoardConfig, ClaimerConfig, ContractConfig, RpcConfig};
