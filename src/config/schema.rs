//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file, and every field has a default so a minimal (or missing) config
//! still produces a runnable setup.

use serde::{Deserialize, Serialize};

/// Root configuration for the claimer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClaimerConfig {
    /// RPC endpoint settings.
    pub rpc: RpcConfig,

    /// Target contract settings.
    pub contract: ContractConfig,

    /// Status board settings.
    pub board: BoardConfig,

    /// Path to the accounts file (`accountId|secretKey|cooldownHours` lines).
    pub accounts_file: String,
}

impl Default for ClaimerConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            contract: ContractConfig::default(),
            board: BoardConfig::default(),
            accounts_file: "accounts.txt".to_string(),
        }
    }
}

/// NEAR RPC endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Primary JSON-RPC endpoint.
    pub url: String,

    /// Endpoints tried in order when the primary fails at transport level.
    pub failover_urls: Vec<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://rpc.mainnet.near.org".to_string(),
            failover_urls: Vec::new(),
            timeout_secs: 10,
        }
    }
}

/// The contract every account claims against.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Contract account id.
    pub account_id: String,

    /// Method invoked on each claim.
    pub method: String,

    /// Gas attached to each claim call.
    pub gas: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            account_id: "game.hot.tg".to_string(),
            method: "claim".to_string(),
            gas: 30_000_000_000_000,
        }
    }
}

/// Terminal status board configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Repaint interval in milliseconds.
    pub refresh_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { refresh_ms: 250 }
    }
}

/// One validated account entry. Immutable once parsed; owned exclusively by
/// its claim worker for the life of the process.
#[derive(Clone, PartialEq)]
pub struct AccountCredential {
    /// NEAR account id, also the status board key.
    pub account_id: String,

    /// Secret key in `ed25519:<base58>` format. Opaque to the scheduler.
    pub secret_key: String,

    /// Hours to wait after a successful claim before the next cycle.
    pub cooldown_hours: f64,
}

impl std::fmt::Debug for AccountCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountCredential")
            .field("account_id", &self.account_id)
            .field("secret_key", &"<redacted>")
            .field("cooldown_hours", &self.cooldown_hours)
            .finish()
    }
}
