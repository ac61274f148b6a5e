//! NEAR chain integration subsystem.
//!
//! # Data Flow
//! ```text
//! accounts file (id|secret|hours)
//!     → key.rs (ed25519 key parsing, signing)
//!     → account.rs (per-worker authenticated handle)
//!     → transaction.rs (borsh build + sign)
//!     → rpc.rs (JSON-RPC with timeouts and failover)
//! ```
//!
//! # Security Constraints
//! - Secret keys come only from the accounts file
//! - Never log secret keys; `Debug` impls redact them
//! - All RPC calls have a configurable timeout
//! - Handles are per-account and never shared across workers

pub mod account;
pub mod key;
pub mod rpc;
pub mod transaction;
pub mod types;

pub use account::{AccountClient, AuthFailed, NearAccount};
pub use rpc::NearRpcClient;
pub use types::{ChainError, ChainResult, ClaimOutcome, NearAmount};
