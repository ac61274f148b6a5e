//! Claim scheduling subsystem.
//!
//! # Data Flow
//! ```text
//! Vec<AccountCredential>
//!     → supervisor.rs (one task per account, never joined)
//!     → worker.rs (balance → claim(+retries) → cooldown, forever)
//!     → timing.rs (fixed delays, cooldown arithmetic)
//! ```
//!
//! # Design Decisions
//! - Explicit per-account state machine instead of nested retry recursion
//! - Every wait is a plain `tokio::time::sleep`; no locks held across them
//! - Workers never stop on their own; shutdown is the only exit

pub mod supervisor;
pub mod timing;
pub mod worker;

pub use supervisor::WorkerSupervisor;
pub use worker::{ClaimWorker, Phase, WorkerState};
