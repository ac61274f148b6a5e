//! HOT claim scheduler library.

pub mod blockchain;
pub mod config;
pub mod lifecycle;
pub mod scheduler;
pub mod status;

pub use blockchain::{AccountClient, ChainError, ChainResult, ClaimOutcome, NearAmount};
pub use config::{AccountCredential, ClaimerConfig};
pub use lifecycle::Shutdown;
pub use scheduler::{ClaimWorker, WorkerSupervisor};
pub use status::{StatusBoard, StatusSink, StatusUpdate};
