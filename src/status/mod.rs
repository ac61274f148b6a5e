//! Live status reporting subsystem.
//!
//! Workers publish keyed [`StatusUpdate`]s through the [`StatusSink`] trait;
//! the terminal [`StatusBoard`] is the production sink. The sink is the only
//! resource shared between workers, and writes to different keys never
//! conflict.

pub mod board;
pub mod format;
pub mod types;

pub use board::StatusBoard;
pub use types::{StatusSink, StatusUpdate};
