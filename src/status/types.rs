//! Status sink contract.

/// One keyed status message. The newest update for a key fully supersedes
/// every earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Multi-line display text.
    pub text: String,

    /// Whether the entry is still active (spinner running).
    pub active: bool,

    /// Request the entry be hidden once its current text has been shown.
    pub removed: bool,
}

impl StatusUpdate {
    /// An active, visible update.
    pub fn active(text: String) -> Self {
        Self {
            text,
            active: true,
            removed: false,
        }
    }

    /// A final update that marks the entry for removal.
    pub fn removed(text: String) -> Self {
        Self {
            text,
            active: false,
            removed: true,
        }
    }
}

/// Display surface for per-account status, keyed by account id.
///
/// Implementations must support concurrent writes from independent workers;
/// writes to different keys never conflict.
pub trait StatusSink: Send + Sync {
    fn put(&self, key: &str, update: StatusUpdate);
}
