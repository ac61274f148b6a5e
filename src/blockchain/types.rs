//! Chain-specific types and error definitions.

use std::fmt;

use thiserror::Error;

/// Yocto-NEAR per whole NEAR (10^24).
pub const YOCTO_PER_NEAR: u128 = 1_000_000_000_000_000_000_000_000;

/// An account balance in yoctoNEAR.
///
/// Displays as whole NEAR with the fractional part trimmed, which is the
/// denomination shown on the status board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NearAmount(pub u128);

impl NearAmount {
    /// Raw yoctoNEAR value.
    pub fn yocto(&self) -> u128 {
        self.0
    }
}

impl From<u128> for NearAmount {
    fn from(yocto: u128) -> Self {
        Self(yocto)
    }
}

impl fmt::Display for NearAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / YOCTO_PER_NEAR;
        let frac = self.0 % YOCTO_PER_NEAR;
        if frac == 0 {
            write!(f, "{}", whole)
        } else {
            let digits = format!("{:024}", frac);
            write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
        }
    }
}

/// Outcome of one accepted claim submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOutcome {
    /// Base58 transaction hash reported by the RPC node.
    pub tx_hash: String,
}

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Credential or connection setup failure.
    #[error("auth error: {0}")]
    Auth(String),

    /// Transient network or provider failure.
    #[error("rpc error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("rpc timeout after {0} seconds")]
    Timeout(u64),

    /// The on-chain call was rejected.
    #[error("contract call rejected: {0}")]
    Contract(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
