//! Fixed delays of the claim cycle.
//!
//! All retry delays are deliberately flat: a claim that keeps failing is
//! retried at the same 5-second interval forever, with no growth and no cap.

use std::time::Duration;

/// Pause between failed claim submissions.
pub const CLAIM_RETRY_DELAY: Duration = Duration::from_secs(5);

/// How long the "Claimed" text stays on the board before removal.
pub const CLAIMED_LINGER: Duration = Duration::from_secs(5);

/// Pause before restarting the outer cycle after a failure.
pub const OUTER_ERROR_DELAY: Duration = Duration::from_secs(5);

/// Grace buffer added to every cooldown.
pub const COOLDOWN_GRACE: Duration = Duration::from_secs(300);

/// Cooldown after a successful claim: the configured hours plus a fixed
/// five-minute grace buffer.
pub fn cooldown_duration(cooldown_hours: f64) -> Duration {
    Duration::from_secs_f64(cooldown_hours.max(0.0) * 3600.0) + COOLDOWN_GRACE
}
