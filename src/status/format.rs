//! Status text formatting.
//!
//! One function per worker transition. Every text repeats the account id and
//! the balance fetched at the start of the current cycle; the balance is
//! deliberately not re-queried between retries.

use crate::blockchain::types::{ChainError, NearAmount};

pub fn claiming(account_id: &str, balance: NearAmount) -> String {
    format!(
        "Account ID : {}\nNear Balance : {}\nStatus : Claiming...",
        account_id, balance
    )
}

pub fn claim_retry(account_id: &str, balance: NearAmount, error: &ChainError) -> String {
    format!(
        "Account ID : {}\nNear Balance : {}\nStatus : {}...",
        account_id, balance, error
    )
}

pub fn claimed(account_id: &str, balance: NearAmount, tx_hash: &str) -> String {
    format!(
        "Account ID : {}\nNear Balance : {}\nStatus : Claimed {}...",
        account_id, balance, tx_hash
    )
}

pub fn cooldown(account_id: &str, balance: NearAmount, hours: f64) -> String {
    format!(
        "Account ID : {}\nNear Balance : {}\nStatus : Mining for {} Hours 5 Minutes...",
        account_id, balance, hours
    )
}

pub fn outer_error(account_id: &str, error: &ChainError) -> String {
    format!("Account ID : {}\nStatus : {}...", account_id, error)
}
