//! Claim worker state machine tests.
//!
//! Run on a paused tokio clock: sleeps auto-advance, and the recorded
//! timestamps reflect virtual time, so delay spacing can be asserted
//! exactly.

use std::sync::atomic::Ordering;
use std::time::Duration;

use hot_claimer::blockchain::types::{ChainError, ClaimOutcome, NearAmount, YOCTO_PER_NEAR};
use hot_claimer::config::AccountCredential;
use hot_claimer::lifecycle::Shutdown;
use hot_claimer::scheduler::ClaimWorker;

mod common;
use common::{RecordingSink, ScriptedClient};

fn credential(account_id: &str, cooldown_hours: f64) -> AccountCredential {
    AccountCredential {
        account_id: account_id.to_string(),
        secret_key: "ed25519:unused".to_string(),
        cooldown_hours,
    }
}

fn near(whole: u128) -> NearAmount {
    NearAmount(whole * YOCTO_PER_NEAR)
}

fn claimed(tx_hash: &str) -> ClaimOutcome {
    ClaimOutcome {
        tx_hash: tx_hash.to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_first_try_claim_sequence() {
    let sink = RecordingSink::new();
    let client = ScriptedClient::new(vec![Ok(near(10))], vec![Ok(claimed("abc123"))]);
    let shutdown = Shutdown::new();
    let worker = ClaimWorker::new(credential("alice.near", 2.0), client.clone(), sink.clone());
    tokio::spawn(worker.run(shutdown.subscribe()));

    tokio::time::sleep(Duration::from_secs(8000)).await;

    let events = sink.snapshot();
    assert_eq!(events.len(), 4, "claiming, claimed, removed, cooldown");
    assert!(events[0].update.text.contains("Claiming"));
    assert!(events[1].update.text.contains("Claimed abc123"));
    assert!(events[2].update.removed);
    assert!(events[3].update.text.contains("Mining for 2 Hours 5 Minutes"));

    // claimed text lingers 5 seconds before removal; cooldown text follows
    // immediately
    assert_eq!(events[2].at - events[1].at, Duration::from_secs(5));
    assert_eq!(events[3].at, events[2].at);

    // cooldown of 2h + 5min grace before the next balance check
    assert_eq!(client.balance_calls.load(Ordering::SeqCst), 2);
    assert_eq!(client.claim_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_three_failures_then_success() {
    let sink = RecordingSink::new();
    let client = ScriptedClient::new(
        vec![Ok(near(10))],
        vec![
            Err(ChainError::Rpc("connection reset".into())),
            Err(ChainError::Rpc("connection reset".into())),
            Err(ChainError::Rpc("connection reset".into())),
            Ok(claimed("abc123")),
        ],
    );
    let shutdown = Shutdown::new();
    let worker = ClaimWorker::new(credential("alice.near", 1.0), client.clone(), sink.clone());
    tokio::spawn(worker.run(shutdown.subscribe()));

    tokio::time::sleep(Duration::from_secs(60)).await;

    let events = sink.snapshot();
    let retries: Vec<_> = events
        .iter()
        .filter(|e| e.update.text.contains("connection reset"))
        .collect();
    let claims: Vec<_> = events
        .iter()
        .filter(|e| e.update.text.contains("Claimed abc123") && !e.update.removed)
        .collect();

    assert_eq!(retries.len(), 3, "exactly one retry update per failure");
    assert_eq!(claims.len(), 1, "exactly one claimed update");

    // fixed 5-second spacing, no backoff growth
    assert_eq!(retries[1].at - retries[0].at, Duration::from_secs(5));
    assert_eq!(retries[2].at - retries[1].at, Duration::from_secs(5));
    assert_eq!(claims[0].at - retries[2].at, Duration::from_secs(5));

    // stale-by-design: every retry shows the balance fetched at cycle start
    for retry in &retries {
        assert!(retry.update.text.contains("Near Balance : 10"));
    }
    assert_eq!(client.balance_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_full_cycle_timeline() {
    // balance 10, first submission fails, second succeeds; cooldown 2 hours
    // means a 7500 second suspension before the next balance check
    let sink = RecordingSink::new();
    let client = ScriptedClient::new(
        vec![Ok(near(10)), Ok(near(12))],
        vec![
            Err(ChainError::Rpc("network unreachable".into())),
            Ok(claimed("abc123")),
        ],
    );
    let shutdown = Shutdown::new();
    let worker = ClaimWorker::new(credential("alice.near", 2.0), client.clone(), sink.clone());
    tokio::spawn(worker.run(shutdown.subscribe()));

    tokio::time::sleep(Duration::from_secs(9000)).await;

    let events = sink.snapshot();
    assert_eq!(events.len(), 6);
    assert!(events[0].update.text.contains("Claiming"));
    assert!(events[0].update.text.contains("Near Balance : 10"));
    assert!(events[1].update.text.contains("network unreachable"));
    assert!(events[2].update.text.contains("Claimed abc123"));
    assert!(events[3].update.removed);
    assert!(events[4].update.text.contains("Mining for 2 Hours 5 Minutes"));
    // next cycle starts after exactly 2 * 3600 + 300 seconds and shows the
    // freshly fetched balance
    assert!(events[5].update.text.contains("Near Balance : 12"));
    assert_eq!(events[5].at - events[4].at, Duration::from_secs(7500));
}

#[tokio::test(start_paused = true)]
async fn test_balance_failure_restarts_outer_cycle() {
    let sink = RecordingSink::new();
    let client = ScriptedClient::new(
        vec![Err(ChainError::Auth("bad credentials".into())), Ok(near(5))],
        vec![],
    );
    let shutdown = Shutdown::new();
    let worker = ClaimWorker::new(credential("alice.near", 1.0), client.clone(), sink.clone());
    tokio::spawn(worker.run(shutdown.subscribe()));

    tokio::time::sleep(Duration::from_secs(60)).await;

    let events = sink.snapshot();
    assert_eq!(events.len(), 2);
    assert!(events[0].update.text.contains("auth error: bad credentials"));
    assert!(events[1].update.text.contains("Claiming"));
    // 5 second pause before the cycle restarts from the balance check
    assert_eq!(events[1].at - events[0].at, Duration::from_secs(5));

    assert_eq!(client.balance_calls.load(Ordering::SeqCst), 2);
    // the claim attempt after the restart parks on the exhausted script
    assert_eq!(client.claim_calls.load(Ordering::SeqCst), 1);
}
