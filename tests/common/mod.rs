//! Shared doubles for scheduler integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use hot_claimer::blockchain::account::AccountClient;
use hot_claimer::blockchain::types::{ChainError, ChainResult, ClaimOutcome, NearAmount};
use hot_claimer::status::{StatusSink, StatusUpdate};

/// One recorded `put`, timestamped with the (virtual) clock.
#[derive(Debug, Clone)]
pub struct RecordedUpdate {
    pub key: String,
    pub update: StatusUpdate,
    pub at: Instant,
}

/// Status sink that records every update in arrival order.
pub struct RecordingSink {
    events: Mutex<Vec<RecordedUpdate>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn snapshot(&self) -> Vec<RecordedUpdate> {
        self.events.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn events_for(&self, key: &str) -> Vec<RecordedUpdate> {
        self.snapshot()
            .into_iter()
            .filter(|e| e.key == key)
            .collect()
    }
}

impl StatusSink for RecordingSink {
    fn put(&self, key: &str, update: StatusUpdate) {
        self.events.lock().unwrap().push(RecordedUpdate {
            key: key.to_string(),
            update,
            at: Instant::now(),
        });
    }
}

/// Chain client that replays scripted results, then parks forever once the
/// script runs out. Parking freezes the worker at its next chain call, which
/// keeps test timelines finite.
pub struct ScriptedClient {
    balances: Mutex<VecDeque<ChainResult<NearAmount>>>,
    claims: Mutex<VecDeque<ChainResult<ClaimOutcome>>>,
    pub balance_calls: AtomicUsize,
    pub claim_calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(
        balances: Vec<ChainResult<NearAmount>>,
        claims: Vec<ChainResult<ClaimOutcome>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            balances: Mutex::new(balances.into()),
            claims: Mutex::new(claims.into()),
            balance_calls: AtomicUsize::new(0),
            claim_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl AccountClient for ScriptedClient {
    async fn balance(&self) -> ChainResult<NearAmount> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.balances.lock().unwrap().pop_front();
        match next {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }

    async fn submit_claim(&self) -> ChainResult<ClaimOutcome> {
        self.claim_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.claims.lock().unwrap().pop_front();
        match next {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }
}

/// Client whose claim submissions always fail.
#[allow(dead_code)]
pub struct FailingClaims {
    balance: NearAmount,
}

#[allow(dead_code)]
impl FailingClaims {
    pub fn new(balance: NearAmount) -> Arc<Self> {
        Arc::new(Self { balance })
    }
}

#[async_trait]
impl AccountClient for FailingClaims {
    async fn balance(&self) -> ChainResult<NearAmount> {
        Ok(self.balance)
    }

    async fn submit_claim(&self) -> ChainResult<ClaimOutcome> {
        Err(ChainError::Rpc("injected failure".into()))
    }
}

/// Client whose claim submissions always succeed with a fixed hash.
#[allow(dead_code)]
pub struct SucceedingClaims {
    balance: NearAmount,
    tx_hash: String,
}

#[allow(dead_code)]
impl SucceedingClaims {
    pub fn new(balance: NearAmount, tx_hash: &str) -> Arc<Self> {
        Arc::new(Self {
            balance,
            tx_hash: tx_hash.to_string(),
        })
    }
}

#[async_trait]
impl AccountClient for SucceedingClaims {
    async fn balance(&self) -> ChainResult<NearAmount> {
        Ok(self.balance)
    }

    async fn submit_claim(&self) -> ChainResult<ClaimOutcome> {
        Ok(ClaimOutcome {
            tx_hash: self.tx_hash.clone(),
        })
    }
}
