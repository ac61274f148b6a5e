//! Per-account claim state machine.
//!
//! One worker per account, driving an unending cycle of balance check,
//! claim submission with unlimited retry, status reporting, and cooldown.
//! No failure is ever fatal: submission errors are retried in place, and
//! anything else restarts the outer cycle after a short pause.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::time::sleep;

use crate::blockchain::account::AccountClient;
use crate::blockchain::types::{ChainResult, NearAmount};
use crate::config::AccountCredential;
use crate::scheduler::timing::{
    cooldown_duration, CLAIMED_LINGER, CLAIM_RETRY_DELAY, OUTER_ERROR_DELAY,
};
use crate::status::format;
use crate::status::types::{StatusSink, StatusUpdate};

/// Phase of the claim cycle a worker is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pending work; initial state.
    Idle,
    /// Fetching the account balance for this cycle.
    CheckingBalance,
    /// Submitting one claim transaction.
    Claiming,
    /// Waiting out the fixed delay before resubmitting.
    ClaimRetry,
    /// Claim accepted; success text lingering on the board.
    Claimed,
    /// Waiting out the configured cooldown.
    Cooldown,
    /// An outer-cycle failure was reported; restarting shortly.
    OuterError,
}

/// Mutable per-account record. Exclusively owned by the worker; never
/// shared.
#[derive(Debug)]
pub struct WorkerState {
    pub phase: Phase,
    /// Balance fetched at the start of the current cycle, reused verbatim in
    /// every status text until the next cycle.
    pub last_balance: Option<NearAmount>,
    /// Cleared on any successful transition.
    pub last_error: Option<String>,
}

impl WorkerState {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            last_balance: None,
            last_error: None,
        }
    }
}

/// The per-account claim scheduler.
pub struct ClaimWorker {
    credential: AccountCredential,
    client: Arc<dyn AccountClient>,
    sink: Arc<dyn StatusSink>,
    state: WorkerState,
}

impl ClaimWorker {
    pub fn new(
        credential: AccountCredential,
        client: Arc<dyn AccountClient>,
        sink: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            credential,
            client,
            sink,
            state: WorkerState::new(),
        }
    }

    pub fn state(&self) -> &WorkerState {
        &self.state
    }

    /// Run until the shutdown signal fires. Without one, the worker never
    /// stops on its own.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        let account = self.credential.account_id.clone();
        tokio::select! {
            _ = self.drive() => {}
            _ = shutdown.recv() => {
                tracing::debug!(account = %account, "claim worker received shutdown signal, exiting");
            }
        }
    }

    /// The unending outer loop: every failed cycle is reported and restarted
    /// after a fixed pause.
    async fn drive(&mut self) {
        loop {
            if let Err(err) = self.run_cycle().await {
                self.state.phase = Phase::OuterError;
                self.state.last_error = Some(err.to_string());
                tracing::warn!(
                    account = %self.credential.account_id,
                    error = %err,
                    "outer cycle failed, restarting"
                );
                self.sink.put(
                    &self.credential.account_id,
                    StatusUpdate::active(format::outer_error(&self.credential.account_id, &err)),
                );
                sleep(OUTER_ERROR_DELAY).await;
            }
        }
    }

    /// One outer cycle: balance check, claim with unlimited retry, linger,
    /// cooldown. Public so tests can drive cycles directly.
    pub async fn run_cycle(&mut self) -> ChainResult<()> {
        let account = self.credential.account_id.clone();

        self.state.phase = Phase::CheckingBalance;
        let balance = self.client.balance().await?;
        self.state.last_balance = Some(balance);
        self.state.last_error = None;

        self.state.phase = Phase::Claiming;
        self.sink
            .put(&account, StatusUpdate::active(format::claiming(&account, balance)));

        let outcome = loop {
            match self.client.submit_claim().await {
                Ok(outcome) => break outcome,
                Err(err) => {
                    self.state.phase = Phase::ClaimRetry;
                    self.state.last_error = Some(err.to_string());
                    tracing::warn!(
                        account = %account,
                        error = %err,
                        "claim submission failed, retrying"
                    );
                    self.sink.put(
                        &account,
                        StatusUpdate::active(format::claim_retry(&account, balance, &err)),
                    );
                    sleep(CLAIM_RETRY_DELAY).await;
                    self.state.phase = Phase::Claiming;
                }
            }
        };

        self.state.phase = Phase::Claimed;
        self.state.last_error = None;
        tracing::info!(
            account = %account,
            tx_hash = %outcome.tx_hash,
            "claim accepted"
        );
        let claimed_text = format::claimed(&account, balance, &outcome.tx_hash);
        self.sink
            .put(&account, StatusUpdate::active(claimed_text.clone()));
        sleep(CLAIMED_LINGER).await;
        self.sink.put(&account, StatusUpdate::removed(claimed_text));

        self.state.phase = Phase::Cooldown;
        self.sink.put(
            &account,
            StatusUpdate::active(format::cooldown(
                &account,
                balance,
                self.credential.cooldown_hours,
            )),
        );
        sleep(cooldown_duration(self.credential.cooldown_hours)).await;

        Ok(())
    }
}
