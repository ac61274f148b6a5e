//! Worker supervision.
//!
//! Spawns one independent task per account and intentionally never joins
//! them: workers have no terminal state, so the process stays alive because
//! their suspension points keep the tasks pending. Workers share nothing
//! except the status sink.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::blockchain::account::AccountClient;
use crate::config::AccountCredential;
use crate::lifecycle::Shutdown;
use crate::scheduler::worker::ClaimWorker;
use crate::status::types::StatusSink;

/// Supervisor over the fleet of claim workers.
pub struct WorkerSupervisor {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerSupervisor {
    /// Spawn one worker per credential, fully concurrently.
    ///
    /// `make_client` builds the per-account chain handle; each worker gets
    /// its own, so no connection is ever shared across workers. A panic in
    /// one worker's task cannot reach any other worker or the supervisor.
    pub fn spawn<F>(
        accounts: Vec<AccountCredential>,
        sink: Arc<dyn StatusSink>,
        shutdown: &Shutdown,
        make_client: F,
    ) -> Self
    where
        F: Fn(&AccountCredential) -> Arc<dyn AccountClient>,
    {
        let handles = accounts
            .into_iter()
            .map(|credential| {
                let client = make_client(&credential);
                let worker = ClaimWorker::new(credential, client, sink.clone());
                tokio::spawn(worker.run(shutdown.subscribe()))
            })
            .collect::<Vec<_>>();

        tracing::info!(workers = handles.len(), "claim workers spawned");
        Self { handles }
    }

    /// Number of workers spawned. Exactly one per configured account.
    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }
}
