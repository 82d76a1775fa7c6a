//! The dispatch bus: the single-writer guarantee in deployable form.
//!
//! One tokio task owns the store. Hosts queue commands through a
//! `StoreHandle` and consume events from the receiver returned by
//! `spawn`; the worker applies commands strictly in queue order against
//! the shared dataset. Host-side async work (loads, saves) happens outside
//! the worker and feeds back in as `DatasetChanged` commands.

use crate::FormStore;
use crate::error::{EngineError, EngineResult};
use formwork_model::DatasetView;
use formwork_types::{FormCommand, FormEvent};
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tracing::debug;

/// Command side of a running dispatch worker.
pub struct StoreHandle {
    commands: mpsc::UnboundedSender<FormCommand>,
    worker: JoinHandle<FormStore>,
}

impl StoreHandle {
    /// Queues a command for the worker.
    pub fn dispatch(&self, command: FormCommand) -> EngineResult<()> {
        self.commands
            .send(command)
            .map_err(|_| EngineError::ChannelClosed)
    }

    /// Closes the queue, waits for the worker to drain it, and returns
    /// the final store.
    pub async fn shutdown(self) -> EngineResult<FormStore> {
        drop(self.commands);
        self.worker.await.map_err(|_| EngineError::WorkerFailed)
    }
}

/// Spawns the dispatch worker for `store`, reading `dataset` at each
/// command. Returns the command handle and the event stream.
pub fn spawn<D>(
    store: FormStore,
    dataset: Arc<RwLock<D>>,
) -> (StoreHandle, mpsc::UnboundedReceiver<FormEvent>)
where
    D: DatasetView + Send + Sync + 'static,
{
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(run_worker(store, dataset, command_rx, event_tx));

    (
        StoreHandle {
            commands: command_tx,
            worker,
        },
        event_rx,
    )
}

async fn run_worker<D>(
    mut store: FormStore,
    dataset: Arc<RwLock<D>>,
    mut commands: mpsc::UnboundedReceiver<FormCommand>,
    events: mpsc::UnboundedSender<FormEvent>,
) -> FormStore
where
    D: DatasetView + Send + Sync + 'static,
{
    while let Some(command) = commands.recv().await {
        // The dataset lock is held only for the synchronous transition,
        // never across an await.
        let batch = {
            let dataset = dataset.read().await;
            store.dispatch(command, &*dataset)
        };
        for event in batch {
            if events.send(event).is_err() {
                debug!("event receiver dropped; event discarded");
            }
        }
    }
    store
}
