//! Processing worker thread.
//!
//! [`Worker`] owns the channel pair to a background [`WorkerHandler`]
//! thread. Dropping it stops the thread and waits for it.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::config::EditorConfig;
use crate::error::{EditError, EditResult};
use crate::handler::{build_pool, EngineInit, WorkerHandler};
use crate::messages::{WorkerEvent, WorkerMsg};

/// Handle to the background processing thread.
pub struct Worker {
    /// Sender for commands to the worker thread.
    tx: Sender<WorkerMsg>,
    /// Receiver for results from the worker thread.
    rx: Receiver<WorkerEvent>,
    /// Thread handle (Option for Drop).
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Starts a worker whose engine uses `config.threads` pool threads.
    pub fn spawn(config: &EditorConfig) -> EditResult<Self> {
        let threads = config.threads;
        Self::spawn_with_init(config.preserve_luminance, Box::new(move || build_pool(threads)))
    }

    pub(crate) fn spawn_with_init(preserve_luminance: bool, init: EngineInit) -> EditResult<Self> {
        let (tx_to_worker, rx_in_worker) = channel();
        let (tx_to_controller, rx_from_worker) = channel();

        let handle = thread::Builder::new()
            .name("pixl-worker".into())
            .spawn(move || {
                WorkerHandler::new(rx_in_worker, tx_to_controller, init, preserve_luminance).run();
            })
            .map_err(|e| EditError::WorkerUnavailable(format!("failed to spawn worker: {e}")))?;

        debug!("worker spawned");
        Ok(Self {
            tx: tx_to_worker,
            rx: rx_from_worker,
            handle: Some(handle),
        })
    }

    /// Sends a message; the payload moves to the worker.
    pub fn send(&self, msg: WorkerMsg) -> EditResult<()> {
        self.tx.send(msg).map_err(|_| EditError::Disconnected)
    }

    /// Returns the next event if one is ready.
    pub fn try_recv(&self) -> EditResult<Option<WorkerEvent>> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(EditError::Disconnected),
        }
    }

    /// Blocks until the next event.
    pub fn recv(&self) -> EditResult<WorkerEvent> {
        self.rx.recv().map_err(|_| EditError::Disconnected)
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("running", &self.handle.is_some())
            .finish()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Signal worker to stop
        let _ = self.tx.send(WorkerMsg::Close);

        // Wait for worker thread to finish
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
