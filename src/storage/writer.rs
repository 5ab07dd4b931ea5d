//! Background write queue.
//!
//! Saves never block the interactive loop: they are queued on a channel and
//! applied in order by a single worker thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::{debug, warn};

use crate::error::PomoError;

use super::KeyValueStore;

/// Store handle shared between synchronous readers and the writer thread.
pub type SharedStore = Arc<Mutex<Box<dyn KeyValueStore>>>;

enum WriteCommand {
    /// Entries to store as one atomic batch.
    Put(Vec<(String, Vec<u8>)>),
    /// Acknowledge once every earlier command has been applied.
    Flush(Sender<()>),
}

/// Handle to the writer thread. The thread exits once every handle is dropped.
#[derive(Debug)]
pub struct BackgroundWriter {
    tx: Sender<WriteCommand>,
}

impl BackgroundWriter {
    /// Start the writer thread for `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(store: SharedStore) -> Result<Self, PomoError> {
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("pomofocus-writer".to_string())
            .spawn(move || drain(&store, &rx))?;

        Ok(Self { tx })
    }

    /// Queue a batch. Returns immediately.
    pub fn submit(&self, entries: Vec<(String, Vec<u8>)>) {
        if self.tx.send(WriteCommand::Put(entries)).is_err() {
            warn!("Writer thread has stopped; dropping write");
        }
    }

    /// Block until every batch queued so far is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer thread has stopped.
    pub fn flush(&self) -> Result<(), PomoError> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.tx
            .send(WriteCommand::Flush(ack_tx))
            .map_err(|_| PomoError::Storage("Writer thread has stopped".to_string()))?;
        ack_rx
            .recv()
            .map_err(|_| PomoError::Storage("Writer thread stopped before flushing".to_string()))
    }
}

fn drain(store: &SharedStore, rx: &Receiver<WriteCommand>) {
    for command in rx {
        match command {
            WriteCommand::Put(entries) => match store.lock() {
                Ok(mut store) => {
                    if let Err(e) = store.set_many(&entries) {
                        warn!(error = %e, keys = entries.len(), "Failed to persist batch");
                    }
                }
                Err(_) => warn!("Store lock poisoned; dropping write"),
            },
            WriteCommand::Flush(ack) => {
                // The flusher may have given up waiting.
                let _ = ack.send(());
            }
        }
    }
    debug!("Writer thread exiting");
}
