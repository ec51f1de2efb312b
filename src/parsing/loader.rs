use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::LoadError;
use crate::parsing::dataset_parser::load_dataset;
use crate::types::dataset::Dataset;

/// Lifecycle of the one-shot dataset load.
#[derive(Debug)]
pub enum DatasetState {
    Loading(PendingLoad),
    Ready(Dataset),
    Failed(String),
}

impl DatasetState {
    pub fn start(path: PathBuf) -> Self {
        DatasetState::Loading(PendingLoad::spawn(path))
    }

    /// Moves a finished background load into `Ready` or `Failed`.
    /// Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let outcome = match self {
            DatasetState::Loading(pending) => match pending.try_take() {
                Some(outcome) => outcome,
                None => return false,
            },
            _ => return false,
        };
        *self = match outcome {
            Ok(dataset) => DatasetState::Ready(dataset),
            Err(err) => {
                tracing::error!(error = %err, "dataset load failed");
                DatasetState::Failed(err.to_string())
            }
        };
        true
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            DatasetState::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DatasetState::Loading(_))
    }
}

/// A load running on its own thread.
#[derive(Debug)]
pub struct PendingLoad {
    rx: Receiver<Result<Dataset, LoadError>>,
}

impl PendingLoad {
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        tracing::debug!(path = %path.display(), "dataset load started");
        thread::spawn(move || {
            let result = load_dataset(&path);
            // The receiver is gone when the app closed before the load finished.
            let _ = tx.send(result);
        });
        Self { rx }
    }

    fn try_take(&self) -> Option<Result<Dataset, LoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::Interrupted)),
        }
    }

    /// Blocks until the load finishes.
    pub fn wait(self) -> Result<Dataset, LoadError> {
        self.rx.recv().unwrap_or(Err(LoadError::Interrupted))
    }
}
