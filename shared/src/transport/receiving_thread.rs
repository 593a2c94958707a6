use std::thread;

use crossbeam_channel::{bounded, Receiver, TryRecvError};

use super::error::SocketError;

/// A detached worker thread that runs one blocking call (`recv()`, `accept()`)
/// and hands its result to exactly one consumer.
///
/// The handoff is a bounded(1) channel: the worker is the single producer,
/// the owner of this handle the single consumer. Dropping the handle detaches
/// the worker; its result is discarded when the call eventually returns.
pub struct ReceivingThread<T> {
    receiver: Receiver<T>,
}

impl<T: Send + 'static> ReceivingThread<T> {
    pub fn spawn<F>(name: &str, work: F) -> Result<Self, SocketError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (sender, receiver) = bounded(1);
        thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                // the consumer may have gone away; nothing to do then
                let _ = sender.send(work());
            })
            .map_err(|error| SocketError::worker_spawn_failed(&error))?;

        Ok(Self { receiver })
    }

    /// Blocks until the worker reports its result. No timeout.
    pub fn wait(self) -> Result<T, SocketError> {
        self.receiver.recv().map_err(|_| SocketError::WorkerLost)
    }

    /// Returns the result if the worker has finished, without blocking
    pub fn try_take(&self) -> Result<Option<T>, SocketError> {
        match self.receiver.try_recv() {
            Ok(value) => Ok(Some(value)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(SocketError::WorkerLost),
        }
    }
}
