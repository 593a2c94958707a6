use std::{io::Read, net::TcpStream};

use log::{debug, warn};

use super::{
    error::SocketError, receive_state::ReceiveState, receiving_thread::ReceivingThread,
    socket::Socket, Transport,
};

type ReceiveOutcome = Result<Vec<u8>, SocketError>;

/// A `Socket` whose receives run on a background worker.
///
/// `receive_data_async` starts one `recv()` on a detached thread; `await_data`
/// blocks for it, `get_data` polls it. Only one receive is outstanding at a
/// time, so the buffer has exactly one writer and one reader.
pub struct SocketAsync {
    socket: Socket,
    state: ReceiveState,
    worker: Option<ReceivingThread<ReceiveOutcome>>,
    received: Option<Vec<u8>>,
    latched: Option<SocketError>,
}

impl SocketAsync {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            socket: Socket::new(buffer_size),
            state: ReceiveState::Empty,
            worker: None,
            received: None,
            latched: None,
        }
    }

    pub fn attach(&mut self, stream: TcpStream) {
        self.disconnect();
        self.socket.attach(stream);
    }

    pub fn socket(&self) -> &Socket {
        &self.socket
    }

    pub fn state(&self) -> ReceiveState {
        self.state
    }

    pub fn send_data(&mut self, data: &[u8]) -> Result<(), SocketError> {
        if self.state == ReceiveState::Error {
            return Err(SocketError::ErrorLatched);
        }
        match self.socket.send_data(data) {
            Err(error @ SocketError::SendFailed { .. }) => {
                // the sender sees the cause, later calls see ErrorLatched
                self.state = ReceiveState::Error;
                Err(error)
            }
            other => other,
        }
    }

    /// Starts a background `recv()`.
    pub fn receive_data_async(&mut self) -> Result<(), SocketError> {
        match self.state {
            ReceiveState::Empty => {}
            ReceiveState::Receiving | ReceiveState::Received => {
                return Err(SocketError::ReceiveInProgress)
            }
            ReceiveState::Error => return Err(SocketError::ErrorLatched),
        }

        let mut stream = self.socket.try_clone_stream()?;
        let buffer_size = self.socket.buffer_size();
        let worker = ReceivingThread::spawn("blackbox-receive", move || {
            let mut buffer = vec![0; buffer_size];
            match stream.read(&mut buffer) {
                Ok(0) => Err(SocketError::ConnectionClosed),
                Ok(count) => {
                    buffer.truncate(count);
                    Ok(buffer)
                }
                Err(error) => Err(SocketError::receive_failed(&error)),
            }
        })?;

        self.worker = Some(worker);
        self.state = ReceiveState::Receiving;
        Ok(())
    }

    /// Blocks until the outstanding receive completes and returns its bytes.
    pub fn await_data(&mut self) -> Result<Vec<u8>, SocketError> {
        match self.state {
            ReceiveState::Empty => Err(SocketError::ReceiveNotStarted),
            ReceiveState::Error => Err(self.take_latched()),
            ReceiveState::Received => self.take_received(),
            ReceiveState::Receiving => {
                let worker = self.worker.take().ok_or(SocketError::WorkerLost)?;
                let outcome = worker.wait().and_then(|outcome| outcome);
                self.complete(outcome);
                match self.state {
                    ReceiveState::Received => self.take_received(),
                    _ => Err(self.take_latched()),
                }
            }
        }
    }

    /// Returns the received bytes if the outstanding receive has completed.
    /// `Ok(None)` means "not yet", including when no receive was started.
    pub fn get_data(&mut self) -> Result<Option<Vec<u8>>, SocketError> {
        match self.state {
            ReceiveState::Empty => Ok(None),
            ReceiveState::Error => Err(self.take_latched()),
            ReceiveState::Received => self.take_received().map(Some),
            ReceiveState::Receiving => {
                let outcome = match &self.worker {
                    Some(worker) => match worker.try_take() {
                        Ok(None) => return Ok(None),
                        Ok(Some(outcome)) => outcome,
                        Err(error) => Err(error),
                    },
                    None => Err(SocketError::WorkerLost),
                };
                self.worker = None;
                self.complete(outcome);
                match self.state {
                    ReceiveState::Received => self.take_received().map(Some),
                    _ => Err(self.take_latched()),
                }
            }
        }
    }

    /// Like `await_data`, copying into `buffer`. Bytes past its length are dropped.
    pub fn await_data_into(&mut self, buffer: &mut [u8]) -> Result<usize, SocketError> {
        let data = self.await_data()?;
        Ok(copy_truncated(&data, buffer))
    }

    /// Like `get_data`, copying into `buffer`. Bytes past its length are dropped.
    pub fn get_data_into(&mut self, buffer: &mut [u8]) -> Result<Option<usize>, SocketError> {
        Ok(self
            .get_data()?
            .map(|data| copy_truncated(&data, buffer)))
    }

    /// Discards data that was received but not consumed. An outstanding
    /// receive and a latched error are left alone.
    pub fn reset(&mut self) {
        if self.state == ReceiveState::Received {
            self.received = None;
            self.state = ReceiveState::Empty;
        }
    }

    pub fn is_connected(&self) -> bool {
        self.socket.is_connected()
    }

    /// Closes the connection and clears all receive state. Idempotent.
    pub fn disconnect(&mut self) {
        self.socket.disconnect();
        // a pending worker is unblocked by the shutdown and detaches
        self.worker = None;
        self.received = None;
        self.latched = None;
        self.state = ReceiveState::Empty;
    }

    fn complete(&mut self, outcome: ReceiveOutcome) {
        match outcome {
            Ok(data) => {
                debug!("Received {} bytes", data.len());
                self.received = Some(data);
                self.state = ReceiveState::Received;
            }
            Err(error) => {
                warn!("Receive failed: {error}");
                self.latch(error);
            }
        }
    }

    fn latch(&mut self, error: SocketError) {
        self.latched = Some(error);
        self.state = ReceiveState::Error;
    }

    fn take_received(&mut self) -> Result<Vec<u8>, SocketError> {
        self.state = ReceiveState::Empty;
        self.received.take().ok_or(SocketError::WorkerLost)
    }

    // the first caller sees the cause, everyone after sees ErrorLatched
    fn take_latched(&mut self) -> SocketError {
        self.latched.take().unwrap_or(SocketError::ErrorLatched)
    }
}

fn copy_truncated(data: &[u8], buffer: &mut [u8]) -> usize {
    let count = data.len().min(buffer.len());
    buffer[..count].copy_from_slice(&data[..count]);
    count
}

impl Transport for SocketAsync {
    fn send_data(&mut self, data: &[u8]) -> Result<(), SocketError> {
        SocketAsync::send_data(self, data)
    }

    fn receive_data_async(&mut self) -> Result<(), SocketError> {
        SocketAsync::receive_data_async(self)
    }

    fn await_data(&mut self) -> Result<Vec<u8>, SocketError> {
        SocketAsync::await_data(self)
    }

    fn get_data(&mut self) -> Result<Option<Vec<u8>>, SocketError> {
        SocketAsync::get_data(self)
    }

    fn receive_state(&self) -> ReceiveState {
        self.state
    }

    fn is_connected(&self) -> bool {
        SocketAsync::is_connected(self)
    }

    fn buffer_size(&self) -> usize {
        self.socket.buffer_size()
    }

    fn disconnect(&mut self) {
        SocketAsync::disconnect(self)
    }
}
