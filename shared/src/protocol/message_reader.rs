use blackbox_serde::{ByteReader, Serde};

use super::{error::ProtocolError, message::ProtocolMessage};

/// Reassembles whole messages from receive chunks.
///
/// A stream transport may split one message across reads or pack several
/// into one read. Messages are self-delimiting, so bytes are buffered until a
/// complete one can be decoded.
pub struct MessageReader {
    pending: Vec<u8>,
    max_pending: usize,
}

impl MessageReader {
    pub fn new(max_pending: usize) -> Self {
        Self {
            pending: Vec::new(),
            max_pending,
        }
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Decodes the next complete message, if one is buffered
    pub fn next_message(&mut self) -> Result<Option<ProtocolMessage>, ProtocolError> {
        if self.pending.is_empty() {
            return Ok(None);
        }

        let mut reader = ByteReader::new(&self.pending);
        match ProtocolMessage::de(&mut reader) {
            Ok(message) => {
                let used = reader.position();
                self.pending.drain(..used);
                Ok(Some(message))
            }
            Err(error) if error.is_incomplete() => {
                if self.pending.len() > self.max_pending {
                    let size = self.pending.len();
                    self.pending.clear();
                    return Err(ProtocolError::MessageTooLarge {
                        size,
                        max: self.max_pending,
                    });
                }
                Ok(None)
            }
            Err(error) => {
                self.pending.clear();
                Err(error.into())
            }
        }
    }
}
