use thiserror::Error;

/// Errors that can occur while reading bytes off the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The input ended before the value was complete. More bytes may still arrive.
    #[error("Unexpected end of input at offset {offset}: needed {needed} more byte(s)")]
    Incomplete { offset: usize, needed: usize },

    /// A format byte this decoder does not understand (maps, ext types, bin, ...)
    #[error("Unsupported format byte 0x{byte:02x} at offset {offset}")]
    UnsupportedFormat { byte: u8, offset: usize },

    /// The value was well-formed but of a different type than requested
    #[error("Unexpected format byte 0x{byte:02x} at offset {offset}, expected {expected}")]
    UnexpectedFormat {
        byte: u8,
        offset: usize,
        expected: &'static str,
    },

    /// String payload was not valid UTF-8
    #[error("String at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },
}

impl SerdeErr {
    /// Whether this error only means "wait for more bytes"
    pub fn is_incomplete(&self) -> bool {
        matches!(self, SerdeErr::Incomplete { .. })
    }
}
