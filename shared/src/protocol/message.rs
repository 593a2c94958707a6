use std::fmt;

use blackbox_serde::{
    read_array_len, write_array_len, write_str, ByteReader, ByteWrite, ByteWriter, Scalar, Serde,
    SerdeErr,
};

use super::markers;

/// One logical message: an array of printable strings, classified by its
/// first element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProtocolMessage {
    /// `["AI ACTIVE"]`
    Handshake,
    /// `["OK"]`
    Ok,
    /// `["STOP"]`
    Stop,
    /// `["DATAORDER", name...]`
    DataOrder(Vec<String>),
    /// `["ACTIONORDER", name...]`
    ActionOrder(Vec<String>),
    /// One value per negotiated field, in order
    Values(Vec<String>),
}

impl ProtocolMessage {
    /// Classifies a decoded string array. Single-token messages are control
    /// messages; everything not led by a marker is a values message.
    pub fn from_fields(mut fields: Vec<String>) -> Self {
        if fields.len() == 1 {
            match fields[0].as_str() {
                markers::HANDSHAKE => return ProtocolMessage::Handshake,
                markers::OK => return ProtocolMessage::Ok,
                markers::STOP => return ProtocolMessage::Stop,
                _ => {}
            }
        }
        match fields.first().map(String::as_str) {
            Some(markers::DATA_ORDER) => {
                fields.remove(0);
                ProtocolMessage::DataOrder(fields)
            }
            Some(markers::ACTION_ORDER) => {
                fields.remove(0);
                ProtocolMessage::ActionOrder(fields)
            }
            _ => ProtocolMessage::Values(fields),
        }
    }

    /// Number of array elements on the wire
    pub fn element_count(&self) -> usize {
        match self {
            ProtocolMessage::Handshake | ProtocolMessage::Ok | ProtocolMessage::Stop => 1,
            ProtocolMessage::DataOrder(names) | ProtocolMessage::ActionOrder(names) => {
                names.len() + 1
            }
            ProtocolMessage::Values(values) => values.len(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(self.byte_length());
        self.ser(&mut writer);
        writer.to_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SerdeErr> {
        Self::de(&mut ByteReader::new(bytes))
    }
}

impl Serde for ProtocolMessage {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        write_array_len(writer, self.element_count());
        match self {
            ProtocolMessage::Handshake => write_str(writer, markers::HANDSHAKE),
            ProtocolMessage::Ok => write_str(writer, markers::OK),
            ProtocolMessage::Stop => write_str(writer, markers::STOP),
            ProtocolMessage::DataOrder(names) => {
                write_str(writer, markers::DATA_ORDER);
                names.iter().for_each(|name| write_str(writer, name));
            }
            ProtocolMessage::ActionOrder(names) => {
                write_str(writer, markers::ACTION_ORDER);
                names.iter().for_each(|name| write_str(writer, name));
            }
            ProtocolMessage::Values(values) => {
                values.iter().for_each(|value| write_str(writer, value));
            }
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let len = read_array_len(reader)?;
        let mut fields = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            fields.push(Scalar::de(reader)?.into_field_string());
        }
        Ok(Self::from_fields(fields))
    }
}

impl fmt::Display for ProtocolMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolMessage::Handshake => write!(f, "{:?}", markers::HANDSHAKE),
            ProtocolMessage::Ok => write!(f, "{:?}", markers::OK),
            ProtocolMessage::Stop => write!(f, "{:?}", markers::STOP),
            ProtocolMessage::DataOrder(names) => write!(f, "{}{:?}", markers::DATA_ORDER, names),
            ProtocolMessage::ActionOrder(names) => {
                write!(f, "{}{:?}", markers::ACTION_ORDER, names)
            }
            ProtocolMessage::Values(values) => write!(f, "values{values:?}"),
        }
    }
}
