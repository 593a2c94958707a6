use crate::{
    byte_reader::ByteReader,
    byte_writer::ByteWrite,
    error::SerdeErr,
    format,
    serde::Serde,
    string::{read_str_body, write_str},
};

/// One array element as it may appear on the wire.
///
/// The protocol itself only writes [`Scalar::Str`], but any MessagePack
/// scalar is accepted on read and can be turned back into the printable
/// form the protocol layer works with.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Nil,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
}

impl Scalar {
    /// Printable form of the value, as the protocol stores it
    pub fn to_field_string(&self) -> String {
        match self {
            Scalar::Nil => String::new(),
            Scalar::Bool(value) => value.to_string(),
            Scalar::Int(value) => value.to_string(),
            Scalar::UInt(value) => value.to_string(),
            Scalar::Float32(value) => value.to_string(),
            Scalar::Float64(value) => value.to_string(),
            Scalar::Str(value) => value.clone(),
        }
    }

    pub fn into_field_string(self) -> String {
        match self {
            Scalar::Str(value) => value,
            other => other.to_field_string(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

fn write_uint(writer: &mut dyn ByteWrite, value: u64) {
    if value <= u64::from(format::POSITIVE_FIXINT_MAX) {
        writer.write_byte(value as u8);
    } else if value <= u64::from(u8::MAX) {
        writer.write_byte(format::UINT8);
        writer.write_byte(value as u8);
    } else if value <= u64::from(u16::MAX) {
        writer.write_byte(format::UINT16);
        writer.write_bytes(&(value as u16).to_be_bytes());
    } else if value <= u64::from(u32::MAX) {
        writer.write_byte(format::UINT32);
        writer.write_bytes(&(value as u32).to_be_bytes());
    } else {
        writer.write_byte(format::UINT64);
        writer.write_bytes(&value.to_be_bytes());
    }
}

fn write_int(writer: &mut dyn ByteWrite, value: i64) {
    if value >= 0 {
        write_uint(writer, value as u64);
    } else if value >= -32 {
        writer.write_byte(value as i8 as u8);
    } else if value >= i64::from(i8::MIN) {
        writer.write_byte(format::INT8);
        writer.write_byte(value as i8 as u8);
    } else if value >= i64::from(i16::MIN) {
        writer.write_byte(format::INT16);
        writer.write_bytes(&(value as i16).to_be_bytes());
    } else if value >= i64::from(i32::MIN) {
        writer.write_byte(format::INT32);
        writer.write_bytes(&(value as i32).to_be_bytes());
    } else {
        writer.write_byte(format::INT64);
        writer.write_bytes(&value.to_be_bytes());
    }
}

impl Serde for Scalar {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        match self {
            Scalar::Nil => writer.write_byte(format::NIL),
            Scalar::Bool(false) => writer.write_byte(format::FALSE),
            Scalar::Bool(true) => writer.write_byte(format::TRUE),
            Scalar::Int(value) => write_int(writer, *value),
            Scalar::UInt(value) => write_uint(writer, *value),
            Scalar::Float32(value) => {
                writer.write_byte(format::FLOAT32);
                writer.write_bytes(&value.to_be_bytes());
            }
            Scalar::Float64(value) => {
                writer.write_byte(format::FLOAT64);
                writer.write_bytes(&value.to_be_bytes());
            }
            Scalar::Str(value) => write_str(writer, value),
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let offset = reader.position();
        let marker = reader.read_byte()?;
        let scalar = match marker {
            m if m <= format::POSITIVE_FIXINT_MAX => Scalar::UInt(u64::from(m)),
            m if m >= format::NEGATIVE_FIXINT_MIN => Scalar::Int(i64::from(m as i8)),
            m if format::is_str(m) => Scalar::Str(read_str_body(reader, m, offset)?),
            format::NIL => Scalar::Nil,
            format::FALSE => Scalar::Bool(false),
            format::TRUE => Scalar::Bool(true),
            format::FLOAT32 => Scalar::Float32(f32::from_be_bytes(reader.read_array()?)),
            format::FLOAT64 => Scalar::Float64(f64::from_be_bytes(reader.read_array()?)),
            format::UINT8 => Scalar::UInt(u64::from(reader.read_byte()?)),
            format::UINT16 => Scalar::UInt(u64::from(reader.read_u16()?)),
            format::UINT32 => Scalar::UInt(u64::from(reader.read_u32()?)),
            format::UINT64 => Scalar::UInt(u64::from_be_bytes(reader.read_array()?)),
            format::INT8 => Scalar::Int(i64::from(reader.read_byte()? as i8)),
            format::INT16 => Scalar::Int(i64::from(i16::from_be_bytes(reader.read_array()?))),
            format::INT32 => Scalar::Int(i64::from(i32::from_be_bytes(reader.read_array()?))),
            format::INT64 => Scalar::Int(i64::from_be_bytes(reader.read_array()?)),
            byte => return Err(SerdeErr::UnsupportedFormat { byte, offset }),
        };
        Ok(scalar)
    }
}
