use crate::{
    byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, format, serde::Serde,
};

/// Writes a string header and payload, picking the narrowest width
pub fn write_str(writer: &mut dyn ByteWrite, value: &str) {
    let bytes = value.as_bytes();
    let len = bytes.len();
    if len <= format::FIXSTR_MAX_LEN {
        writer.write_byte(format::FIXSTR | len as u8);
    } else if len <= u8::MAX as usize {
        writer.write_byte(format::STR8);
        writer.write_byte(len as u8);
    } else if len <= u16::MAX as usize {
        writer.write_byte(format::STR16);
        writer.write_bytes(&(len as u16).to_be_bytes());
    } else {
        writer.write_byte(format::STR32);
        writer.write_bytes(&(len as u32).to_be_bytes());
    }
    writer.write_bytes(bytes);
}

/// Reads a string of any width. Fails with `UnexpectedFormat` for non-strings.
pub fn read_str(reader: &mut ByteReader) -> Result<String, SerdeErr> {
    let offset = reader.position();
    let marker = reader.read_byte()?;
    read_str_body(reader, marker, offset)
}

pub(crate) fn read_str_body(
    reader: &mut ByteReader,
    marker: u8,
    offset: usize,
) -> Result<String, SerdeErr> {
    let len = match marker {
        m if m & format::FIXSTR_MASK == format::FIXSTR => (m & !format::FIXSTR_MASK) as usize,
        format::STR8 => reader.read_byte()? as usize,
        format::STR16 => reader.read_u16()? as usize,
        format::STR32 => reader.read_u32()? as usize,
        byte => {
            return Err(SerdeErr::UnexpectedFormat {
                byte,
                offset,
                expected: "string",
            })
        }
    };
    let payload_offset = reader.position();
    let payload = reader.read_bytes(len)?;
    String::from_utf8(payload.to_vec()).map_err(|_| SerdeErr::InvalidUtf8 {
        offset: payload_offset,
    })
}

impl Serde for String {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        write_str(writer, self);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        read_str(reader)
    }
}
