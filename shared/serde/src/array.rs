use crate::{
    byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, format, serde::Serde,
};

/// Writes an array header for `len` elements
pub fn write_array_len(writer: &mut dyn ByteWrite, len: usize) {
    if len <= format::FIXARRAY_MAX_LEN {
        writer.write_byte(format::FIXARRAY | len as u8);
    } else if len <= u16::MAX as usize {
        writer.write_byte(format::ARRAY16);
        writer.write_bytes(&(len as u16).to_be_bytes());
    } else {
        writer.write_byte(format::ARRAY32);
        writer.write_bytes(&(len as u32).to_be_bytes());
    }
}

/// Reads an array header and returns the declared element count
pub fn read_array_len(reader: &mut ByteReader) -> Result<usize, SerdeErr> {
    let offset = reader.position();
    let marker = reader.read_byte()?;
    match marker {
        m if m & format::FIXARRAY_MASK == format::FIXARRAY => {
            Ok((m & !format::FIXARRAY_MASK) as usize)
        }
        format::ARRAY16 => Ok(reader.read_u16()? as usize),
        format::ARRAY32 => Ok(reader.read_u32()? as usize),
        byte => Err(SerdeErr::UnexpectedFormat {
            byte,
            offset,
            expected: "array",
        }),
    }
}

impl<T: Serde> Serde for Vec<T> {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        write_array_len(writer, self.len());
        for element in self {
            element.ser(writer);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let len = read_array_len(reader)?;
        // every element takes at least one byte, so never trust the header
        // for more than what is actually buffered
        let mut output = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            output.push(T::de(reader)?);
        }
        Ok(output)
    }
}
