//! MessagePack format bytes understood by this crate.

pub const NIL: u8 = 0xc0;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;

pub const POSITIVE_FIXINT_MAX: u8 = 0x7f;
pub const NEGATIVE_FIXINT_MIN: u8 = 0xe0;

pub const FIXSTR: u8 = 0xa0;
pub const FIXSTR_MASK: u8 = 0xe0;
pub const FIXSTR_MAX_LEN: usize = 31;
pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;

pub const FIXARRAY: u8 = 0x90;
pub const FIXARRAY_MASK: u8 = 0xf0;
pub const FIXARRAY_MAX_LEN: usize = 15;
pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;

pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;

pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;
pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;

/// Returns true if `byte` starts a string of any width
pub fn is_str(byte: u8) -> bool {
    byte & FIXSTR_MASK == FIXSTR || byte == STR8 || byte == STR16 || byte == STR32
}
