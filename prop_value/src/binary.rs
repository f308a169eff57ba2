//! Compact binary codec for single property values.
//!
//! Layout, native byte order throughout:
//!
//! ```text
//! [mode:1][id:4][type:1][aspect:1 if terse+][name NUL if verbose][payload]
//! ```
//!
//! Three verbosity modes trade size against self-description: values-only
//! carries mode, id, type and payload; terse adds the aspect byte; verbose
//! adds the NUL-terminated name. Fixed-width payloads are raw native-layout
//! component bytes; strings are NUL-terminated UTF-8; enums are the
//! candidate CSV (NUL-terminated) followed by the `u64` selection.

use crate::enums::EnumData;
use crate::property::{Payload, Property};
use prop_types::{Aspect, Guid, Mat3F, Mat4F, PropertyType, Verbosity};
use std::mem::size_of;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Untyped properties have no wire form.
    #[error("untyped property cannot be serialized")]
    Untyped,
    #[error("buffer too small: need {need} bytes, got {got}")]
    BufferTooSmall { need: usize, got: usize },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid verbosity mode byte {0:#04x}")]
    InvalidMode(u8),
    #[error("invalid property type byte {0:#04x}")]
    InvalidType(u8),
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,
    #[error("property set holds {0} properties, wire count field is i16")]
    TooManyProperties(usize),
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// Header length for `mode`: mode + id + type, plus aspect and name fields
/// as the mode includes them.
fn header_size(mode: Verbosity, name: &str) -> usize {
    let mut size = 1 + size_of::<u32>() + 1;
    if mode >= Verbosity::Terse {
        size += 1;
    }
    if mode >= Verbosity::Verbose {
        size += name.len() + 1;
    }
    size
}

fn put(buf: &mut [u8], at: &mut usize, bytes: &[u8]) {
    buf[*at..*at + bytes.len()].copy_from_slice(bytes);
    *at += bytes.len();
}

fn take<'a>(buf: &'a [u8], at: &mut usize, len: usize) -> Result<&'a [u8]> {
    let end = at.checked_add(len).ok_or(CodecError::UnexpectedEof)?;
    if end > buf.len() {
        return Err(CodecError::UnexpectedEof);
    }
    let slice = &buf[*at..end];
    *at = end;
    Ok(slice)
}

fn take_pod<T: bytemuck::AnyBitPattern>(buf: &[u8], at: &mut usize) -> Result<T> {
    Ok(bytemuck::pod_read_unaligned(take(buf, at, size_of::<T>())?))
}

/// NUL-terminated UTF-8 field; consumes the terminator.
fn take_cstr<'a>(buf: &'a [u8], at: &mut usize) -> Result<&'a str> {
    let rest = &buf[*at..];
    let nul = rest
        .iter()
        .position(|&b| b == 0)
        .ok_or(CodecError::UnexpectedEof)?;
    let s = std::str::from_utf8(&rest[..nul]).map_err(|_| CodecError::InvalidUtf8)?;
    *at += nul + 1;
    Ok(s)
}

impl Property {
    /// Exact number of bytes [`serialize_into`](Self::serialize_into) will
    /// write for `mode`. Fails only for untyped properties.
    pub fn serialized_size(&self, mode: Verbosity) -> Result<usize> {
        Ok(header_size(mode, self.name()) + self.payload_size()?)
    }

    fn payload_size(&self) -> Result<usize> {
        let size = match self.resolved().as_ref() {
            Payload::None | Payload::Reference(_) => return Err(CodecError::Untyped),
            Payload::String(s) => s.len() + 1,
            Payload::Int(_) => size_of::<i64>(),
            Payload::Int2(_) => 2 * size_of::<i64>(),
            Payload::Int3(_) => 3 * size_of::<i64>(),
            Payload::Int4(_) => 4 * size_of::<i64>(),
            Payload::Float(_) => size_of::<f32>(),
            Payload::Float2(_) => 2 * size_of::<f32>(),
            Payload::Float3(_) => 3 * size_of::<f32>(),
            Payload::Float4(_) => 4 * size_of::<f32>(),
            Payload::Float3x3(_) => 9 * size_of::<f32>(),
            Payload::Float4x4(_) => 16 * size_of::<f32>(),
            Payload::Guid(_) => size_of::<Guid>(),
            Payload::Enum(_) => {
                self.enum_candidates().join(",").len() + 1 + size_of::<u64>()
            }
            Payload::Bool(_) => 1,
        };
        Ok(size)
    }

    /// Serializes into `buf`, returning the number of bytes written. The
    /// size check happens before any write; on error `buf` is untouched.
    /// Reference properties serialize their target's current value.
    pub fn serialize_into(&self, mode: Verbosity, buf: &mut [u8]) -> Result<usize> {
        let need = self.serialized_size(mode)?;
        if buf.len() < need {
            return Err(CodecError::BufferTooSmall {
                need,
                got: buf.len(),
            });
        }

        let mut at = 0;
        put(buf, &mut at, &[mode.code()]);
        put(buf, &mut at, bytemuck::bytes_of(&self.id()));
        put(buf, &mut at, &[self.property_type().code()]);
        if mode >= Verbosity::Terse {
            put(buf, &mut at, &[self.aspect().code()]);
        }
        if mode >= Verbosity::Verbose {
            put(buf, &mut at, self.name().as_bytes());
            put(buf, &mut at, &[0]);
        }

        match self.resolved().as_ref() {
            Payload::None | Payload::Reference(_) => return Err(CodecError::Untyped),
            Payload::String(s) => {
                put(buf, &mut at, s.as_bytes());
                put(buf, &mut at, &[0]);
            }
            Payload::Int(v) => put(buf, &mut at, bytemuck::bytes_of(v)),
            Payload::Int2(v) => put(buf, &mut at, bytemuck::bytes_of(v)),
            Payload::Int3(v) => put(buf, &mut at, bytemuck::bytes_of(v)),
            Payload::Int4(v) => put(buf, &mut at, bytemuck::bytes_of(v)),
            Payload::Float(v) => put(buf, &mut at, bytemuck::bytes_of(v)),
            Payload::Float2(v) => put(buf, &mut at, bytemuck::bytes_of(v)),
            Payload::Float3(v) => put(buf, &mut at, bytemuck::bytes_of(v)),
            Payload::Float4(v) => put(buf, &mut at, bytemuck::bytes_of(v)),
            Payload::Float3x3(v) => put(buf, &mut at, bytemuck::bytes_of(v)),
            Payload::Float4x4(v) => put(buf, &mut at, bytemuck::bytes_of(v)),
            Payload::Guid(v) => put(buf, &mut at, bytemuck::bytes_of(v)),
            Payload::Enum(_) => {
                put(buf, &mut at, self.enum_candidates().join(",").as_bytes());
                put(buf, &mut at, &[0]);
                put(buf, &mut at, bytemuck::bytes_of(&self.enum_selection()));
            }
            Payload::Bool(b) => put(buf, &mut at, &[*b as u8]),
        }

        debug_assert_eq!(at, need);
        Ok(at)
    }

    /// Decodes one serialized value from the front of `buf` into self,
    /// returning the number of bytes consumed. The whole record is parsed
    /// and validated before self is touched; on error self is unchanged.
    /// Fields the wire mode omits (aspect, name) keep their current values.
    /// A reference property is detached and becomes an owned value.
    pub fn deserialize_into(&mut self, buf: &[u8]) -> Result<usize> {
        let mut at = 0;

        let mode_byte = take(buf, &mut at, 1)?[0];
        let mode = Verbosity::from_code(mode_byte).ok_or(CodecError::InvalidMode(mode_byte))?;
        let id: u32 = take_pod(buf, &mut at)?;
        let type_byte = take(buf, &mut at, 1)?[0];
        let wire_type =
            PropertyType::from_code(type_byte).ok_or(CodecError::InvalidType(type_byte))?;
        if wire_type == PropertyType::None {
            return Err(CodecError::InvalidType(type_byte));
        }

        let aspect = if mode >= Verbosity::Terse {
            Some(Aspect::from_code(take(buf, &mut at, 1)?[0]))
        } else {
            None
        };
        let name = if mode >= Verbosity::Verbose {
            Some(take_cstr(buf, &mut at)?.to_owned())
        } else {
            None
        };

        let payload = match wire_type {
            PropertyType::None => unreachable!(),
            PropertyType::String => Payload::String(take_cstr(buf, &mut at)?.to_owned()),
            PropertyType::Int => Payload::Int(take_pod(buf, &mut at)?),
            PropertyType::Int2 => Payload::Int2(take_pod(buf, &mut at)?),
            PropertyType::Int3 => Payload::Int3(take_pod(buf, &mut at)?),
            PropertyType::Int4 => Payload::Int4(take_pod(buf, &mut at)?),
            PropertyType::Float => Payload::Float(take_pod(buf, &mut at)?),
            PropertyType::Float2 => Payload::Float2(take_pod(buf, &mut at)?),
            PropertyType::Float3 => Payload::Float3(take_pod(buf, &mut at)?),
            PropertyType::Float4 => Payload::Float4(take_pod(buf, &mut at)?),
            PropertyType::Float3x3 => Payload::Float3x3(take_pod::<Mat3F>(buf, &mut at)?),
            PropertyType::Float4x4 => Payload::Float4x4(take_pod::<Mat4F>(buf, &mut at)?),
            PropertyType::Guid => Payload::Guid(take_pod(buf, &mut at)?),
            PropertyType::Enum => {
                let csv = take_cstr(buf, &mut at)?.to_owned();
                let selection: u64 = take_pod(buf, &mut at)?;
                let mut e = EnumData::from_candidates(crate::enums::split_candidates(&csv));
                e.selection = selection;
                Payload::Enum(e)
            }
            PropertyType::Bool => Payload::Bool(take(buf, &mut at, 1)?[0] != 0),
        };

        self.set_id(id);
        if let Some(aspect) = aspect {
            self.set_aspect(aspect);
        }
        if let Some(name) = name {
            self.set_name(&name);
        }
        self.payload = payload;
        self.sync_storage_flags();
        Ok(at)
    }
}

/// Peeks the property id of a serialized value without decoding it.
pub fn peek_id(buf: &[u8]) -> Result<u32> {
    let mut at = 1;
    take_pod(buf, &mut at)
}
