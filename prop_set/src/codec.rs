//! Whole-set binary framing: an `i16` property count followed by the
//! per-value records, in insertion order and native byte order.
//!
//! Decoding merges into the existing set by id, creating missing
//! properties, so a set can be refreshed from a newer snapshot without
//! losing properties the snapshot does not mention. Errors abort decoding
//! at the failing record; earlier records stay applied.

use crate::set::PropertySet;
use log::debug;
use prop_value::{peek_id, CodecError, Result};
use prop_types::Verbosity;
use std::mem::size_of;

impl PropertySet {
    /// Exact encoded size of the whole set for `mode`.
    pub fn serialized_size(&self, mode: Verbosity) -> Result<usize> {
        if self.property_count() > i16::MAX as usize {
            return Err(CodecError::TooManyProperties(self.property_count()));
        }
        let mut size = size_of::<i16>();
        for prop in self.iter() {
            size += prop.serialized_size(mode)?;
        }
        Ok(size)
    }

    /// Serializes the whole set into `buf`, returning the bytes written.
    /// The size check happens before any write.
    pub fn serialize_into(&self, mode: Verbosity, buf: &mut [u8]) -> Result<usize> {
        let need = self.serialized_size(mode)?;
        if buf.len() < need {
            return Err(CodecError::BufferTooSmall {
                need,
                got: buf.len(),
            });
        }

        let count = self.property_count() as i16;
        buf[..size_of::<i16>()].copy_from_slice(&count.to_ne_bytes());
        let mut at = size_of::<i16>();
        for prop in self.iter() {
            at += prop.serialize_into(mode, &mut buf[at..])?;
        }

        debug_assert_eq!(at, need);
        Ok(at)
    }

    /// Decodes a serialized set from the front of `buf`, merging each
    /// record into this set by id, and returns the bytes consumed. A
    /// non-positive count decodes as an empty set.
    pub fn deserialize(&mut self, buf: &[u8]) -> Result<usize> {
        if buf.len() < size_of::<i16>() {
            return Err(CodecError::UnexpectedEof);
        }
        let count = i16::from_ne_bytes([buf[0], buf[1]]);
        debug!("decoding property set: {count} records");

        let mut at = size_of::<i16>();
        for _ in 0..count.max(0) {
            let id = peek_id(&buf[at..])?;
            at += self.slot_for_decode(id).deserialize_into(&buf[at..])?;
            self.notify_id(id);
        }
        Ok(at)
    }
}
