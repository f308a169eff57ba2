//! Reference targets: typed views into caller-owned memory.
//!
//! A reference property does not own its payload; it reads and writes
//! through one of these targets. The caller must keep the pointed-to memory
//! valid and exclusively reachable through this target for as long as the
//! property holds it — that contract is not checked here, and violating it
//! is undefined behavior. String and enum payloads own heap storage and
//! have no target variant, so they can never be referenced.

use crate::property::Payload;
use prop_types::{Guid, Mat3F, Mat4F, PropertyType, Vec2F, Vec2I, Vec3F, Vec3I, Vec4F, Vec4I};
use std::ptr::NonNull;

/// A typed pointer to externally-owned property storage.
#[derive(Clone, Copy, Debug)]
pub enum RefTarget {
    Int(NonNull<i64>),
    Int2(NonNull<Vec2I>),
    Int3(NonNull<Vec3I>),
    Int4(NonNull<Vec4I>),
    Float(NonNull<f32>),
    Float2(NonNull<Vec2F>),
    Float3(NonNull<Vec3F>),
    Float4(NonNull<Vec4F>),
    Float3x3(NonNull<Mat3F>),
    Float4x4(NonNull<Mat4F>),
    Guid(NonNull<Guid>),
    Bool(NonNull<bool>),
}

impl RefTarget {
    /// The property type this target is locked to.
    pub fn property_type(&self) -> PropertyType {
        match self {
            RefTarget::Int(_) => PropertyType::Int,
            RefTarget::Int2(_) => PropertyType::Int2,
            RefTarget::Int3(_) => PropertyType::Int3,
            RefTarget::Int4(_) => PropertyType::Int4,
            RefTarget::Float(_) => PropertyType::Float,
            RefTarget::Float2(_) => PropertyType::Float2,
            RefTarget::Float3(_) => PropertyType::Float3,
            RefTarget::Float4(_) => PropertyType::Float4,
            RefTarget::Float3x3(_) => PropertyType::Float3x3,
            RefTarget::Float4x4(_) => PropertyType::Float4x4,
            RefTarget::Guid(_) => PropertyType::Guid,
            RefTarget::Bool(_) => PropertyType::Bool,
        }
    }

    /// Copies the current target value into an owned payload.
    pub(crate) fn read(&self) -> Payload {
        // SAFETY: the caller guaranteed target validity when installing the
        // reference (see module docs).
        unsafe {
            match self {
                RefTarget::Int(p) => Payload::Int(*p.as_ptr()),
                RefTarget::Int2(p) => Payload::Int2(*p.as_ptr()),
                RefTarget::Int3(p) => Payload::Int3(*p.as_ptr()),
                RefTarget::Int4(p) => Payload::Int4(*p.as_ptr()),
                RefTarget::Float(p) => Payload::Float(*p.as_ptr()),
                RefTarget::Float2(p) => Payload::Float2(*p.as_ptr()),
                RefTarget::Float3(p) => Payload::Float3(*p.as_ptr()),
                RefTarget::Float4(p) => Payload::Float4(*p.as_ptr()),
                RefTarget::Float3x3(p) => Payload::Float3x3(*p.as_ptr()),
                RefTarget::Float4x4(p) => Payload::Float4x4(*p.as_ptr()),
                RefTarget::Guid(p) => Payload::Guid(*p.as_ptr()),
                RefTarget::Bool(p) => Payload::Bool(*p.as_ptr()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_reads_track_backing_memory() {
        let mut backing = 7i64;
        let target = RefTarget::Int(NonNull::from(&mut backing));

        assert_eq!(target.property_type(), PropertyType::Int);
        match target.read() {
            Payload::Int(v) => assert_eq!(v, 7),
            other => panic!("unexpected payload {other:?}"),
        }

        backing = -3;
        match target.read() {
            Payload::Int(v) => assert_eq!(v, -3),
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
