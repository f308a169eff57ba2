//! # prop_types
//!
//! Primitive vocabulary shared by the property container crates: the flag
//! bitset, the Pod vector/matrix/GUID payload types, and the discriminant
//! enums (`PropertyType`, `Aspect`, `Verbosity`).

pub mod flags;
pub mod guid;
pub mod kind;
pub mod vec;

pub use flags::Flags;
pub use guid::Guid;
pub use kind::{Aspect, PropertyType, Verbosity};
pub use vec::{Mat3F, Mat4F, Vec2F, Vec2I, Vec3F, Vec3I, Vec4F, Vec4I};

/// Property ids are four-character codes packed into 32 bits,
/// most-significant byte first.
pub type FourCC = u32;

/// Packs a four-byte tag into a [`FourCC`] id.
///
/// ```
/// use prop_types::fourcc;
///
/// assert_eq!(fourcc(*b"ABCD"), 0x4142_4344);
/// ```
pub const fn fourcc(tag: [u8; 4]) -> FourCC {
    (tag[0] as u32) << 24 | (tag[1] as u32) << 16 | (tag[2] as u32) << 8 | tag[3] as u32
}
