//! Bit flags carried by every property.
//!
//! Flags never restrict what library code can do to a property; aside from
//! the lock and storage bits they exist to steer user interfaces.
//!
//! # Examples
//!
//! ```rust
//! use prop_types::Flags;
//!
//! let mut f = Flags::default();
//! f.set(Flags::READONLY | Flags::HIDDEN);
//! assert!(f.is_set(Flags::READONLY));
//!
//! f.clear(Flags::HIDDEN);
//! assert!(!f.is_set(Flags::HIDDEN));
//! ```

/// A set of property flags over a 32-bit word.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Flags(u32);

impl Flags {
    /// The property must not be renamed or removed.
    pub const REQUIRED: u32 = 1 << 0;
    /// Not editable by the user.
    pub const READONLY: u32 = 1 << 1;
    /// Not viewable by the user.
    pub const HIDDEN: u32 = 1 << 2;
    /// Should be surfaced by a tooltip helper.
    pub const TOOLTIP_ITEM: u32 = 1 << 3;
    /// The type may not be changed; setters for other types become no-ops.
    pub const TYPE_LOCKED: u32 = 1 << 4;
    /// The aspect may not be changed.
    pub const ASPECT_LOCKED: u32 = 1 << 5;
    /// The payload is a view into caller-owned memory.
    pub const REFERENCE: u32 = 1 << 6;
    /// Enum candidates come from a dynamic provider, not an owned list.
    pub const ENUM_PROVIDER: u32 = 1 << 7;
    /// First bit available for application-defined flags.
    pub const FIRST_USER: u32 = 1 << 8;

    /// Bits that describe how a property stores its payload rather than what
    /// the payload means. Preserved across wholesale flag overwrites.
    pub const STORAGE_MASK: u32 = Self::REFERENCE | Self::ENUM_PROVIDER;

    pub const fn new(bits: u32) -> Self {
        Flags(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn set_all(&mut self, bits: u32) {
        self.0 = bits;
    }

    pub fn set(&mut self, f: u32) {
        self.0 |= f;
    }

    pub fn clear(&mut self, f: u32) {
        self.0 &= !f;
    }

    pub fn toggle(&mut self, f: u32) {
        self.0 ^= f;
    }

    /// True when every bit in `f` is set.
    pub const fn is_set(self, f: u32) -> bool {
        self.0 & f == f
    }

    /// True when at least one bit in `f` is set.
    pub const fn any_set(self, f: u32) -> bool {
        self.0 & f != 0
    }
}

impl From<u32> for Flags {
    fn from(bits: u32) -> Self {
        Flags(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_flag_ops() {
        let mut f = Flags::default();
        assert_eq!(f.bits(), 0);

        f.set(Flags::REQUIRED | Flags::TYPE_LOCKED);
        assert!(f.is_set(Flags::REQUIRED));
        assert!(f.is_set(Flags::TYPE_LOCKED));
        assert!(!f.is_set(Flags::REQUIRED | Flags::HIDDEN));
        assert!(f.any_set(Flags::REQUIRED | Flags::HIDDEN));

        f.toggle(Flags::REQUIRED);
        assert!(!f.is_set(Flags::REQUIRED));

        f.set_all(Flags::FIRST_USER << 2);
        assert_eq!(f.bits(), Flags::FIRST_USER << 2);
    }

    #[test]
    fn storage_mask_covers_reference_and_provider() {
        let mut f = Flags::default();
        f.set(Flags::REFERENCE | Flags::ENUM_PROVIDER | Flags::HIDDEN);
        f.clear(!Flags::STORAGE_MASK);
        assert_eq!(f.bits(), Flags::REFERENCE | Flags::ENUM_PROVIDER);
    }
}
