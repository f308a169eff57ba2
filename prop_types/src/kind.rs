//! Discriminants: payload type, semantic aspect, serialization verbosity.

/// The storage type of a property payload. The byte codes are part of the
/// binary wire format.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropertyType {
    #[default]
    None = 0,
    String = 1,
    Int = 2,
    Int2 = 3,
    Int3 = 4,
    Int4 = 5,
    Float = 6,
    Float2 = 7,
    Float3 = 8,
    Float4 = 9,
    Float3x3 = 10,
    Float4x4 = 11,
    Guid = 12,
    Enum = 13,
    Bool = 14,
}

impl PropertyType {
    pub const COUNT: u8 = 15;

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<PropertyType> {
        Some(match code {
            0 => PropertyType::None,
            1 => PropertyType::String,
            2 => PropertyType::Int,
            3 => PropertyType::Int2,
            4 => PropertyType::Int3,
            5 => PropertyType::Int4,
            6 => PropertyType::Float,
            7 => PropertyType::Float2,
            8 => PropertyType::Float3,
            9 => PropertyType::Float4,
            10 => PropertyType::Float3x3,
            11 => PropertyType::Float4x4,
            12 => PropertyType::Guid,
            13 => PropertyType::Enum,
            14 => PropertyType::Bool,
            _ => return None,
        })
    }

    /// Types that may back a reference property. String and enum payloads
    /// own heap storage and cannot be viewed through a raw target.
    pub const fn is_referenceable(self) -> bool {
        !matches!(
            self,
            PropertyType::None | PropertyType::String | PropertyType::Enum
        )
    }
}

/// A semantic hint orthogonal to the storage type: a string might be a
/// filename, an int might be a packed color. Purely advisory, except where
/// the conversion matrix consults it (boolean wording, RGB packing).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Aspect {
    #[default]
    Generic,
    Filename,
    Directory,
    ColorRgb,
    ColorRgba,
    LatLon,
    ElevAzim,
    RaScDec,
    Quaternion,
    BoolOnOff,
    BoolYesNo,
    BoolTrueFalse,
    BoolEnabled,
    FontDesc,
    Date,
    Time,
    IpAddress,
    /// Application-defined aspect code at or past the named range.
    User(u8),
}

impl Aspect {
    /// Number of named aspect codes; `User` codes start here.
    pub const NAMED_COUNT: u8 = 17;

    pub const fn code(self) -> u8 {
        match self {
            Aspect::Generic => 0,
            Aspect::Filename => 1,
            Aspect::Directory => 2,
            Aspect::ColorRgb => 3,
            Aspect::ColorRgba => 4,
            Aspect::LatLon => 5,
            Aspect::ElevAzim => 6,
            Aspect::RaScDec => 7,
            Aspect::Quaternion => 8,
            Aspect::BoolOnOff => 9,
            Aspect::BoolYesNo => 10,
            Aspect::BoolTrueFalse => 11,
            Aspect::BoolEnabled => 12,
            Aspect::FontDesc => 13,
            Aspect::Date => 14,
            Aspect::Time => 15,
            Aspect::IpAddress => 16,
            Aspect::User(code) => code,
        }
    }

    /// Every byte code maps to an aspect; unrecognized codes become `User`.
    pub const fn from_code(code: u8) -> Aspect {
        match code {
            0 => Aspect::Generic,
            1 => Aspect::Filename,
            2 => Aspect::Directory,
            3 => Aspect::ColorRgb,
            4 => Aspect::ColorRgba,
            5 => Aspect::LatLon,
            6 => Aspect::ElevAzim,
            7 => Aspect::RaScDec,
            8 => Aspect::Quaternion,
            9 => Aspect::BoolOnOff,
            10 => Aspect::BoolYesNo,
            11 => Aspect::BoolTrueFalse,
            12 => Aspect::BoolEnabled,
            13 => Aspect::FontDesc,
            14 => Aspect::Date,
            15 => Aspect::Time,
            16 => Aspect::IpAddress,
            _ => Aspect::User(code),
        }
    }
}

/// Binary serialization verbosity. Each mode is a strict superset of the
/// fields of the one before it.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// id, type, value
    #[default]
    ValuesOnly = 0,
    /// id, type, aspect, value
    Terse = 1,
    /// id, type, aspect, name, value
    Verbose = 2,
}

impl Verbosity {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Verbosity> {
        Some(match code {
            0 => Verbosity::ValuesOnly,
            1 => Verbosity::Terse,
            2 => Verbosity::Verbose,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_codes_roundtrip() {
        for code in 0..PropertyType::COUNT {
            let t = PropertyType::from_code(code).unwrap();
            assert_eq!(t.code(), code);
        }
        assert_eq!(PropertyType::from_code(PropertyType::COUNT), None);
    }

    #[test]
    fn aspect_codes_are_total() {
        for code in 0..=u8::MAX {
            assert_eq!(Aspect::from_code(code).code(), code);
        }
        assert_eq!(Aspect::from_code(200), Aspect::User(200));
    }

    #[test]
    fn referenceable_excludes_owned_storage_types() {
        assert!(PropertyType::Int.is_referenceable());
        assert!(PropertyType::Float4x4.is_referenceable());
        assert!(!PropertyType::String.is_referenceable());
        assert!(!PropertyType::Enum.is_referenceable());
        assert!(!PropertyType::None.is_referenceable());
    }

    #[test]
    fn verbosity_ordering_matches_field_supersets() {
        assert!(Verbosity::ValuesOnly < Verbosity::Terse);
        assert!(Verbosity::Terse < Verbosity::Verbose);
        assert_eq!(Verbosity::from_code(3), None);
    }
}
