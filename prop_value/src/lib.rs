//! # prop_value
//!
//! A self-describing, convertible property value: one tagged payload out of
//! a fixed set of scalar/vector/matrix/string/enum/GUID types, plus a
//! semantic aspect, a flag bitset, and a compact binary codec with three
//! verbosity modes.
//!
//! ```rust
//! use prop_types::{fourcc, PropertyType};
//! use prop_value::Property;
//!
//! let mut p = Property::new("answer", fourcc(*b"ANSW"));
//! p.set_int(42);
//! assert_eq!(p.as_string(), "42");
//!
//! assert!(p.convert_to(PropertyType::String));
//! assert!(p.convert_to(PropertyType::Int));
//! assert_eq!(p.as_int(), 42);
//! ```

pub mod binary;
pub mod enums;
pub mod property;
pub mod reference;

mod convert;
mod scan;

pub use binary::{peek_id, CodecError, Result};
pub use enums::{EnumProvider, EnumSource};
pub use property::Property;
pub use reference::RefTarget;
