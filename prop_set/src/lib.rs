//! # prop_set
//!
//! An ordered, id-indexed collection of [`prop_value::Property`] values
//! with find-or-create access, whole-set merge and assignment, a change
//! listener hook, and a binary codec that frames the per-value codec with
//! a count header.
//!
//! ```rust
//! use prop_types::fourcc;
//! use prop_set::PropertySet;
//!
//! let mut set = PropertySet::new();
//! set.create_property("width", fourcc(*b"WDTH")).set_int(800);
//! set.create_property("height", fourcc(*b"HGHT")).set_int(600);
//!
//! assert_eq!(set.property_count(), 2);
//! assert_eq!(set.property_by_name("WIDTH").unwrap().as_int(), 800);
//! ```

mod codec;
mod set;

pub use set::{ChangeListener, PropertySet};
