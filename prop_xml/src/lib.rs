//! # prop_xml
//!
//! XML text form for property sets: a fixed `props:`-prefixed dialect with
//! one element per property. The writer renders from a set directly; the
//! parser walks the text through the [`XmlTokens`] lexer seam, which
//! [`prop_lex::Tokenizer`] satisfies out of the box.
//!
//! ```rust
//! use prop_set::PropertySet;
//! use prop_types::{fourcc, Verbosity};
//!
//! let mut set = PropertySet::new();
//! set.create_property("x", fourcc(*b"ABCD")).set_int(42);
//!
//! let text = prop_xml::to_xml_string(&set, Verbosity::Terse);
//! assert!(text.contains(r#"id="ABCD""#));
//!
//! let mut parsed = PropertySet::new();
//! prop_xml::from_xml_string(&mut parsed, &text).unwrap();
//! assert_eq!(parsed.property_by_id(0x41424344).unwrap().as_int(), 42);
//! ```

mod reader;
mod text;
mod tokens;
mod writer;

pub use reader::{from_xml, from_xml_string, XmlError};
pub use tokens::{XmlTokenKind, XmlTokens};
pub use writer::to_xml_string;

/// Namespace prefix every element tag must carry.
pub const PREFIX: &str = "props";
/// Root wrapper element name (without the prefix).
pub const SET_TAG: &str = "property_set";
/// Per-property element name (without the prefix).
pub const PROPERTY_TAG: &str = "property";
