//! XML-to-set parsing, driven entirely through the [`XmlTokens`] seam.
//!
//! Structural errors abort the whole parse; properties already created or
//! mutated before the failing element stay applied, so a failed parse can
//! leave the target set partially updated.

use crate::text::{aspect_from_name, fourcc_from_text, type_from_name, unescape};
use crate::tokens::{XmlTokenKind, XmlTokens};
use crate::{PREFIX, PROPERTY_TAG, SET_TAG};
use log::warn;
use prop_lex::Tokenizer;
use prop_set::PropertySet;
use prop_types::FourCC;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XmlError {
    #[error("unexpected end of document")]
    UnexpectedEof,
    #[error("unexpected token {0:?}")]
    UnexpectedToken(String),
    #[error("element tag lacks the \"{PREFIX}\" namespace prefix")]
    MissingPrefix,
    #[error("unknown element {0:?}")]
    UnknownElement(String),
    #[error("malformed attribute list {0:?}")]
    MalformedAttributes(String),
}

pub type Result<T> = std::result::Result<T, XmlError>;

/// Parses `text` with the bundled tokenizer. See [`from_xml`].
pub fn from_xml_string(set: &mut PropertySet, text: &str) -> Result<()> {
    from_xml::<Tokenizer>(set, text)
}

/// Parses an XML document into `set` through any [`XmlTokens`] lexer,
/// merging elements into existing properties by id (then by name), and
/// creating the rest.
pub fn from_xml<'a, L: XmlTokens<'a>>(set: &mut PropertySet, text: &'a str) -> Result<()> {
    let result = parse_document::<L>(set, text);
    if let Err(err) = &result {
        warn!("xml parse aborted: {err}");
    }
    result
}

fn parse_document<'a, L: XmlTokens<'a>>(set: &mut PropertySet, text: &'a str) -> Result<()> {
    let mut lex = L::tokenize(text);
    loop {
        match lex.advance() {
            XmlTokenKind::End => return Ok(()),
            _ if lex.token_is("<") => parse_tag(set, &mut lex)?,
            _ => return Err(XmlError::UnexpectedToken(lex.token_text().to_owned())),
        }
    }
}

/// One tag, cursor just past the `<`.
fn parse_tag<'a, L: XmlTokens<'a>>(set: &mut PropertySet, lex: &mut L) -> Result<()> {
    match lex.advance() {
        XmlTokenKind::End => Err(XmlError::UnexpectedEof),
        _ if lex.token_is("/") || lex.token_is("!") => {
            // closing tag or comment: skipped wholesale
            lex.read_until('>').ok_or(XmlError::UnexpectedEof)?;
            Ok(())
        }
        XmlTokenKind::Identifier if lex.token_is(PREFIX) => {
            if lex.advance() == XmlTokenKind::End || !lex.token_is(":") {
                return Err(XmlError::MissingPrefix);
            }
            if lex.advance() != XmlTokenKind::Identifier {
                return Err(XmlError::UnexpectedToken(lex.token_text().to_owned()));
            }
            let tag = lex.token_text();
            let attrs_text = lex.read_until('>').ok_or(XmlError::UnexpectedEof)?;

            if tag.eq_ignore_ascii_case(SET_TAG) {
                // root wrapper: nothing to apply
                return Ok(());
            }
            if !tag.eq_ignore_ascii_case(PROPERTY_TAG) {
                return Err(XmlError::UnknownElement(tag.to_owned()));
            }
            parse_property(set, lex, attrs_text)
        }
        _ => Err(XmlError::MissingPrefix),
    }
}

#[derive(Default)]
struct Attrs {
    id: Option<FourCC>,
    name: Option<String>,
    type_name: Option<String>,
    aspect: Option<String>,
    self_closing: bool,
}

/// Nested pass over the captured tag text, as generic `key = "value"`
/// pairs. Unknown keys are ignored; anything not shaped like a pair
/// aborts.
fn parse_attrs<'a, L: XmlTokens<'a>>(text: &'a str) -> Result<Attrs> {
    let mut attrs = Attrs {
        self_closing: text.trim_end().ends_with('/'),
        ..Attrs::default()
    };

    let mut lex = L::tokenize(text);
    loop {
        match lex.advance() {
            XmlTokenKind::End => return Ok(attrs),
            _ if lex.token_is("/") => continue,
            XmlTokenKind::Identifier => {
                let key = lex.token_text();
                lex.advance();
                if !lex.token_is("=") {
                    return Err(XmlError::MalformedAttributes(text.to_owned()));
                }
                if lex.advance() != XmlTokenKind::QuotedString {
                    return Err(XmlError::MalformedAttributes(text.to_owned()));
                }
                let value = lex.token_text();
                if key.eq_ignore_ascii_case("id") {
                    attrs.id = Some(fourcc_from_text(value));
                } else if key.eq_ignore_ascii_case("name") {
                    attrs.name = Some(unescape(value));
                } else if key.eq_ignore_ascii_case("type") {
                    attrs.type_name = Some(value.to_owned());
                } else if key.eq_ignore_ascii_case("aspect") {
                    attrs.aspect = Some(value.to_owned());
                }
            }
            _ => return Err(XmlError::MalformedAttributes(text.to_owned())),
        }
    }
}

fn parse_property<'a, L: XmlTokens<'a>>(
    set: &mut PropertySet,
    lex: &mut L,
    attrs_text: &'a str,
) -> Result<()> {
    let attrs = parse_attrs::<L>(attrs_text)?;

    let content = if attrs.self_closing {
        String::new()
    } else {
        let raw = lex.read_until('<').ok_or(XmlError::UnexpectedEof)?;
        // the consumed '<' opens this element's closing tag
        if lex.advance() == XmlTokenKind::End || !lex.token_is("/") {
            return Err(XmlError::UnexpectedToken(lex.token_text().to_owned()));
        }
        lex.read_until('>').ok_or(XmlError::UnexpectedEof)?;
        unescape(raw)
    };

    let id = attrs.id.unwrap_or(0);
    let target_id = if set.property_by_id(id).is_some() {
        id
    } else if let Some(existing) = attrs.name.as_deref().and_then(|n| set.property_by_name(n)) {
        existing.id()
    } else {
        set.create_property(attrs.name.as_deref().unwrap_or(""), id);
        id
    };

    let declared = type_from_name(attrs.type_name.as_deref().unwrap_or("STRING"));
    set.modify_by_id(target_id, |p| {
        if let Some(name) = &attrs.name {
            p.set_name(name);
        }
        if let Some(aspect) = &attrs.aspect {
            p.set_aspect(aspect_from_name(aspect));
        }
        p.set_string(&content);
        p.convert_to(declared);
    });
    Ok(())
}
