//! Set-to-XML rendering.

use crate::text::{aspect_to_name, escape, fourcc_to_text, type_to_name};
use crate::{PREFIX, PROPERTY_TAG, SET_TAG};
use prop_set::PropertySet;
use prop_types::Verbosity;
use prop_value::Property;

/// Renders the whole set as one root element wrapping one element per
/// property, in set order. Untyped properties come out as empty strings.
pub fn to_xml_string(set: &PropertySet, mode: Verbosity) -> String {
    let mut out = String::new();
    out.push_str(&format!("<{PREFIX}:{SET_TAG}>\n"));
    for prop in set.iter() {
        write_property(&mut out, prop, mode);
    }
    out.push_str(&format!("</{PREFIX}:{SET_TAG}>\n"));
    out
}

fn write_property(out: &mut String, prop: &Property, mode: Verbosity) {
    out.push_str(&format!(
        "\t<{PREFIX}:{PROPERTY_TAG} id=\"{}\"",
        fourcc_to_text(prop.id())
    ));
    if mode >= Verbosity::Verbose {
        out.push_str(&format!(" name=\"{}\"", escape(prop.name())));
    }
    out.push_str(&format!(" type=\"{}\"", type_to_name(prop.property_type())));
    if mode >= Verbosity::Terse {
        if let Some(aspect) = aspect_to_name(prop.aspect()) {
            out.push_str(&format!(" aspect=\"{aspect}\""));
        }
    }

    match prop.to_display_string() {
        Some(text) => out.push_str(&format!(
            ">{}</{PREFIX}:{PROPERTY_TAG}>\n",
            escape(&text)
        )),
        None => out.push_str(" />\n"),
    }
}
