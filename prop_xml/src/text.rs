//! Text-level helpers shared by the writer and parser: attribute/content
//! escaping, the four-char-code id encoding, and the type/aspect literal
//! vocabularies.

use prop_types::{Aspect, FourCC, PropertyType};

pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Reverses [`escape`], including decimal character references. Malformed
/// references pass through literally.
pub(crate) fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let Some(semi) = rest.find(';') else {
            break;
        };
        let entity = &rest[1..semi];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            _ => match entity
                .strip_prefix('#')
                .and_then(|d| d.parse::<u32>().ok())
                .and_then(char::from_u32)
            {
                Some(c) => out.push(c),
                None => {
                    out.push('&');
                    rest = &rest[1..];
                    continue;
                }
            },
        }
        rest = &rest[semi + 1..];
    }
    out.push_str(rest);
    out
}

/// Renders a four-char code most-significant byte first, skipping zero
/// bytes; alphanumeric bytes go out literally, anything else as a decimal
/// character reference.
pub(crate) fn fourcc_to_text(id: FourCC) -> String {
    let mut out = String::new();
    for shift in [24u32, 16, 8, 0] {
        let byte = (id >> shift) as u8;
        if byte == 0 {
            continue;
        }
        if byte.is_ascii_alphanumeric() {
            out.push(byte as char);
        } else {
            out.push_str(&format!("&#{byte};"));
        }
    }
    out
}

/// Folds the textual id form back into a four-char code.
pub(crate) fn fourcc_from_text(s: &str) -> FourCC {
    let mut id: FourCC = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let (value, next) = match rest.strip_prefix("&#") {
            Some(tail) => match tail.find(';') {
                Some(semi) => (
                    tail[..semi].parse::<u32>().unwrap_or(0),
                    &tail[semi + 1..],
                ),
                None => break,
            },
            None => {
                let c = rest.chars().next().unwrap();
                (c as u32, &rest[c.len_utf8()..])
            }
        };
        id = (id << 8) | (value & 0xFF);
        rest = next;
    }
    id
}

/// The `type` attribute literal for a property type. Types without a
/// literal of their own travel as their string form.
pub(crate) fn type_to_name(t: PropertyType) -> &'static str {
    match t {
        PropertyType::Bool => "BOOLEAN",
        PropertyType::Enum => "ENUM",
        PropertyType::Float => "FLOAT",
        PropertyType::Float2 => "FLOAT_V2",
        PropertyType::Float3 => "FLOAT_V3",
        PropertyType::Float4 => "FLOAT_V4",
        PropertyType::Guid => "GUID",
        PropertyType::Int => "INT",
        PropertyType::Int2 => "INT_V2",
        PropertyType::Int3 => "INT_V3",
        PropertyType::Int4 => "INT_V4",
        PropertyType::None
        | PropertyType::String
        | PropertyType::Float3x3
        | PropertyType::Float4x4 => "STRING",
    }
}

/// Parses a `type` attribute; unknown literals fall back to string.
pub(crate) fn type_from_name(s: &str) -> PropertyType {
    const NAMES: &[(&str, PropertyType)] = &[
        ("BOOLEAN", PropertyType::Bool),
        ("ENUM", PropertyType::Enum),
        ("FLOAT", PropertyType::Float),
        ("FLOAT_V2", PropertyType::Float2),
        ("FLOAT_V3", PropertyType::Float3),
        ("FLOAT_V4", PropertyType::Float4),
        ("GUID", PropertyType::Guid),
        ("INT", PropertyType::Int),
        ("INT_V2", PropertyType::Int2),
        ("INT_V3", PropertyType::Int3),
        ("INT_V4", PropertyType::Int4),
        ("STRING", PropertyType::String),
    ];
    NAMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map_or(PropertyType::String, |&(_, t)| t)
}

/// The `aspect` attribute text; `None` for the generic aspect, which is
/// never written. Codes outside the named vocabulary go out as decimal.
pub(crate) fn aspect_to_name(a: Aspect) -> Option<String> {
    let name = match a {
        Aspect::Generic => return None,
        Aspect::Filename => "FILENAME",
        Aspect::Directory => "DIRECTORY",
        Aspect::ColorRgb => "COLOR_RGB",
        Aspect::ColorRgba => "COLOR_RGBA",
        Aspect::LatLon => "LATLON",
        Aspect::ElevAzim => "ELEVAZIM",
        Aspect::RaScDec => "RASCDEC",
        Aspect::Quaternion => "QUATERNION",
        Aspect::BoolOnOff => "BOOL_ONOFF",
        Aspect::BoolYesNo => "BOOL_YESNO",
        Aspect::BoolTrueFalse => "BOOL_TRUEFALSE",
        Aspect::BoolEnabled => "BOOL_ABLED",
        Aspect::FontDesc => "FONT_DESC",
        Aspect::Date => "DATE",
        Aspect::Time => "TIME",
        Aspect::IpAddress => "IPADDRESS",
        Aspect::User(code) => return Some(code.to_string()),
    };
    Some(name.to_owned())
}

/// Parses an `aspect` attribute: a named literal, a decimal code, or
/// (for anything unrecognized) generic.
pub(crate) fn aspect_from_name(s: &str) -> Aspect {
    const NAMES: &[(&str, Aspect)] = &[
        ("FILENAME", Aspect::Filename),
        ("DIRECTORY", Aspect::Directory),
        ("COLOR_RGB", Aspect::ColorRgb),
        ("COLOR_RGBA", Aspect::ColorRgba),
        ("LATLON", Aspect::LatLon),
        ("ELEVAZIM", Aspect::ElevAzim),
        ("RASCDEC", Aspect::RaScDec),
        ("QUATERNION", Aspect::Quaternion),
        ("BOOL_ONOFF", Aspect::BoolOnOff),
        ("BOOL_YESNO", Aspect::BoolYesNo),
        ("BOOL_TRUEFALSE", Aspect::BoolTrueFalse),
        ("BOOL_ABLED", Aspect::BoolEnabled),
        ("FONT_DESC", Aspect::FontDesc),
        ("DATE", Aspect::Date),
        ("TIME", Aspect::Time),
        ("IPADDRESS", Aspect::IpAddress),
    ];
    if let Some(&(_, a)) = NAMES.iter().find(|(name, _)| name.eq_ignore_ascii_case(s)) {
        return a;
    }
    match s.trim().parse::<u8>() {
        Ok(code) => Aspect::from_code(code),
        Err(_) => Aspect::Generic,
    }
}
