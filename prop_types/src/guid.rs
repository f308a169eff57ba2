//! 16-byte GUID payload with the braces-and-dashes text form.

use bytemuck_derive::{Pod, Zeroable};
use std::fmt;

/// A GUID in the classic `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}` layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Guid {
            data1,
            data2,
            data3,
            data4,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Guid::default()
    }

    /// Scans the braces-and-dashes hex form back into a GUID.
    ///
    /// Returns `None` when the text does not match the layout; callers that
    /// want the permissive coercion default should fall back to
    /// `Guid::default()`.
    pub fn parse_braced(s: &str) -> Option<Guid> {
        let s = s.trim();
        let inner = s.strip_prefix('{')?.strip_suffix('}')?;
        let mut parts = inner.split('-');

        let d1 = parts.next()?;
        let d2 = parts.next()?;
        let d3 = parts.next()?;
        let d4a = parts.next()?;
        let d4b = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        if d1.len() != 8 || d2.len() != 4 || d3.len() != 4 || d4a.len() != 4 || d4b.len() != 12 {
            return None;
        }

        let data1 = u32::from_str_radix(d1, 16).ok()?;
        let data2 = u16::from_str_radix(d2, 16).ok()?;
        let data3 = u16::from_str_radix(d3, 16).ok()?;

        let mut data4 = [0u8; 8];
        for (i, chunk) in d4a.as_bytes().chunks(2).enumerate() {
            data4[i] = u8::from_str_radix(std::str::from_utf8(chunk).ok()?, 16).ok()?;
        }
        for (i, chunk) in d4b.as_bytes().chunks(2).enumerate() {
            data4[2 + i] = u8::from_str_radix(std::str::from_utf8(chunk).ok()?, 16).ok()?;
        }

        Some(Guid {
            data1,
            data2,
            data3,
            data4,
        })
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}}}",
            self.data1,
            self.data2,
            self.data3,
            self.data4[0],
            self.data4[1],
            self.data4[2],
            self.data4[3],
            self.data4[4],
            self.data4[5],
            self.data4[6],
            self.data4[7],
        )
    }
}
