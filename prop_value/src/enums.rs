//! Enumerated-string backing for enum-typed properties: either an owned,
//! ordered candidate list or a borrowed dynamic provider.

use crate::property::Property;
use std::fmt;
use std::rc::Weak;

/// Supplies enum candidate strings dynamically instead of an owned list.
///
/// The provider is held weakly; the registering caller keeps it alive. A
/// dropped provider behaves as a zero-candidate source.
pub trait EnumProvider {
    /// Number of candidate strings this provider exposes for `prop`.
    fn count(&self, prop: &Property) -> usize;

    /// The candidate at `ordinal`, or `None` when out of range.
    fn value_at(&self, prop: &Property, ordinal: usize) -> Option<String>;
}

/// Where an enum property's candidates come from.
#[derive(Clone)]
pub enum EnumSource {
    /// Owned ordered list. Order is significant; the selection index points
    /// into it. Unique membership is not required.
    Strings(Vec<String>),
    /// Borrowed dynamic provider.
    Provider(Weak<dyn EnumProvider>),
}

impl fmt::Debug for EnumSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumSource::Strings(v) => f.debug_tuple("Strings").field(v).finish(),
            EnumSource::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// An enum payload: candidate source plus the selected index (default 0).
#[derive(Clone, Debug)]
pub(crate) struct EnumData {
    pub(crate) source: EnumSource,
    pub(crate) selection: u64,
}

impl EnumData {
    pub(crate) fn from_candidates(candidates: Vec<String>) -> Self {
        EnumData {
            source: EnumSource::Strings(candidates),
            selection: 0,
        }
    }

    /// Parses the textual wire form: comma-joined candidates, optionally
    /// followed by `:` and a decimal selection index. Text without a valid
    /// `:index` suffix is all candidates, selection 0.
    pub(crate) fn from_wire_text(text: &str) -> Self {
        let (csv, selection) = match text.rsplit_once(':') {
            Some((head, idx))
                if !idx.is_empty() && idx.bytes().all(|b| b.is_ascii_digit()) =>
            {
                (head, idx.parse().unwrap_or(0))
            }
            _ => (text, 0),
        };

        EnumData {
            source: EnumSource::Strings(split_candidates(csv)),
            selection,
        }
    }
}

/// Splits a comma-delimited candidate string. Empty text is an empty list;
/// empty components are preserved as empty candidates.
pub(crate) fn split_candidates(csv: &str) -> Vec<String> {
    if csv.is_empty() {
        Vec::new()
    } else {
        csv.split(',').map(str::to_owned).collect()
    }
}
