//! Newtype wrappers for section indices and document identifiers
//!
//! These types keep the zero-based section position apart from the
//! one-based numbers shown to readers, and keep the opaque document id
//! apart from arbitrary strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A zero-based position of a section within a document.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionIndex(usize);

impl SectionIndex {
    /// The first section.
    pub const FIRST: SectionIndex = SectionIndex(0);

    /// Creates a new SectionIndex without range checking
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Validates a raw (possibly negative) target against the section count.
    ///
    /// Returns `None` when `raw` is negative or `>= total`.
    pub fn checked(raw: i64, total: usize) -> Option<Self> {
        let index = usize::try_from(raw).ok()?;
        (index < total).then_some(Self(index))
    }

    /// Clamps a raw value into `[0, total)`. With no sections the result is 0.
    pub fn clamped(raw: i64, total: usize) -> Self {
        let max = total.saturating_sub(1);
        match usize::try_from(raw) {
            Ok(index) => Self(index.min(max)),
            Err(_) => Self::FIRST,
        }
    }

    /// Returns the zero-based value
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the one-based number shown to readers.
    pub const fn ordinal(self) -> usize {
        self.0 + 1
    }

    /// The raw index as a signed value, for computing neighbours that may
    /// fall outside the document.
    pub fn as_i64(self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }

    /// The following index, if it lies inside the document.
    pub fn next_within(self, total: usize) -> Option<Self> {
        let next = self.0.checked_add(1)?;
        (next < total).then_some(Self(next))
    }

    /// Whether this is the last section of a document of `total` sections.
    pub fn is_last(self, total: usize) -> bool {
        self.0 + 1 >= total
    }
}

impl From<usize> for SectionIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for SectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque identifier of the document (the post id on the server).
///
/// The page may inject it either as a number or as a string, so both are
/// accepted when deserializing.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DocumentId(Arc<str>);

impl DocumentId {
    /// Creates a new DocumentId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this document ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<u64> for DocumentId {
    fn from(id: u64) -> Self {
        Self(id.to_string().into())
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(DocumentId::from(n)),
            Raw::Text(s) => Ok(DocumentId::from(s.trim())),
        }
    }
}
