//! Lexicon reference tokens.
//!
//! Mapping fields may hold either a literal string or a reference of the form
//! `$lexicon.<category>.<key>`. References are parsed once into
//! [`MappingValue`] and resolved while the configuration is built, so no code
//! outside this crate ever sees reference syntax.
//!
//! # Examples
//!
//! ```
//! use tooldoc_core::{LexiconCategory, MappingValue};
//!
//! let value = MappingValue::parse("$lexicon.acronyms.aks");
//! match value {
//!     MappingValue::Reference(r) => {
//!         assert_eq!(r.category, LexiconCategory::Acronyms);
//!         assert_eq!(r.key, "aks");
//!     }
//!     MappingValue::Literal(_) | MappingValue::Invalid(_) => unreachable!(),
//! }
//!
//! assert_eq!(
//!     MappingValue::parse("Storage"),
//!     MappingValue::Literal("Storage".to_string())
//! );
//! ```

use std::fmt;

/// Prefix marking a lexicon reference.
pub const REFERENCE_PREFIX: &str = "$lexicon.";

/// Lexicon section a reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexiconCategory {
    /// `$lexicon.acronyms.<key>`
    Acronyms,
    /// `$lexicon.abbreviations.<key>`
    Abbreviations,
    /// `$lexicon.compoundWords.<key>`
    CompoundWords,
}

impl LexiconCategory {
    /// Parses the category segment of a reference.
    ///
    /// Returns `None` for sections that cannot be referenced (such as stop
    /// words, which have no canonical value).
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "acronyms" => Some(Self::Acronyms),
            "abbreviations" => Some(Self::Abbreviations),
            "compoundWords" => Some(Self::CompoundWords),
            _ => None,
        }
    }

    /// Returns the segment used in reference syntax.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acronyms => "acronyms",
            Self::Abbreviations => "abbreviations",
            Self::CompoundWords => "compoundWords",
        }
    }
}

impl fmt::Display for LexiconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `$lexicon.<category>.<key>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconRef {
    /// Lexicon section
    pub category: LexiconCategory,
    /// Entry key as written (lookups are case-insensitive)
    pub key: String,
}

impl fmt::Display for LexiconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{REFERENCE_PREFIX}{}.{}", self.category, self.key)
    }
}

/// Value of a reference-capable mapping field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingValue {
    /// Plain string used as-is
    Literal(String),
    /// Well-formed lexicon reference
    Reference(LexiconRef),
    /// Starts with the reference prefix but has an unknown category or no key
    Invalid(String),
}

impl MappingValue {
    /// Parses a raw field value.
    ///
    /// Anything that does not start with `$lexicon.` is a literal. The key is
    /// everything after the category segment, so keys may contain dots.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let Some(rest) = raw.strip_prefix(REFERENCE_PREFIX) else {
            return Self::Literal(raw.to_string());
        };

        let Some((segment, key)) = rest.split_once('.') else {
            return Self::Invalid(raw.to_string());
        };

        match LexiconCategory::from_segment(segment) {
            Some(category) if !key.is_empty() => Self::Reference(LexiconRef {
                category,
                key: key.to_string(),
            }),
            _ => Self::Invalid(raw.to_string()),
        }
    }
}
