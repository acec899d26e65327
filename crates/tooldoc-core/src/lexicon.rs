//! The shared term dictionary.
//!
//! The lexicon is the single authority for how terms are spelled: acronyms
//! ("aks" → "AKS"), abbreviations ("e.g." → "for example"), compound words
//! ("nodejs" → `["node", "js"]`) and stop words. Every other part of the
//! configuration refers to it instead of repeating spellings.
//!
//! All lookups are case-insensitive. Keys are lowercased once by
//! [`Lexicon::normalized`], which the configuration builder calls before the
//! lexicon is shared.
//!
//! # Examples
//!
//! ```
//! use tooldoc_core::Lexicon;
//!
//! # fn example() -> tooldoc_core::Result<()> {
//! let lexicon: Lexicon = serde_json::from_str(
//!     r#"{
//!         "acronyms": { "VM": { "canonical": "VM", "plural": "VMs" } },
//!         "stopWords": ["The", "of"]
//!     }"#,
//! )
//! .unwrap();
//! let lexicon = lexicon.normalized()?;
//!
//! assert_eq!(lexicon.acronym_form("vm"), Some("VM"));
//! assert_eq!(lexicon.acronym_form("vms"), Some("VMs"));
//! assert!(lexicon.is_stop_word("the"));
//! # Ok(())
//! # }
//! ```

use crate::reference::{LexiconCategory, LexiconRef};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Category assigned to acronyms that do not name one.
pub const DEFAULT_ACRONYM_CATEGORY: &str = "acronym";

const fn default_true() -> bool {
    true
}

/// Canonical spelling of an acronym.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Acronym {
    /// Canonical form, e.g. `"AKS"`
    pub canonical: String,
    /// Canonical plural, e.g. `"VMs"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    /// Keep the canonical form when title-casing
    #[serde(default = "default_true")]
    pub preserve_in_title_case: bool,
    /// Category used to pick [`CategoryDefaults`](crate::CategoryDefaults)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Acronym {
    /// Category name, falling back to [`DEFAULT_ACRONYM_CATEGORY`].
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_ACRONYM_CATEGORY)
    }

    /// Canonical singular, or the canonical plural when `plural` is set.
    ///
    /// Falls back to the singular if no plural is configured.
    #[must_use]
    pub fn form(&self, plural: bool) -> &str {
        match &self.plural {
            Some(form) if plural => form,
            _ => &self.canonical,
        }
    }
}

/// Replacement for an abbreviation found in free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Abbreviation {
    /// Text substituted for the abbreviation
    pub canonical: String,
    /// Long-form expansion, for glossaries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansion: Option<String>,
}

/// Central dictionary of canonical terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Lexicon {
    /// Acronyms keyed by lowercase term
    #[serde(default)]
    pub acronyms: BTreeMap<String, Acronym>,
    /// Abbreviations keyed by lowercase term
    #[serde(default)]
    pub abbreviations: BTreeMap<String, Abbreviation>,
    /// Compound words keyed by lowercase term
    #[serde(default)]
    pub compound_words: BTreeMap<String, Vec<String>>,
    /// Lowercase stop words
    #[serde(default)]
    pub stop_words: BTreeSet<String>,
    /// Lowercase plural → lowercase acronym key
    #[serde(skip)]
    plurals: BTreeMap<String, String>,
}

impl Lexicon {
    /// Lowercases every key and builds the plural index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedConfig`] if two keys of the same section
    /// differ only by case, if an acronym's canonical or plural form is
    /// empty or contains whitespace, or if a compound word has no components.
    pub fn normalized(self) -> Result<Self> {
        let acronyms = lowercase_keys("acronyms", self.acronyms)?;
        let abbreviations = lowercase_keys("abbreviations", self.abbreviations)?;
        let compound_words = lowercase_keys("compoundWords", self.compound_words)?;

        for (key, acronym) in &acronyms {
            let forms = std::iter::once(&acronym.canonical).chain(acronym.plural.as_ref());
            for form in forms {
                if form.is_empty() || form.chars().any(char::is_whitespace) {
                    return Err(Error::MalformedConfig {
                        message: format!("acronym '{key}' has form '{form}'; acronym forms must be a single word"),
                        source: None,
                    });
                }
            }
        }

        if let Some((key, _)) = compound_words.iter().find(|(_, parts)| parts.is_empty()) {
            return Err(Error::MalformedConfig {
                message: format!("compound word '{key}' has no components"),
                source: None,
            });
        }

        let stop_words = self
            .stop_words
            .into_iter()
            .map(|word| word.trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();

        let plurals = acronyms
            .iter()
            .filter_map(|(key, acronym)| {
                acronym
                    .plural
                    .as_ref()
                    .map(|plural| (plural.to_lowercase(), key.clone()))
            })
            .collect();

        Ok(Self {
            acronyms,
            abbreviations,
            compound_words,
            stop_words,
            plurals,
        })
    }

    /// Looks up an acronym by its singular key.
    #[must_use]
    pub fn acronym(&self, term: &str) -> Option<&Acronym> {
        self.acronyms.get(&term.to_lowercase())
    }

    /// Looks up an acronym by its singular key or its plural.
    ///
    /// The boolean is `true` when `term` matched the plural.
    #[must_use]
    pub fn acronym_match(&self, term: &str) -> Option<(&Acronym, bool)> {
        let lower = term.to_lowercase();
        if let Some(acronym) = self.acronyms.get(&lower) {
            return Some((acronym, false));
        }
        self.plurals
            .get(&lower)
            .and_then(|key| self.acronyms.get(key))
            .map(|acronym| (acronym, true))
    }

    /// Canonical spelling of `term` if it is a known acronym or acronym plural.
    #[must_use]
    pub fn acronym_form(&self, term: &str) -> Option<&str> {
        self.acronym_match(term)
            .map(|(acronym, plural)| acronym.form(plural))
    }

    /// Looks up an abbreviation.
    #[must_use]
    pub fn abbreviation(&self, term: &str) -> Option<&Abbreviation> {
        self.abbreviations.get(&term.to_lowercase())
    }

    /// Components of a compound word.
    #[must_use]
    pub fn compound(&self, term: &str) -> Option<&[String]> {
        self.compound_words
            .get(&term.to_lowercase())
            .map(Vec::as_slice)
    }

    /// Returns `true` if `term` is a stop word.
    #[must_use]
    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(&term.to_lowercase())
    }

    /// Resolves a reference to the canonical value it names.
    ///
    /// Compound words resolve to their components joined with `-`.
    #[must_use]
    pub fn resolve(&self, reference: &LexiconRef) -> Option<String> {
        match reference.category {
            LexiconCategory::Acronyms => self
                .acronym(&reference.key)
                .map(|acronym| acronym.canonical.clone()),
            LexiconCategory::Abbreviations => self
                .abbreviation(&reference.key)
                .map(|abbreviation| abbreviation.canonical.clone()),
            LexiconCategory::CompoundWords => self.compound(&reference.key).map(|parts| parts.join("-")),
        }
    }
}

fn lowercase_keys<V>(section: &str, entries: BTreeMap<String, V>) -> Result<BTreeMap<String, V>> {
    let mut out = BTreeMap::new();
    for (key, value) in entries {
        let lower = key.trim().to_lowercase();
        if lower.is_empty() {
            return Err(Error::MalformedConfig {
                message: format!("lexicon.{section} contains an empty key"),
                source: None,
            });
        }
        if out.insert(lower, value).is_some() {
            return Err(Error::MalformedConfig {
                message: format!("lexicon.{section} has duplicate key '{key}' (keys are case-insensitive)"),
                source: None,
            });
        }
    }
    Ok(out)
}
