//! Naming configuration.
//!
//! A [`Configuration`] bundles the [`Lexicon`] with the tables that refer to
//! it: service mappings, parameter mappings, named context rules and
//! per-category defaults. It is built once from a document, validated,
//! reference-resolved, and never mutated afterwards, so it can be shared
//! across threads behind an `Arc`.
//!
//! # Document shape
//!
//! ```json
//! {
//!   "lexicon": {
//!     "acronyms": { "aks": { "canonical": "AKS" } },
//!     "abbreviations": { "e.g.": { "canonical": "for example" } },
//!     "compoundWords": { "appconfig": ["app", "config"] },
//!     "stopWords": ["a", "of", "the"]
//!   },
//!   "services": [
//!     { "id": "aks", "shortName": "$lexicon.acronyms.aks", "brandName": "Azure Kubernetes Service" }
//!   ],
//!   "parameters": [ { "name": "subscriptionId", "display": "subscription ID" } ],
//!   "contexts": { "filename": { "rules": { "stopWords": "remove" } } },
//!   "categoryDefaults": { "acronym": { "filename": "lowercase" } }
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! use tooldoc_core::Configuration;
//!
//! # fn example() -> tooldoc_core::Result<()> {
//! let config = Configuration::from_json_str(
//!     r#"{
//!         "lexicon": { "acronyms": { "aks": { "canonical": "AKS" } } },
//!         "services": [ { "id": "aks", "shortName": "$lexicon.acronyms.aks" } ]
//!     }"#,
//! )?;
//!
//! let service = config.service("AKS").unwrap();
//! assert_eq!(service.short_name.as_deref(), Some("AKS"));
//! # Ok(())
//! # }
//! ```

use crate::lexicon::Lexicon;
use crate::reference::MappingValue;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Context consulted by filename cleaning.
pub const FILENAME_CONTEXT: &str = "filename";

/// Context used for service display names.
pub const DISPLAY_CONTEXT: &str = "display";

/// Conventional context for document titles.
pub const TITLE_CASE_CONTEXT: &str = "titleCase";

/// Rule name selecting the [`StopWordPolicy`] of a context.
pub const STOP_WORDS_RULE: &str = "stopWords";

const fn default_true() -> bool {
    true
}

/// Explicit naming for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceMapping {
    /// Source identifier, e.g. `"aks"`
    #[serde(alias = "area")]
    pub id: String,
    /// Short name (reference-capable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Brand or display name (reference-capable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// Explicit filename without extension (reference-capable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Free-form grouping label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Display text for one parameter identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParameterMapping {
    /// Parameter identifier, e.g. `"subscriptionId"`
    #[serde(alias = "id")]
    pub name: String,
    /// Display text (reference-capable)
    pub display: String,
    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// How a context treats stop words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopWordPolicy {
    /// Stop words are ordinary words
    #[default]
    Keep,
    /// Stop words are dropped (except the first token of a segment)
    Remove,
    /// Stop words are lowercased unless first or last
    LowercaseUnlessFirst,
}

impl FromStr for StopWordPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keep" => Ok(Self::Keep),
            "remove" => Ok(Self::Remove),
            "lowercase-unless-first" => Ok(Self::LowercaseUnlessFirst),
            other => Err(Error::MalformedConfig {
                message: format!(
                    "unsupported stopWords rule '{other}' (expected keep, remove or lowercase-unless-first)"
                ),
                source: None,
            }),
        }
    }
}

impl fmt::Display for StopWordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keep => "keep",
            Self::Remove => "remove",
            Self::LowercaseUnlessFirst => "lowercase-unless-first",
        })
    }
}

/// Named rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContextRules {
    /// Rule name → rule value, e.g. `"stopWords" → "remove"`
    #[serde(default)]
    pub rules: BTreeMap<String, String>,
    /// Extra stop words active in this context
    #[serde(default)]
    pub include: Vec<String>,
    /// Lexicon stop words that are ordinary words in this context
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Whether [`CategoryDefaults`] apply in this context
    #[serde(default = "default_true")]
    pub apply_category_defaults: bool,
    #[serde(skip)]
    stop_words: StopWordPolicy,
}

impl Default for ContextRules {
    fn default() -> Self {
        Self {
            rules: BTreeMap::new(),
            include: Vec::new(),
            exclude: Vec::new(),
            apply_category_defaults: true,
            stop_words: StopWordPolicy::Keep,
        }
    }
}

impl ContextRules {
    /// Returns the validated stop-word policy.
    #[must_use]
    pub const fn stop_word_policy(&self) -> StopWordPolicy {
        self.stop_words
    }

    /// Returns a rule value by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&str> {
        self.rules.get(name).map(String::as_str)
    }

    /// Returns `true` if `term` counts as a stop word in this context.
    ///
    /// `exclude` wins over `include`, which wins over the lexicon.
    #[must_use]
    pub fn is_stop_word(&self, lexicon: &Lexicon, term: &str) -> bool {
        let lower = term.to_lowercase();
        if self.exclude.contains(&lower) {
            return false;
        }
        self.include.contains(&lower) || lexicon.is_stop_word(&lower)
    }

    fn validated(mut self, name: &str) -> Result<Self> {
        self.stop_words = match self.rules.get(STOP_WORDS_RULE) {
            Some(value) => value.parse().map_err(|err| match err {
                Error::MalformedConfig { message, source } => Error::MalformedConfig {
                    message: format!("contexts.{name}: {message}"),
                    source,
                },
                other => other,
            })?,
            None => StopWordPolicy::Keep,
        };
        self.include = self.include.iter().map(|w| w.trim().to_lowercase()).collect();
        self.exclude = self.exclude.iter().map(|w| w.trim().to_lowercase()).collect();
        Ok(self)
    }
}

/// Case change applied to a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseTransform {
    /// Force lowercase
    Lowercase,
    /// Force uppercase
    Uppercase,
    /// Keep the canonical spelling
    Preserve,
}

impl CaseTransform {
    /// Applies the transform.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Lowercase => text.to_lowercase(),
            Self::Uppercase => text.to_uppercase(),
            Self::Preserve => text.to_string(),
        }
    }
}

/// Behavior shared by every term of a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryDefaults {
    /// Transform applied when a term of this category appears in a filename
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<CaseTransform>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigDocument {
    #[serde(default)]
    lexicon: Lexicon,
    #[serde(default)]
    services: Vec<ServiceMapping>,
    #[serde(default)]
    parameters: Vec<ParameterMapping>,
    #[serde(default)]
    contexts: BTreeMap<String, ContextRules>,
    #[serde(default)]
    category_defaults: BTreeMap<String, CategoryDefaults>,
}

/// Validated, reference-resolved naming configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    lexicon: Lexicon,
    services: BTreeMap<String, ServiceMapping>,
    parameters: BTreeMap<String, ParameterMapping>,
    contexts: BTreeMap<String, ContextRules>,
    category_defaults: BTreeMap<String, CategoryDefaults>,
}

impl Configuration {
    /// Parses and resolves a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedConfig`] for invalid JSON or structure and
    /// [`Error::UnresolvedReference`] for dangling lexicon references.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: ConfigDocument =
            serde_json::from_str(json).map_err(|e| Error::MalformedConfig {
                message: format!("Failed to parse JSON configuration: {e}"),
                source: Some(Box::new(e)),
            })?;
        Self::from_document(document)
    }

    /// Parses and resolves a TOML document.
    ///
    /// # Errors
    ///
    /// Same as [`Configuration::from_json_str`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let document: ConfigDocument = toml::from_str(text).map_err(|e| Error::MalformedConfig {
            message: format!("Failed to parse TOML configuration: {e}"),
            source: Some(Box::new(e)),
        })?;
        Self::from_document(document)
    }

    fn from_document(document: ConfigDocument) -> Result<Self> {
        let lexicon = document.lexicon.normalized()?;

        let mut services = BTreeMap::new();
        for mut service in document.services {
            let key = service.id.trim().to_lowercase();
            if key.is_empty() {
                return Err(Error::MalformedConfig {
                    message: "service mapping has an empty id".to_string(),
                    source: None,
                });
            }
            let id = service.id.clone();
            service.short_name = resolve_optional(&lexicon, service.short_name, || {
                format!("services[{id}].shortName")
            })?;
            service.brand_name = resolve_optional(&lexicon, service.brand_name, || {
                format!("services[{id}].brandName")
            })?;
            service.filename = resolve_optional(&lexicon, service.filename, || {
                format!("services[{id}].filename")
            })?;
            if services.insert(key, service).is_some() {
                return Err(Error::MalformedConfig {
                    message: format!("duplicate service mapping '{id}'"),
                    source: None,
                });
            }
        }

        let mut parameters = BTreeMap::new();
        for mut parameter in document.parameters {
            let key = parameter.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(Error::MalformedConfig {
                    message: "parameter mapping has an empty name".to_string(),
                    source: None,
                });
            }
            let field = format!("parameters[{}].display", parameter.name);
            parameter.display = resolve_value(&lexicon, parameter.display, || field)?;
            let name = parameter.name.clone();
            if parameters.insert(key, parameter).is_some() {
                return Err(Error::MalformedConfig {
                    message: format!("duplicate parameter mapping '{name}'"),
                    source: None,
                });
            }
        }

        let contexts = document
            .contexts
            .into_iter()
            .map(|(name, rules)| {
                let rules = rules.validated(&name)?;
                Ok((name, rules))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self {
            lexicon,
            services,
            parameters,
            contexts,
            category_defaults: document.category_defaults,
        })
    }

    /// The shared lexicon.
    #[must_use]
    pub const fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Service mapping for `id` (case-insensitive).
    #[must_use]
    pub fn service(&self, id: &str) -> Option<&ServiceMapping> {
        self.services.get(&id.trim().to_lowercase())
    }

    /// Parameter mapping for `name` (case-insensitive).
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterMapping> {
        self.parameters.get(&name.trim().to_lowercase())
    }

    /// Named context rules.
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&ContextRules> {
        self.contexts.get(name)
    }

    /// Defaults for a term category.
    #[must_use]
    pub fn category_defaults(&self, category: &str) -> Option<&CategoryDefaults> {
        self.category_defaults.get(category)
    }

    /// All service mappings, ordered by lowercase id.
    pub fn services(&self) -> impl Iterator<Item = &ServiceMapping> {
        self.services.values()
    }

    /// All parameter mappings, ordered by lowercase name.
    pub fn parameters(&self) -> impl Iterator<Item = &ParameterMapping> {
        self.parameters.values()
    }
}

fn resolve_value(lexicon: &Lexicon, raw: String, field: impl FnOnce() -> String) -> Result<String> {
    match MappingValue::parse(&raw) {
        MappingValue::Literal(value) => Ok(value),
        MappingValue::Reference(reference) => {
            lexicon
                .resolve(&reference)
                .ok_or_else(|| Error::UnresolvedReference {
                    field: field(),
                    reference: raw,
                })
        }
        MappingValue::Invalid(_) => Err(Error::UnresolvedReference {
            field: field(),
            reference: raw,
        }),
    }
}

fn resolve_optional(
    lexicon: &Lexicon,
    raw: Option<String>,
    field: impl FnOnce() -> String,
) -> Result<Option<String>> {
    raw.map(|value| resolve_value(lexicon, value, field))
        .transpose()
}
