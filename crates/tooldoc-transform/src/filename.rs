//! Canonical documentation filenames.
//!
//! [`FilenameGenerator`] maps a service identifier (optionally with an
//! operation and a type suffix) to a filesystem-safe markdown filename. The
//! base name is resolved in three tiers:
//!
//! 1. explicit service mapping (`filename`, else `shortName`)
//! 2. compound-word expansion from the lexicon, joined with `-`
//! 3. the identifier itself
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tooldoc_core::Configuration;
//! use tooldoc_transform::{FilenameGenerator, TextNormalizer};
//!
//! # fn example() -> tooldoc_core::Result<()> {
//! let config = Configuration::from_json_str(
//!     r#"{
//!         "lexicon": { "compoundWords": { "keyvault": ["key", "vault"] } },
//!         "services": [ { "id": "aks", "filename": "azure-kubernetes-service" } ]
//!     }"#,
//! )?;
//! let normalizer = Arc::new(TextNormalizer::new(Arc::new(config))?);
//! let filenames = FilenameGenerator::new(normalizer);
//!
//! assert_eq!(
//!     filenames.generate_filename("aks", Some("nodepool list"), None),
//!     "azure-kubernetes-service-nodepool-list.md"
//! );
//! assert_eq!(filenames.generate_filename("keyvault", None, Some("params")), "key-vault-params.md");
//! assert_eq!(filenames.generate_main_service_filename("Unknown"), "unknown.md");
//! # Ok(())
//! # }
//! ```

use crate::normalizer::TextNormalizer;
use std::sync::Arc;
use tooldoc_core::FILENAME_CONTEXT;

/// Markdown extension appended to every generated name.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Which tier produced a base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    /// Service mapping with an explicit `filename`
    ExplicitFilename,
    /// Service mapping `shortName`
    ShortName,
    /// Lexicon compound word
    CompoundWord,
    /// Identifier used verbatim
    Fallback,
}

/// A resolved base name and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Base name before cleaning
    pub base: String,
    /// Tier that produced it
    pub tier: ResolutionTier,
}

/// Resolves identifiers into canonical filenames.
#[derive(Debug, Clone)]
pub struct FilenameGenerator {
    normalizer: Arc<TextNormalizer>,
}

impl FilenameGenerator {
    /// Creates a generator that cleans names with `normalizer`.
    #[must_use]
    pub const fn new(normalizer: Arc<TextNormalizer>) -> Self {
        Self { normalizer }
    }

    /// Resolves the base name for `area` through the three tiers.
    ///
    /// A service mapping with neither `filename` nor `shortName` falls
    /// through to the compound-word tier.
    #[must_use]
    pub fn resolve(&self, area: &str) -> Resolution {
        let config = self.normalizer.config();

        if let Some(service) = config.service(area) {
            if let Some(filename) = &service.filename {
                tracing::debug!("Filename for {area} from explicit mapping");
                return Resolution {
                    base: filename.clone(),
                    tier: ResolutionTier::ExplicitFilename,
                };
            }
            if let Some(short_name) = &service.short_name {
                tracing::debug!("Filename for {area} from short name");
                return Resolution {
                    base: short_name.clone(),
                    tier: ResolutionTier::ShortName,
                };
            }
        }

        if let Some(parts) = config.lexicon().compound(area) {
            tracing::debug!("Filename for {area} from compound word");
            return Resolution {
                base: parts.join("-"),
                tier: ResolutionTier::CompoundWord,
            };
        }

        Resolution {
            base: area.to_string(),
            tier: ResolutionTier::Fallback,
        }
    }

    /// Builds `{base}[-{operation}][-{type}].md`.
    ///
    /// The base and operation are cleaned with
    /// [`clean_filename`](Self::clean_filename); the type part is appended
    /// verbatim. Empty operation or type parts are omitted. An empty or
    /// whitespace-only `area`, or one that cleans to nothing, yields `""`.
    #[must_use]
    pub fn generate_filename(
        &self,
        area: &str,
        operation: Option<&str>,
        type_part: Option<&str>,
    ) -> String {
        let area = area.trim();
        if area.is_empty() {
            return String::new();
        }

        let mut name = self.clean_filename(&self.resolve(area).base);
        if name.is_empty() {
            return String::new();
        }

        if let Some(operation) = operation {
            let cleaned = self.clean_filename(operation);
            if !cleaned.is_empty() {
                name.push('-');
                name.push_str(&cleaned);
            }
        }

        if let Some(type_part) = type_part.filter(|t| !t.trim().is_empty()) {
            name.push('-');
            name.push_str(type_part);
        }

        name.push_str(MARKDOWN_EXTENSION);
        name
    }

    /// Filename of a service's main page.
    ///
    /// An explicit `filename` is used as written; every other tier is
    /// lowercased. No stop-word cleaning is applied.
    #[must_use]
    pub fn generate_main_service_filename(&self, area: &str) -> String {
        let area = area.trim();
        if area.is_empty() {
            return String::new();
        }

        let resolution = self.resolve(area);
        let base = match resolution.tier {
            ResolutionTier::ExplicitFilename => resolution.base,
            ResolutionTier::ShortName | ResolutionTier::CompoundWord | ResolutionTier::Fallback => {
                resolution.base.to_lowercase()
            }
        };
        format!("{base}{MARKDOWN_EXTENSION}")
    }

    /// Applies the filename cleaning transform under the `filename` context.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use tooldoc_core::Configuration;
    /// use tooldoc_transform::{FilenameGenerator, TextNormalizer};
    ///
    /// let config = Configuration::from_json_str(
    ///     r#"{
    ///         "lexicon": { "stopWords": ["a", "of", "the"] },
    ///         "contexts": { "filename": { "rules": { "stopWords": "remove" } } }
    ///     }"#,
    /// ).unwrap();
    /// let normalizer = Arc::new(TextNormalizer::new(Arc::new(config)).unwrap());
    /// let filenames = FilenameGenerator::new(normalizer);
    ///
    /// assert_eq!(filenames.clean_filename("get-a-list-of-the-items"), "get-list-items");
    /// ```
    #[must_use]
    pub fn clean_filename(&self, text: &str) -> String {
        self.normalizer.clean_for_context(text, FILENAME_CONTEXT)
    }
}
