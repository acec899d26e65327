//! Façade used by documentation generators.
//!
//! [`TransformationEngine`] bundles a [`TextNormalizer`] and a
//! [`FilenameGenerator`] over one shared [`Configuration`] and exposes the
//! narrow interface that template renderers and prompt builders call.
//!
//! # Examples
//!
//! ```no_run
//! use tooldoc_core::ConfigLoader;
//! use tooldoc_transform::TransformationEngine;
//!
//! # fn example() -> tooldoc_core::Result<()> {
//! let loader = ConfigLoader::new();
//! let engine = TransformationEngine::from_loader(&loader, "naming.json")?;
//!
//! let title = engine.service_display_name("aks");
//! let file = engine.generate_filename("aks", Some("nodepool list"), None);
//! let text = engine.transform_description("Lists node pools, e.g. system pools");
//! # Ok(())
//! # }
//! ```

use crate::filename::FilenameGenerator;
use crate::normalizer::{TextNormalizer, ensure_ends_period};
use std::path::Path;
use std::sync::Arc;
use tooldoc_core::{ConfigLoader, Configuration, DISPLAY_CONTEXT, Result};

/// Entry point for all naming and text transformations.
///
/// Read-only after construction; `Send + Sync`.
#[derive(Debug, Clone)]
pub struct TransformationEngine {
    normalizer: Arc<TextNormalizer>,
    filenames: FilenameGenerator,
}

impl TransformationEngine {
    /// Builds an engine over an already loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`tooldoc_core::Error::PatternError`] if an abbreviation
    /// cannot be compiled.
    pub fn new(config: Arc<Configuration>) -> Result<Self> {
        let normalizer = Arc::new(TextNormalizer::new(config)?);
        let filenames = FilenameGenerator::new(Arc::clone(&normalizer));
        Ok(Self {
            normalizer,
            filenames,
        })
    }

    /// Loads `path` through `loader` (cached) and builds an engine over it.
    ///
    /// # Errors
    ///
    /// Any [`ConfigLoader::load`] error, or a pattern compilation error.
    pub fn from_loader(loader: &ConfigLoader, path: impl AsRef<Path>) -> Result<Self> {
        Self::new(loader.load(path)?)
    }

    /// The shared configuration.
    #[must_use]
    pub fn config(&self) -> &Arc<Configuration> {
        self.normalizer.config()
    }

    /// The underlying normalizer.
    #[must_use]
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// The underlying filename generator.
    #[must_use]
    pub const fn filenames(&self) -> &FilenameGenerator {
        &self.filenames
    }

    /// Display text for a parameter identifier.
    #[must_use]
    pub fn normalize_parameter(&self, identifier: &str) -> String {
        self.normalizer.normalize_parameter(identifier)
    }

    /// Title-cases `text` under the named context.
    #[must_use]
    pub fn to_title_case(&self, text: &str, context: &str) -> String {
        self.normalizer.to_title_case(text, context)
    }

    /// Expands abbreviations and terminates the sentence.
    ///
    /// Re-applying it to its own output is a no-op as long as no
    /// abbreviation's replacement contains another abbreviation.
    #[must_use]
    pub fn transform_description(&self, text: &str) -> String {
        ensure_ends_period(&self.normalizer.replace_static_text(text))
    }

    /// See [`FilenameGenerator::generate_filename`].
    #[must_use]
    pub fn generate_filename(
        &self,
        area: &str,
        operation: Option<&str>,
        type_part: Option<&str>,
    ) -> String {
        self.filenames.generate_filename(area, operation, type_part)
    }

    /// See [`FilenameGenerator::generate_main_service_filename`].
    #[must_use]
    pub fn generate_main_service_filename(&self, area: &str) -> String {
        self.filenames.generate_main_service_filename(area)
    }

    /// See [`FilenameGenerator::clean_filename`].
    #[must_use]
    pub fn clean_filename(&self, text: &str) -> String {
        self.filenames.clean_filename(text)
    }

    /// Brand name of a service, else the identifier title-cased under `display`.
    #[must_use]
    pub fn service_display_name(&self, id: &str) -> String {
        match self
            .config()
            .service(id)
            .and_then(|service| service.brand_name.as_ref())
        {
            Some(brand) => brand.clone(),
            None => self.to_title_case(id, DISPLAY_CONTEXT),
        }
    }

    /// Short name of a service, else the identifier unchanged.
    #[must_use]
    pub fn service_short_name(&self, id: &str) -> String {
        match self
            .config()
            .service(id)
            .and_then(|service| service.short_name.as_ref())
        {
            Some(short_name) => short_name.clone(),
            None => id.to_string(),
        }
    }
}
