//! Lexicon-driven text normalization and filename resolution.
//!
//! Converts programmatic identifiers into display text and resolves
//! service/operation identifiers into canonical markdown filenames, all from
//! one shared [`tooldoc_core::Configuration`].
//!
//! # Architecture
//!
//! - [`TextNormalizer`]: parameter names, title case, abbreviations, sentence endings
//! - [`FilenameGenerator`]: three-tier base name resolution and cleaning
//! - [`TransformationEngine`]: façade for documentation generators
//!
//! Everything here is pure and synchronous; the only I/O lives in
//! [`tooldoc_core::ConfigLoader`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tooldoc_core::Configuration;
//! use tooldoc_transform::TransformationEngine;
//!
//! # fn example() -> tooldoc_core::Result<()> {
//! let config = Configuration::from_json_str(
//!     r#"{
//!         "lexicon": { "acronyms": { "id": { "canonical": "ID" } } },
//!         "parameters": [ { "name": "subscriptionId", "display": "subscription ID" } ],
//!         "services": [ { "id": "storage", "shortName": "storage" } ]
//!     }"#,
//! )?;
//! let engine = TransformationEngine::new(Arc::new(config))?;
//!
//! assert_eq!(engine.normalize_parameter("subscriptionId"), "subscription ID");
//! assert_eq!(engine.normalize_parameter("tenantId"), "tenant ID");
//! assert_eq!(engine.generate_main_service_filename("storage"), "storage.md");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod engine;
mod filename;
mod normalizer;

pub use engine::TransformationEngine;
pub use filename::{FilenameGenerator, MARKDOWN_EXTENSION, Resolution, ResolutionTier};
pub use normalizer::{TextNormalizer, ensure_ends_period, split_case_boundaries};
