//! Core data model and configuration loading for tooldoc.
//!
//! This crate holds everything the naming engine reads: the shared
//! [`Lexicon`], the service and parameter tables that refer to it, named
//! context rules and per-category defaults. It also owns the only I/O in the
//! workspace, [`ConfigLoader`].
//!
//! # Architecture
//!
//! - [`Lexicon`]: acronyms, abbreviations, compound words, stop words
//! - [`Configuration`]: validated, reference-resolved, immutable root
//! - [`MappingValue`]: literal or `$lexicon.<category>.<key>` reference
//! - [`ConfigLoader`]: per-path cached loading (sync and async)
//! - [`Error`]: error hierarchy shared by every crate

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod lexicon;
mod loader;
mod reference;

pub use config::{
    CaseTransform, CategoryDefaults, Configuration, ContextRules, DISPLAY_CONTEXT,
    FILENAME_CONTEXT, ParameterMapping, STOP_WORDS_RULE, ServiceMapping, StopWordPolicy,
    TITLE_CASE_CONTEXT,
};
pub use error::{Error, Result};
pub use lexicon::{Abbreviation, Acronym, DEFAULT_ACRONYM_CATEGORY, Lexicon};
pub use loader::{ConfigFormat, ConfigLoader, LoaderStats};
pub use reference::{LexiconCategory, LexiconRef, MappingValue, REFERENCE_PREFIX};
