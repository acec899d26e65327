//! Error types for tooldoc.
//!
//! Every fallible operation in the workspace returns [`Error`]. Only
//! configuration loading and engine construction can fail; the text and
//! filename transformations themselves are total.
//!
//! # Examples
//!
//! ```
//! use tooldoc_core::{Error, Result};
//!
//! fn require_path(path: &str) -> Result<()> {
//!     if path.is_empty() {
//!         return Err(Error::MalformedConfig {
//!             message: "configuration path cannot be empty".to_string(),
//!             source: None,
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_path("").unwrap_err();
//! assert!(err.is_malformed());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tooldoc.
///
/// All errors in the system use this type, providing consistent error handling
/// across all crates in the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file does not exist.
    ///
    /// Fatal: no transformation can run until a valid path is supplied.
    #[error("Configuration not found: {}", path.display())]
    ConfigNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// Configuration file exists but could not be read.
    #[error("Failed to read configuration {}: {source}", path.display())]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration document is structurally invalid.
    ///
    /// Raised for syntax errors, unknown fields, duplicate mapping keys and
    /// unsupported rule values.
    #[error("Malformed configuration: {message}")]
    MalformedConfig {
        /// Description of the problem
        message: String,
        /// Underlying parser error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A `$lexicon.<category>.<key>` reference does not point at a lexicon entry.
    #[error("Unresolved lexicon reference '{reference}' in {field}")]
    UnresolvedReference {
        /// Location of the reference, e.g. `services[aks].shortName`
        field: String,
        /// The raw reference token
        reference: String,
    },

    /// An abbreviation could not be compiled into a match pattern.
    #[error("Invalid abbreviation pattern for '{term}': {message}")]
    PatternError {
        /// Abbreviation key
        term: String,
        /// Description of the compilation failure
        message: String,
    },

    /// The background task running an async load did not complete.
    #[error("Configuration load task failed: {message}")]
    LoadTaskFailed {
        /// Description of the join failure
        message: String,
    },
}

impl Error {
    /// Returns `true` if the configuration file was not found.
    ///
    /// # Examples
    ///
    /// ```
    /// use tooldoc_core::Error;
    ///
    /// let err = Error::ConfigNotFound {
    ///     path: "missing.json".into(),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. })
    }

    /// Returns `true` if the configuration document is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tooldoc_core::Error;
    ///
    /// let err = Error::MalformedConfig {
    ///     message: "expected object".to_string(),
    ///     source: None,
    /// };
    /// assert!(err.is_malformed());
    /// ```
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedConfig { .. })
    }

    /// Returns `true` if a lexicon reference failed to resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use tooldoc_core::Error;
    ///
    /// let err = Error::UnresolvedReference {
    ///     field: "services[aks].shortName".to_string(),
    ///     reference: "$lexicon.acronyms.nope".to_string(),
    /// };
    /// assert!(err.is_unresolved_reference());
    /// ```
    #[must_use]
    pub const fn is_unresolved_reference(&self) -> bool {
        matches!(self, Self::UnresolvedReference { .. })
    }

    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` if an abbreviation pattern failed to compile.
    #[must_use]
    pub const fn is_pattern_error(&self) -> bool {
        matches!(self, Self::PatternError { .. })
    }
}

/// Result type alias for tooldoc operations.
///
/// # Examples
///
/// ```
/// use tooldoc_core::{Error, Result};
///
/// fn parse(flag: bool) -> Result<u8> {
///     if flag {
///         Ok(1)
///     } else {
///         Err(Error::MalformedConfig {
///             message: "flag must be set".to_string(),
///             source: None,
///         })
///     }
/// }
///
/// assert!(parse(true).is_ok());
/// assert!(parse(false).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/nope/config.json"),
        };
        assert!(err.is_not_found());
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_malformed_detection() {
        let err = Error::MalformedConfig {
            message: "bad".to_string(),
            source: None,
        };
        assert!(err.is_malformed());
        assert!(!err.is_unresolved_reference());
    }

    #[test]
    fn test_unresolved_reference_display() {
        let err = Error::UnresolvedReference {
            field: "services[aks].shortName".to_string(),
            reference: "$lexicon.acronyms.zzz".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("$lexicon.acronyms.zzz"));
        assert!(display.contains("services[aks].shortName"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = Error::Io {
            path: PathBuf::from("config.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.is_io_error());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_not_found_display() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("naming.json"),
        };
        assert!(err.to_string().contains("naming.json"));
    }
}
