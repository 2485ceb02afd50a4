//! Unified error types for the bomline workspace.
//!
//! Resolution is all-or-nothing: the first error aborts the whole pass and
//! surfaces the offending module identifier and version for diagnostics.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum BomlineError {
    /// An I/O operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A descriptor file contains a syntax error.
    #[error("parse error: {message}")]
    Parse {
        /// Description of the syntax error.
        message: String,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A symbolic version reference could not be looked up.
    #[error("unresolved version reference: {reference}")]
    UnresolvedVersion {
        /// The reference that failed to resolve.
        reference: String,
    },

    /// Two requirements for the same module declare different explicit versions.
    #[error("conflicting versions for {module}: \"{first}\" vs \"{second}\"")]
    ConflictingVersions {
        /// Module with the conflicting requirements.
        module: String,
        /// First declared explicit version.
        first: String,
        /// Second, disagreeing explicit version.
        second: String,
    },

    /// A resolved version matches an exclusion rule.
    #[error("version \"{version}\" of {module} is excluded by policy")]
    ExcludedVersion {
        /// Module whose version was rejected.
        module: String,
        /// The rejected version string.
        version: String,
    },

    /// Two variant modules tie at the same profile priority.
    #[error("ambiguous profile for axis \"{axis}\": {first} and {second} tie")]
    AmbiguousProfile {
        /// Variant axis with the tie.
        axis: String,
        /// First tied candidate.
        first: String,
        /// Second tied candidate.
        second: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BomlineError>;
