//! Error types for the type registry.
//!
//! Recoverable tag anomalies never surface here; they are reported to a
//! [`DiagnosticSink`](crate::DiagnosticSink) instead. This module covers the
//! failures that stop a registry load or store, or that reject a type
//! definition while the registry is being built.

use std::fmt;

/// Errors raised while building, loading or storing a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The byte stream failed.
    Io(geoclass_io::Error),

    /// A tag read from a data file got a different id than it was stored with.
    TagIdMismatch {
        /// Tag name.
        name: String,
        /// Id recorded in the data file.
        requested: u32,
        /// Id the registry assigned.
        actual: u32,
    },

    /// A type read from a data file disagrees with the registry's numbering.
    TypeIdMismatch {
        /// Type name.
        name: String,
        /// Id recorded in the data file.
        requested: u32,
        /// Id the registry has or would assign.
        actual: u32,
    },

    /// A type requested an id below the next free type id.
    TypeIdOutOfOrder {
        /// Type name.
        name: String,
        /// The requested id.
        requested: u32,
        /// The next free id.
        next: u32,
    },

    /// A type read from a data file has other flags or features than the
    /// registered type of the same name.
    TypeDefinitionMismatch {
        /// Type name.
        name: String,
    },

    /// A data file named a feature that is not part of the catalog.
    UnknownFeature {
        /// The unknown feature name.
        name: String,
    },

    /// A feature was bound to the same type twice.
    DuplicateFeature {
        /// Type name.
        type_name: String,
        /// Feature name.
        feature: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "{err}"),
            Error::TagIdMismatch {
                name,
                requested,
                actual,
            } => write!(
                f,
                "Tag '{name}' was stored with id {requested} but registered as {actual}"
            ),
            Error::TypeIdMismatch {
                name,
                requested,
                actual,
            } => write!(
                f,
                "Type '{name}' was stored with id {requested} but the registry expects {actual}"
            ),
            Error::TypeIdOutOfOrder {
                name,
                requested,
                next,
            } => write!(
                f,
                "Type '{name}' requests id {requested}, below the next free id {next}"
            ),
            Error::TypeDefinitionMismatch { name } => write!(
                f,
                "Type '{name}' was stored with other flags or features than registered"
            ),
            Error::UnknownFeature { name } => write!(f, "Feature '{name}' not found"),
            Error::DuplicateFeature { type_name, feature } => {
                write!(f, "Type '{type_name}' already has feature '{feature}'")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<geoclass_io::Error> for Error {
    fn from(err: geoclass_io::Error) -> Self {
        Error::Io(err)
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;
