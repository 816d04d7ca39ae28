use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow wrapper scripts to distinguish between different
/// types of failures. Zero matching modules is a success, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - including queries that matched nothing
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (malformed catalog, unknown collection, file I/O error)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for catalog loading and querying.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
///
/// The query engine itself can only fail with `MalformedCatalog` (load
/// time) or `UnknownCollection` (query time); the remaining variants
/// belong to the CLI surface around it.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {path}\n\n💡 Hint: {suggestion}")]
    CatalogNotFound { path: PathBuf, suggestion: String },

    #[error("Malformed catalog: {details}\n\n💡 Hint: Please verify that the catalog file follows the documented schema")]
    MalformedCatalog { details: String },

    #[error("Unknown collection: '{name}'\n\n💡 Hint: Available collections are: {known}")]
    UnknownCollection { name: String, known: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}

impl CatalogError {
    /// Build an UnknownCollection error, listing the valid names in
    /// catalog-declaration order.
    pub fn unknown_collection<'a>(name: &str, known: impl Iterator<Item = &'a str>) -> Self {
        let known: Vec<&str> = known.collect();
        let known = if known.is_empty() {
            "(none)".to_string()
        } else {
            known.join(", ")
        };
        CatalogError::UnknownCollection {
            name: name.to_string(),
            known,
        }
    }
}
