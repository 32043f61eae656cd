//! Error types for `doctype-typegen`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the type generation pipeline.
#[derive(Debug, Error)]
pub enum TypegenError {
    /// The metadata store holds no DocType with the requested name.
    #[error("DocType '{0}' not found")]
    DoctypeNotFound(String),

    /// The metadata store holds no module with the requested name.
    #[error("module '{0}' not found in any installed app")]
    ModuleNotFound(String),

    /// A field is missing configuration its kind requires.
    #[error("field '{fieldname}' of DocType '{doctype}' is invalid: {message}")]
    InvalidField {
        /// DocType that owns the field.
        doctype: String,
        /// Offending field name.
        fieldname: String,
        /// Explanation of the problem.
        message: String,
    },

    /// A DocType or custom field file could not be parsed.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// File that failed to parse.
        path: Utf8PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// Serialising a configuration document failed.
    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),

    /// Loading the layered site configuration failed.
    #[error("failed to load site configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// I/O failure while reading or writing the bench.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed when the failure occurred.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl TypegenError {
    /// Creates a [`TypegenError::Io`] for the given path.
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a [`TypegenError::InvalidField`] for the given field.
    pub fn invalid_field(
        doctype: impl Into<String>,
        fieldname: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            doctype: doctype.into(),
            fieldname: fieldname.into(),
            message: message.into(),
        }
    }
}

impl From<figment::Error> for TypegenError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
