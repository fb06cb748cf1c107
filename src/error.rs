use std::path::PathBuf;
use thiserror::Error;

use crate::types::ClassId;

/// Why the first line of an annotation file could not be read as a label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelParseError {
    #[error("file is empty")]
    Empty,
    #[error("first line has no tokens")]
    NoTokens,
    #[error("first line is not valid UTF-8")]
    NotUtf8,
    #[error("first token {0:?} is not an integer")]
    InvalidInteger(String),
    /// An integer no mapping key can hold; routed as an unmapped class
    #[error("label {0} is outside the supported integer range")]
    OutOfRange(String),
}

/// Errors that abort a sorting run
#[derive(Debug, Error)]
pub enum SortError {
    #[error("malformed annotation {}: {reason}", .path.display())]
    MalformedAnnotation {
        path: PathBuf,
        reason: LabelParseError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid class mapping file {}: {reason}", .path.display())]
    InvalidMapping { path: PathBuf, reason: String },

    #[error("class {0} is mapped to but not in the provisioned class set")]
    UnprovisionedClass(ClassId),

    #[error("the specified input_dir does not exist: {}", .0.display())]
    MissingInputDir(PathBuf),

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),
}

impl SortError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SortError::Io {
            path: path.into(),
            source,
        }
    }
}
