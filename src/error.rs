//! Error types surfaced while assembling and rendering the guide.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while building or serializing a guide document.
#[derive(Debug)]
pub enum GuideError {
    /// The PDF backend failed to produce the document (fonts, images, layout).
    Render(genpdf::error::Error),
    /// Reading an input asset or writing the output file failed.
    Io {
        /// Path of the file or directory the operation was applied to.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// A mutating call was made after the document had been finalized.
    Finalized {
        /// Name of the rejected operation.
        operation: &'static str,
    },
}

impl GuideError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<genpdf::error::Error> for GuideError {
    fn from(err: genpdf::error::Error) -> Self {
        Self::Render(err)
    }
}

impl std::fmt::Display for GuideError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(err) => write!(f, "Failed to render guide document: {err}"),
            Self::Io { path, source } => {
                write!(f, "I/O failure at {}: {source}", path.display())
            }
            Self::Finalized { operation } => write!(
                f,
                "Cannot call {operation} after the document has been finalized"
            ),
        }
    }
}

impl std::error::Error for GuideError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Finalized { .. } => None,
        }
    }
}
