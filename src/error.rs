//! Error types for the pdfword-bot library.
//!
//! A single [`ConvertError`] covers every way a conversion can fail, from a
//! file with an extension we do not route, through a non-200 answer from the
//! remote API, to local I/O on the CLI path. The Telegram adapter inspects the
//! variant to decide what the sender sees; see
//! [`ConvertError::is_user_error`].

use crate::route::{self, Route};
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdfword-bot library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The filename's extension does not select any conversion route.
    #[error("Unsupported file type '.{extension}' for '{filename}'\nSend a .pdf, .doc or .docx file.")]
    UnsupportedExtension { filename: String, extension: String },

    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input file exists but could not be read.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Remote API errors ─────────────────────────────────────────────────
    /// The conversion API answered with anything other than HTTP 200.
    #[error("{route} conversion failed: remote API returned HTTP {status}: {detail}")]
    RemoteFailure {
        route: Route,
        status: u16,
        detail: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset…).
    #[error("HTTP request to the conversion API failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The conversion API did not answer within the configured timeout.
    #[error("Conversion API call timed out after {secs}s")]
    Timeout { secs: u64 },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the converted output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Transport errors ──────────────────────────────────────────────────
    /// A Telegram Bot API request or file download failed.
    #[error("Telegram {context} failed: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConvertError {
    /// Build an [`ConvertError::UnsupportedExtension`] for `filename`.
    pub fn unsupported(filename: &str) -> Self {
        ConvertError::UnsupportedExtension {
            filename: filename.to_string(),
            extension: route::extension(filename).to_string(),
        }
    }

    /// `true` when the failure was caused by what the sender supplied rather
    /// than by the remote API or our own environment.
    ///
    /// User errors are logged at `debug`; everything else at `warn`.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConvertError::UnsupportedExtension { .. }
                | ConvertError::FileNotFound { .. }
                | ConvertError::PermissionDenied { .. }
        )
    }

    /// `true` for failures on the remote side of the conversion.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ConvertError::RemoteFailure { .. } | ConvertError::Http(_) | ConvertError::Timeout { .. }
        )
    }
}

#[cfg(feature = "telegram")]
impl From<teloxide::RequestError> for ConvertError {
    fn from(e: teloxide::RequestError) -> Self {
        ConvertError::Transport {
            context: "request",
            source: Box::new(e),
        }
    }
}

#[cfg(feature = "telegram")]
impl From<teloxide::DownloadError> for ConvertError {
    fn from(e: teloxide::DownloadError) -> Self {
        ConvertError::Transport {
            context: "file download",
            source: Box::new(e),
        }
    }
}
