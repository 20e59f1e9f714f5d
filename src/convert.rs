//! One-shot conversion of a local file.
//!
//! Used by `pdfword-bot convert`. The file goes through exactly the same
//! [`Dispatcher`] the bot uses, so the routing rules and output filenames are
//! identical; the only difference is that the result lands on disk instead of
//! in a chat.

use crate::dispatch::{ConvertedDocument, Dispatcher};
use crate::error::ConvertError;
use crate::route::Route;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Summary of a local conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub route: Route,
    pub input_bytes: usize,
    pub output_bytes: usize,
}

/// Convert the file at `input` and write the result.
///
/// `output` may name a directory (the route's fixed output filename is used
/// inside it) or a file path. A path ending in a separator is a directory
/// even if it does not exist yet. When `None`, the route's output filename is
/// written to the current directory.
///
/// Uses atomic write (temp file + rename) so a failed conversion never leaves
/// a truncated document behind.
pub async fn convert_file(
    dispatcher: &Dispatcher,
    input: impl AsRef<Path>,
    output: Option<&Path>,
) -> Result<ConvertedFile, ConvertError> {
    let input = input.as_ref();
    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Reject before reading so an unsupported file costs nothing.
    if Route::from_filename(&filename).is_none() {
        return Err(ConvertError::unsupported(&filename));
    }

    let data = read_input(input).await?;
    info!("Converting {} ({} bytes)", input.display(), data.len());

    let converted = dispatcher.dispatch(&filename, &data).await?;
    let output_path = output_path_for(&converted, output);
    write_atomic(&output_path, &converted.bytes).await?;

    info!("Wrote {}", output_path.display());
    Ok(ConvertedFile {
        input: input.to_path_buf(),
        output: output_path,
        route: converted.route,
        input_bytes: data.len(),
        output_bytes: converted.bytes.len(),
    })
}

/// Resolve where a converted document should be written.
pub fn output_path_for(converted: &ConvertedDocument, output: Option<&Path>) -> PathBuf {
    match output {
        Some(p) if p.is_dir() || ends_with_separator(p) => p.join(converted.filename),
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(converted.filename),
    }
}

fn ends_with_separator(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .ends_with(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
}

async fn read_input(path: &Path) -> Result<Vec<u8>, ConvertError> {
    match tokio::fs::read(path).await {
        Ok(data) => {
            debug!("Read {} bytes from {}", data.len(), path.display());
            Ok(data)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(ConvertError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(ConvertError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let write_err = |source: std::io::Error| ConvertError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    tokio::fs::write(&tmp_path, bytes).await.map_err(write_err)?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_err(e));
    }
    Ok(())
}
