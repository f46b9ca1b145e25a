//! Input loading
//!
//! Reads uploaded files into memory so the pipeline can run over them as
//! plain bytes. The pipeline itself never touches the filesystem.
//!
//! - [`read_input`] - blocking read, used by the sync strategy
//! - [`read_input_async`] - `tokio::fs` read, used by the async strategy

use crate::types::IngestError;
use std::io::ErrorKind;
use std::path::Path;

/// Map a failed read onto the matching run-level error
fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    match error.kind() {
        ErrorKind::NotFound => IngestError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => IngestError::IoError {
            message: format!("Failed to read file '{}': {}", path.display(), error),
        },
    }
}

/// Read a whole input file
pub fn read_input(path: &Path) -> Result<Vec<u8>, IngestError> {
    std::fs::read(path).map_err(|e| open_error(path, e))
}

/// Read a whole input file on the tokio runtime
pub async fn read_input_async(path: &Path) -> Result<Vec<u8>, IngestError> {
    tokio::fs::read(path).await.map_err(|e| open_error(path, e))
}
