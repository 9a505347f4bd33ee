use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::error::AppError;

/// Read a whole file into memory.
///
/// Decoding never touches the file system; this is the only place where
/// image bytes are read.
pub fn load(path: &Path) -> Result<Bytes, AppError> {
    let data = std::fs::read(path).map_err(|e| AppError::FileOpen {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    debug!(path = %path.display(), size = data.len(), "loaded file");
    Ok(Bytes::from(data))
}
