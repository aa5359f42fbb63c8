use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::error::StorageError;

/// Writes piece data to `path` atomically.
///
/// The data goes to a `.part` file in the same directory first and is
/// renamed into place once fully flushed, so a crash or I/O error never
/// leaves a partial file at the destination. The temp file is removed on
/// failure.
pub fn write_piece_atomic(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    let tmp_path = match path.extension() {
        Some(ext) => {
            let mut ext = ext.to_os_string();
            ext.push(".part");
            path.with_extension(ext)
        }
        None => path.with_extension("part"),
    };

    let result = (|| {
        let mut file = File::create(&tmp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(source) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(StorageError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!(path = %path.display(), len = data.len(), "piece written");
    Ok(())
}
