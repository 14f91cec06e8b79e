//! File creation helpers.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::error::{FileError, Result};

/// Create `path` with owner-only permissions and write `contents`.
///
/// Never overwrites: an existing file yields `FileError::OverwriteRefused`.
/// The existence check and creation are a single `O_EXCL` open.
pub fn write_new_private(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(crate::core::constants::PRIVATE_FILE_MODE);
    }

    let mut file = options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => FileError::OverwriteRefused(path.to_path_buf()).into(),
        _ => crate::error::Error::Io(e),
    })?;
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}
