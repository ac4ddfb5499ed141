use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Extension appended to generated file names.
pub const PHP_EXTENSION: &str = "php";

/// Build the output file name for a structure or file override.
///
/// An override that already ends in `.php` is used as is.
pub fn php_file_name(stem: &str) -> String {
    let suffix = format!(".{PHP_EXTENSION}");
    if stem.ends_with(&suffix) {
        stem.to_string()
    } else {
        format!("{stem}{suffix}")
    }
}

/// Write rendered source into an existing directory.
///
/// The directory must already exist; it is never created. Returns the path
/// of the written file.
pub fn write_php_file(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(Error::InvalidOutputPath {
            path: dir.to_path_buf(),
        });
    }

    let path = dir.join(file_name);
    std::fs::write(&path, content).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote php file");
    Ok(path)
}
