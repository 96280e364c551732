//! Directory path segmentation

use crate::error::{Error, Result};

/// Archive path separator
pub const SEPARATOR: char = '/';

/// Whether `path` names the archive root.
#[must_use]
pub fn is_root_path(path: &str) -> bool {
    path.is_empty()
}

/// `path` without one trailing separator.
#[must_use]
pub fn trim_trailing(path: &str) -> &str {
    path.strip_suffix(SEPARATOR).unwrap_or(path)
}

/// Split an archive directory path into its components.
///
/// The root (`""`) yields no components. One trailing `/` is ignored, so
/// `"a/"` is `"a"` and `"/"` is the root. Paths are trusted literals: `.` and
/// `..` are kept as ordinary names. Any other empty component (`"a//b"`,
/// `"/a"`, `"a//"`) is a [`Error::Structural`] error.
pub fn segment(path: &str) -> Result<Vec<&str>> {
    let trimmed = trim_trailing(path);
    if is_root_path(trimmed) {
        return Ok(Vec::new());
    }

    trimmed
        .split(SEPARATOR)
        .map(|part| {
            if part.is_empty() {
                Err(Error::Structural {
                    path: path.to_string(),
                    reason: "empty path component".to_string(),
                })
            } else {
                Ok(part)
            }
        })
        .collect()
}

/// Join components back into an archive path.
#[must_use]
pub fn join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for part in parts {
        if !out.is_empty() {
            out.push(SEPARATOR);
        }
        out.push_str(part);
    }
    out
}
