//! todo.txt file access
//!
//! Reading returns the text together with the line ending found in it.
//! Safe writes go to a temporary file next to the target which then replaces
//! the target in one rename, so a crash never leaves a half-written list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, StorageError};

/// Line separator of a todo.txt file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// The separator used in `text`, checking `\r\n` before `\n` before `\r`.
    pub fn detect(text: &str) -> Option<Self> {
        [Self::CrLf, Self::Lf, Self::Cr]
            .into_iter()
            .find(|ending| text.contains(ending.as_str()))
    }

    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::CrLf
        } else {
            Self::Lf
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lf => "lf",
            Self::CrLf => "crlf",
            Self::Cr => "cr",
        };
        write!(f, "{}", name)
    }
}

/// Read a whole file as UTF-8.
///
/// Returns the text and the line ending detected in it, if it has any.
pub fn read_all_text(path: &Path) -> Result<(String, Option<LineEnding>)> {
    let bytes = fs::read(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes)?;
    let ending = LineEnding::detect(&text);
    debug!(
        "read {} bytes from {} ({:?} line endings)",
        text.len(),
        path.display(),
        ending
    );
    Ok((text, ending))
}

/// Replace the content of `path` with `text`.
///
/// With `safe`, the text is written to a temporary file in the same
/// directory and renamed over the target; the target is either fully
/// replaced or left as it was.
pub fn write_all_text(path: &Path, text: &str, safe: bool) -> Result<()> {
    if safe {
        write_atomic(path, text)?;
    } else {
        fs::write(path, text).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    debug!(
        "wrote {} bytes to {} (safe: {})",
        text.len(),
        path.display(),
        safe
    );
    Ok(())
}

fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".tmp")
        .suffix("~")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    tmp.persist(path).map_err(|e| StorageError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_detect_line_ending() {
        assert_eq!(LineEnding::detect("a\r\nb\r\n"), Some(LineEnding::CrLf));
        assert_eq!(LineEnding::detect("a\nb\n"), Some(LineEnding::Lf));
        assert_eq!(LineEnding::detect("a\rb\r"), Some(LineEnding::Cr));
        assert_eq!(LineEnding::detect("single line"), None);
    }

    #[test]
    fn test_detect_prefers_crlf() {
        // a lone \n later in the text does not win over an earlier \r\n
        assert_eq!(LineEnding::detect("a\r\nb\nc"), Some(LineEnding::CrLf));
        assert_eq!(LineEnding::detect("a\nb\r\nc"), Some(LineEnding::CrLf));
    }

    #[test]
    fn test_line_ending_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            ending: LineEnding,
        }
        let w: Wrapper = toml::from_str(r#"ending = "crlf""#).unwrap();
        assert_eq!(w.ending, LineEnding::CrLf);
        assert_eq!(w.ending.to_string(), "crlf");
    }

    #[test]
    fn test_read_write_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("todo.txt");

        write_all_text(&path, "one\r\ntwo\r\n", true)?;
        let (text, ending) = read_all_text(&path)?;
        assert_eq!(text, "one\r\ntwo\r\n");
        assert_eq!(ending, Some(LineEnding::CrLf));
        Ok(())
    }

    #[test]
    fn test_safe_write_replaces_existing_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("todo.txt");
        fs::write(&path, "old content that is longer\n")?;

        write_all_text(&path, "new\n", true)?;
        assert_eq!(fs::read_to_string(&path)?, "new\n");

        // no temporary files left behind
        let leftovers: Vec<_> = fs::read_dir(dir.path())?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "todo.txt")
            .collect();
        assert!(leftovers.is_empty());
        Ok(())
    }

    #[test]
    fn test_unsafe_write() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("todo.txt");
        write_all_text(&path, "direct\n", false)?;
        assert_eq!(fs::read_to_string(&path)?, "direct\n");
        Ok(())
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let result = read_all_text(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(StorageError::Read { .. })));
    }

    #[test]
    fn test_read_invalid_utf8() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("todo.txt");
        fs::write(&path, [0xff, 0xfe, b'\n'])?;
        assert!(matches!(read_all_text(&path), Err(StorageError::Decode(_))));
        Ok(())
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("todo.txt");
        assert!(write_all_text(&path, "x\n", true).is_err());
        assert!(write_all_text(&path, "x\n", false).is_err());
    }
}
