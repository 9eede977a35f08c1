use crate::error::{CodegenError, CodegenResult};
use std::fs;
use std::path::Path;

/// Writes generated files, leaving identical ones untouched
pub struct CodeWriter;

impl CodeWriter {
    pub fn new() -> Self {
        Self
    }

    /// Whether `path` already holds exactly `content`
    pub fn is_current(&self, path: &Path, content: &str) -> CodegenResult<bool> {
        if !path.exists() {
            return Ok(false);
        }
        let existing = fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))?;
        Ok(existing == content)
    }

    /// Returns true when the file was written
    pub fn write_if_changed(&self, path: &Path, content: &str) -> CodegenResult<bool> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
        }

        if self.is_current(path, content)? {
            tracing::debug!(path = %path.display(), "generated file unchanged");
            return Ok(false);
        }

        fs::write(path, content).map_err(|e| CodegenError::io(path, e))?;
        tracing::info!(path = %path.display(), "generated file written");
        Ok(true)
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_if_changed_skips_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("zz_generated.rs");
        let writer = CodeWriter::new();

        assert!(!writer.is_current(&path, "a").unwrap());
        assert!(writer.write_if_changed(&path, "a").unwrap());
        assert!(writer.is_current(&path, "a").unwrap());
        assert!(!writer.write_if_changed(&path, "a").unwrap());
        assert!(writer.write_if_changed(&path, "b").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "b");
    }
}
