//! File discovery across the configured inputs
//!
//! Directories are walked recursively; markdown files given directly are
//! yielded at depth 0; anything else is skipped without complaint.

use crate::core::DiscoveredFile;
use crate::error::{ExtractError, Result};
use crate::fs::{is_markdown, walk_markdown};
use std::path::PathBuf;

/// Discover markdown files under `inputs`.
///
/// Every input is checked up front so a missing path or an unlistable
/// directory fails before any file is processed. The returned iterator is
/// lazy and single-pass.
pub fn discover_files(inputs: &[PathBuf]) -> Result<impl Iterator<Item = DiscoveredFile> + use<>> {
    if let Some(missing) = inputs.iter().find(|p| !p.exists()) {
        return Err(ExtractError::InputNotFound(missing.clone()));
    }
    for dir in inputs.iter().filter(|p| p.is_dir()) {
        std::fs::read_dir(dir).map_err(|source| ExtractError::Read {
            path: dir.clone(),
            source,
        })?;
    }

    let inputs = inputs.to_vec();
    Ok(inputs.into_iter().flat_map(|input| {
        let found: Box<dyn Iterator<Item = DiscoveredFile>> = if input.is_dir() {
            Box::new(walk_markdown(&input))
        } else if is_markdown(&input) {
            Box::new(std::iter::once(DiscoveredFile::new(input, 0)))
        } else {
            Box::new(std::iter::empty())
        };
        found
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_missing_input_fails_early() {
        let result = discover_files(&[PathBuf::from("definitely_missing_dir_42")]);
        assert!(matches!(result, Err(ExtractError::InputNotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_root_fails_early() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new()?;
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked)?;
        File::create(locked.join("a.md"))?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        // Privileged users can list the directory regardless of mode
        let listable = fs::read_dir(&locked).is_ok();
        let result = discover_files(std::slice::from_ref(&locked)).map(|files| files.count());

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        if listable {
            assert_eq!(result?, 1);
        } else {
            assert!(matches!(result, Err(ExtractError::Read { .. })));
        }
        Ok(())
    }

    #[test]
    fn test_mixed_inputs() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        let docs = root.join("docs");
        fs::create_dir_all(docs.join("sub"))?;
        File::create(docs.join("a.md"))?;
        File::create(docs.join("sub").join("b.md"))?;
        let single = root.join("README.mdown");
        File::create(&single)?;
        let other = root.join("notes.txt");
        File::create(&other)?;

        let found: Vec<_> = discover_files(&[docs.clone(), single.clone(), other])?.collect();

        assert_eq!(
            found,
            vec![
                DiscoveredFile::new(docs.join("a.md"), 0),
                DiscoveredFile::new(docs.join("sub").join("b.md"), 1),
                DiscoveredFile::new(single, 0),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_empty_directory_yields_nothing() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let found: Vec<_> = discover_files(&[temp_dir.path().to_path_buf()])?.collect();
        assert!(found.is_empty());
        Ok(())
    }
}
