use crate::core::DiscoveredFile;
use crate::error::{ExtractError, Result};
use ignore::WalkBuilder;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File extensions treated as markdown (case-sensitive)
pub const MARKDOWN_EXTENSIONS: &[&str] = &["markdown", "mdown", "mkdn", "mkd", "md"];

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext))
}

/// Lazily walk `root`, yielding markdown files with their depth below it.
///
/// Hidden entries are skipped, ignore files are not consulted, and
/// siblings come out sorted by name.
pub fn walk_markdown(root: &Path) -> impl Iterator<Item = DiscoveredFile> + use<> {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(true)
        .follow_links(true)
        .sort_by_file_name(|a, b| a.cmp(b));

    builder.build().filter_map(|result| match result {
        Ok(entry) => {
            let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
            if is_file && entry.depth() > 0 && is_markdown(entry.path()) {
                let depth = entry.depth() - 1;
                Some(DiscoveredFile::new(entry.into_path(), depth))
            } else {
                None
            }
        }
        Err(err) => {
            tracing::warn!("Error walking directory: {}", err);
            None
        }
    })
}

/// Create `dir` and any missing ancestors.
///
/// Every directory created by this call gets an empty `marker` file;
/// directories that already existed are left alone. A directory that
/// appears between the existence check and `create_dir` counts as
/// already existing. Returns the directories this call created.
pub fn ensure_dir(dir: &Path, marker: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut missing = Vec::new();
    let mut current = Some(dir);
    while let Some(path) = current {
        if path.as_os_str().is_empty() || path.is_dir() {
            break;
        }
        missing.push(path);
        current = path.parent();
    }

    let mut created = Vec::new();
    for path in missing.into_iter().rev() {
        match fs::create_dir(path) {
            Ok(()) => {
                if let Some(name) = marker {
                    let marker_path = path.join(name);
                    fs::File::create(&marker_path).map_err(|source| ExtractError::Write {
                        path: marker_path,
                        source,
                    })?;
                }
                created.push(path.to_path_buf());
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists && path.is_dir() => {
                tracing::debug!("Directory {:?} appeared concurrently", path);
            }
            Err(source) => {
                return Err(ExtractError::CreateDir {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
    Ok(created)
}

/// Write one block verbatim, replacing any existing file.
pub fn write_block(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| ExtractError::Write {
        path: path.to_path_buf(),
        source,
    })
}
