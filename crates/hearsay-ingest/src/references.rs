//! Supplementary reference material loading

use std::path::{Path, PathBuf};
use tracing::{info, warn};

const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md"];

/// Read every `.txt`/`.md` file under `dir` and join them into one block.
///
/// Files are read in sorted name order, each headed by `# filename`.
/// Per-file read failures are logged and skipped; a missing directory or an
/// empty one yields an empty string, never an error.
pub fn load_reference_materials(dir: &Path) -> String {
    if !dir.is_dir() {
        info!(
            path = %dir.display(),
            "reference directory not present, continuing without references"
        );
        return String::new();
    }

    let mut files: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .map_or(false, |ext| SUPPORTED_EXTENSIONS.contains(&ext))
            })
            .collect(),
        Err(err) => {
            warn!(path = %dir.display(), error = %err, "cannot list reference directory");
            return String::new();
        }
    };
    files.sort();

    let mut materials = Vec::new();
    for path in &files {
        match read_reference(path) {
            Ok(content) => materials.push(content),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable reference");
            }
        }
    }

    if materials.is_empty() {
        info!(path = %dir.display(), "no readable reference materials found");
        return String::new();
    }

    info!(count = materials.len(), "reference materials loaded");
    materials.join("\n\n---\n\n")
}

fn read_reference(path: &Path) -> std::io::Result<String> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("reference");
    let content = std::fs::read_to_string(path)?;
    Ok(format!("# {name}\n\n{content}"))
}
