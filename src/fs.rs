use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::is_markdown_file;
use crate::domain::Collection;
use crate::error::Result;

/// Wipes `output_dir` and recreates it empty.
pub fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        log::info!("Cleaning output directory: {}", output_dir.display());
        fs::remove_dir_all(output_dir)?;
    }
    fs::create_dir_all(output_dir)?;
    Ok(())
}

/// Copies every non-markdown file of `collection` to the same relative path
/// under the collection's route, next to its pages.
///
/// Returns the number of files copied. A missing collection directory copies
/// nothing.
pub fn copy_collection_assets(
    content_dir: &Path,
    output_dir: &Path,
    collection: Collection,
) -> Result<usize> {
    let collection_dir = content_dir.join(collection.dir_name());
    if !collection_dir.is_dir() {
        return Ok(0);
    }
    let route_dir = output_dir.join(collection.route());

    let mut copied = 0;
    for entry in WalkDir::new(&collection_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_dir() || is_markdown_file(path) {
            continue;
        }
        let Ok(relative_path) = path.strip_prefix(&collection_dir) else {
            continue;
        };
        copy_asset(path, &route_dir.join(relative_path))?;
        copied += 1;
    }
    Ok(copied)
}

fn copy_asset(path: &Path, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    log::info!("Copying asset: {} -> {}", path.display(), output_path.display());
    fs::copy(path, output_path)?;
    Ok(())
}
