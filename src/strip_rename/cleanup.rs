use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::strip_rename::{DirectoryListing, PatternSet, SubtitleRename};

/// Find subtitle files left over after renaming and delete them when forced.
///
/// Reads a fresh listing so subtitles already renamed are not considered.
/// Subtitles claimed during the pass are never candidates,
/// which matters for a dry run where they are still on disk under their old name.
/// Without `force` the candidates are only printed.
/// Returns the paths that matched.
///
/// # Errors
/// Returns an error if the directory can not be read or a file can not be deleted.
pub fn cleanup(
    directory: &Path,
    patterns: &PatternSet,
    claimed: &[SubtitleRename],
    force: bool,
    dryrun: bool,
) -> Result<Vec<PathBuf>> {
    let mut leftovers = Vec::new();
    if patterns.subtitle.is_empty() {
        return Ok(leftovers);
    }

    let listing = DirectoryListing::read(directory)?;
    let delete = force && !dryrun;
    let heading = if dryrun {
        "Dryrun:".cyan().bold()
    } else if delete {
        "Delete:".red().bold()
    } else {
        "Keep:".yellow().bold()
    };

    let is_claimed = |name: &str| {
        claimed
            .iter()
            .any(|subtitle| subtitle.from == name || subtitle.to == name)
    };

    for name in listing
        .iter()
        .filter(|name| patterns.is_subtitle(name) && !is_claimed(name.as_str()))
    {
        let path = directory.join(name);
        println!("{heading} {}", path.display());
        if delete {
            fs::remove_file(&path).with_context(|| format!("Failed to delete {}", path.display()))?;
        }
        leftovers.push(path);
    }

    Ok(leftovers)
}
