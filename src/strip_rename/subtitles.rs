//! Rename subtitle files to follow a renamed media file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::strip_rename::rename::ensure_target_is_free;
use crate::strip_rename::{DirectoryListing, Language, PatternSet, StripConfig};

/// Languages that already received a subtitle file during this run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LanguageSlots {
    satisfied: HashSet<String>,
}

impl LanguageSlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_satisfied(&self, language: &Language) -> bool {
        self.satisfied.contains(&language.name)
    }

    pub fn satisfy(&mut self, language: &Language) {
        self.satisfied.insert(language.name.clone());
    }
}

/// A subtitle file renamed to follow its media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleRename {
    pub from: String,
    pub to: String,
    pub language: String,
}

/// Subtitle filename for the given media filename.
///
/// The first configured media extension found in the name is replaced once with the language suffix.
/// Extensions are stored without the dot, so the dot before the extension is kept.
/// Returns `None` if the name contains none of the media extensions.
#[must_use]
pub fn subtitle_name(media_name: &str, media_extensions: &[String], suffix: &str) -> Option<String> {
    media_extensions
        .iter()
        .find(|extension| !extension.is_empty() && media_name.contains(extension.as_str()))
        .map(|extension| media_name.replacen(extension.as_str(), suffix, 1))
}

/// Rename subtitle files matching the subtitle patterns to follow a renamed media file.
///
/// Candidates come from the listing taken before any renames,
/// ordered by their first two characters so the earliest name wins a language.
/// Each language is given at most one subtitle per run.
/// Candidates that no longer exist on disk are skipped.
///
/// # Errors
/// Returns an error if renaming a subtitle file fails,
/// or if another file already has the new subtitle name.
pub fn resolve_subtitles(
    directory: &Path,
    media_name: &str,
    listing: &DirectoryListing,
    patterns: &PatternSet,
    config: &StripConfig,
    slots: &mut LanguageSlots,
) -> Result<Vec<SubtitleRename>> {
    let mut renamed = Vec::new();
    if patterns.subtitle.is_empty() {
        return Ok(renamed);
    }

    for name in listing.sorted_by_prefix() {
        if !patterns.is_subtitle(name) {
            continue;
        }

        let Some(language) = config
            .languages
            .iter()
            .find(|language| language.matches(name) && !slots.is_satisfied(language))
        else {
            continue;
        };

        let Some(new_name) = subtitle_name(media_name, &config.media_extensions, &language.suffix) else {
            crate::print_warning!(
                "No media extension in {media_name}, skipping {} subtitle: {name}",
                language.name
            );
            continue;
        };

        let old_path = directory.join(name);
        let new_path = directory.join(&new_name);
        if !old_path.is_file() {
            if config.verbose {
                crate::print_warning!("Subtitle no longer exists: {}", old_path.display());
            }
            continue;
        }

        println!("{} {}", "Subtitle:".cyan().bold(), language.name);
        println!("Old Name: {}\nNew Name: {}\n", old_path.display(), new_path.display());

        if !config.dryrun && old_path != new_path {
            ensure_target_is_free(&old_path, &new_path)?;
            fs::rename(&old_path, &new_path)
                .with_context(|| format!("Failed to rename {} to {}", old_path.display(), new_path.display()))?;
        }

        slots.satisfy(language);
        renamed.push(SubtitleRename {
            from: name.to_string(),
            to: new_name,
            language: language.name.clone(),
        });
    }

    Ok(renamed)
}
