//! Strip unwanted strings from media filenames.
//!
//! Files in a single directory are matched against the loaded patterns and renamed,
//! subtitle files are renamed to follow their media file,
//! and leftover subtitle files are removed at the end when forced.

mod cleanup;
mod config;
mod error;
mod listing;
pub mod matcher;
mod patterns;
mod rename;
mod subtitles;

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

pub use cleanup::cleanup;
pub use config::{Language, MEDIA_EXTENSIONS, StripConfig, StripRenameConfig, default_languages};
pub use error::{StripError, USAGE_EXIT_CODE};
pub use listing::DirectoryListing;
pub use patterns::PatternSet;
pub use rename::{Confirm, RenameOutcome, Response, StdinPrompt, new_filename, rename_file};
pub use subtitles::{LanguageSlots, SubtitleRename, resolve_subtitles, subtitle_name};

/// Counts of changes made during a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub renamed: usize,
    pub subtitles: usize,
    pub deleted: usize,
    pub leftover: usize,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed(Summary),
    /// The user declined a rename and the run stopped.
    Declined,
}

/// Strip rename handler for a single directory.
#[derive(Debug)]
pub struct StripRename {
    root: PathBuf,
    config: StripConfig,
    patterns: PatternSet,
}

impl StripRename {
    #[must_use]
    pub const fn new(root: PathBuf, config: StripConfig, patterns: PatternSet) -> Self {
        Self { root, config, patterns }
    }

    /// Run renaming.
    ///
    /// The directory is listed once up front and that listing is used for the whole pass.
    /// Leftover subtitles are handled from a fresh listing after all renames.
    ///
    /// # Errors
    /// Returns an error for an invalid confirmation answer or if a file operation fails.
    /// Renames done before the failure are not rolled back.
    pub fn run(&self, prompt: &mut dyn Confirm) -> Result<Outcome> {
        if self.config.verbose {
            println!("{}", self.config);
            println!("{}", self.patterns);
            println!("{}", format!("Renaming files under {}", self.root.display()).bold());
        }

        let listing = DirectoryListing::read(&self.root)?;
        let mut slots = LanguageSlots::new();
        let mut claimed: Vec<SubtitleRename> = Vec::new();
        let mut summary = Summary::default();

        for name in &listing {
            let Some(matched) = matcher::find(&self.patterns, name) else {
                continue;
            };

            if !self.root.join(name).is_file() {
                if self.config.verbose {
                    crate::print_warning!("Skipping {name}: file no longer exists");
                }
                continue;
            }

            match rename_file(&self.root, &matched, name, &self.config, prompt)? {
                RenameOutcome::Declined => return Ok(Outcome::Declined),
                RenameOutcome::Renamed(new_name) => {
                    if new_name != *name {
                        summary.renamed += 1;
                    }
                    let subtitles =
                        resolve_subtitles(&self.root, &new_name, &listing, &self.patterns, &self.config, &mut slots)?;
                    claimed.extend(subtitles);
                }
            }
        }

        summary.subtitles = claimed.len();
        let leftovers = cleanup(
            &self.root,
            &self.patterns,
            &claimed,
            self.config.force,
            self.config.dryrun,
        )?;
        if self.config.force && !self.config.dryrun {
            summary.deleted = leftovers.len();
        } else {
            summary.leftover = leftovers.len();
        }

        self.print_summary(&summary);
        Ok(Outcome::Completed(summary))
    }

    fn print_summary(&self, summary: &Summary) {
        if summary.renamed == 0 && summary.subtitles == 0 && summary.deleted == 0 && summary.leftover == 0 {
            if self.config.verbose {
                println!("No files to rename");
            }
            return;
        }

        let message = format!(
            "{} {}, {} {}",
            summary.renamed,
            if summary.renamed == 1 { "file" } else { "files" },
            summary.subtitles,
            if summary.subtitles == 1 { "subtitle" } else { "subtitles" },
        );

        if self.config.dryrun {
            println!("Dryrun: would have renamed {message}");
        } else {
            println!("{}", format!("Renamed {message}").green());
        }
        if summary.deleted > 0 {
            println!("{}", format!("Deleted {} leftover subtitles", summary.deleted).green());
        }
        if summary.leftover > 0 {
            println!("{} leftover subtitles kept, use --force to delete", summary.leftover);
        }
    }
}
