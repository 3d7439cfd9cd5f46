//! Strip a matched substring from a filename and rename the file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::strip_rename::{StripConfig, StripError};

const CONFIRM_QUESTION: &str = "Would you like to proceed with renaming the files displayed above? [y/n] ";

/// Source of answers to the rename confirmation question.
pub trait Confirm {
    /// Ask the question and return the raw answer.
    ///
    /// # Errors
    /// Returns an error if the answer can not be read.
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Read the answer from standard input.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Confirm for StdinPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        print!("{}", question.magenta());
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        io::stdin().read_line(&mut input).context("Failed to read input")?;
        Ok(input)
    }
}

/// Accepted answers to the confirmation question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Yes,
    No,
}

impl Response {
    /// Parse an answer. Only `y` and `n` are accepted.
    ///
    /// # Errors
    /// Returns [`StripError::InvalidResponse`] for anything else.
    pub fn parse(input: &str) -> Result<Self, StripError> {
        match input.trim() {
            "y" => Ok(Self::Yes),
            "n" => Ok(Self::No),
            other => Err(StripError::InvalidResponse(other.to_string())),
        }
    }
}

/// Result of a single rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The file now has this name, or would have it in a dry run.
    Renamed(String),
    /// The user declined and the whole run should stop.
    Declined,
}

/// Replace every occurrence of the matched substring.
///
/// A substring that is not in the filename gives back the filename unchanged.
#[must_use]
pub fn new_filename(filename: &str, matched: &str, replacement: &str) -> String {
    if matched.is_empty() {
        return filename.to_string();
    }
    filename.replace(matched, replacement)
}

/// Fail if the rename would replace another existing file.
///
/// A change in capitalization only is allowed,
/// since on a case-insensitive file system the new path resolves to the file itself.
///
/// # Errors
/// Returns an error if a different file already exists at `new_path`.
pub(crate) fn ensure_target_is_free(old_path: &Path, new_path: &Path) -> Result<()> {
    let capitalization_change_only =
        crate::path_to_string(old_path).to_lowercase() == crate::path_to_string(new_path).to_lowercase();
    if old_path != new_path && !capitalization_change_only && new_path.exists() {
        anyhow::bail!(
            "Can not rename {}: {} already exists",
            old_path.display(),
            new_path.display()
        );
    }
    Ok(())
}

/// Rename `filename` in `directory` with the matched substring replaced.
///
/// Asks for confirmation unless forced.
/// A dry run prints the change without asking or renaming.
///
/// # Errors
/// Returns an error for an invalid confirmation answer, if another file already has the new name,
/// or if the rename fails.
pub fn rename_file(
    directory: &Path,
    matched: &str,
    filename: &str,
    config: &StripConfig,
    prompt: &mut dyn Confirm,
) -> Result<RenameOutcome> {
    let new_name = new_filename(filename, matched, &config.replace);
    let old_path = directory.join(filename);
    let new_path = directory.join(&new_name);

    println!("Old Name: {}\nNew Name: {}", old_path.display(), new_path.display());
    if config.verbose {
        crate::show_diff(filename, &new_name);
    }
    println!();

    if config.dryrun {
        return Ok(RenameOutcome::Renamed(new_name));
    }

    ensure_target_is_free(&old_path, &new_path)?;

    if !config.force {
        let answer = prompt.ask(CONFIRM_QUESTION)?;
        if Response::parse(&answer)? == Response::No {
            return Ok(RenameOutcome::Declined);
        }
    }

    if old_path != new_path {
        fs::rename(&old_path, &new_path)
            .with_context(|| format!("Failed to rename {} to {}", old_path.display(), new_path.display()))?;
    }

    Ok(RenameOutcome::Renamed(new_name))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::fs::File;

    /// Answers the confirmation question from a fixed list.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedPrompt {
        answers: VecDeque<String>,
        pub(crate) asked: usize,
    }

    impl ScriptedPrompt {
        pub(crate) fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|answer| format!("{answer}\n")).collect(),
                asked: 0,
            }
        }
    }

    impl Confirm for ScriptedPrompt {
        fn ask(&mut self, _question: &str) -> Result<String> {
            self.asked += 1;
            self.answers.pop_front().context("No more answers")
        }
    }

    fn config(force: bool) -> StripConfig {
        StripConfig {
            force,
            ..StripConfig::default()
        }
    }

    #[test]
    fn strips_matched_substring_exactly() {
        assert_eq!(new_filename("Show.S01E01.WEB-DL.mkv", "WEB-DL", ""), "Show.S01E01..mkv");
    }

    #[test]
    fn replaces_all_occurrences() {
        assert_eq!(new_filename("a.x264.b.x264.mkv", "x264", "x265"), "a.x265.b.x265.mkv");
    }

    #[test]
    fn missing_substring_keeps_name() {
        assert_eq!(new_filename("Show.mkv", "WEB-DL", ""), "Show.mkv");
    }

    #[test]
    fn parses_responses() {
        assert_eq!(Response::parse("y\n").unwrap(), Response::Yes);
        assert_eq!(Response::parse("n").unwrap(), Response::No);
        assert!(matches!(Response::parse("maybe"), Err(StripError::InvalidResponse(_))));
        assert!(matches!(Response::parse("Y"), Err(StripError::InvalidResponse(_))));
        assert!(matches!(Response::parse(""), Err(StripError::InvalidResponse(_))));
    }

    #[test]
    fn forced_rename_does_not_ask() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("Show.S01E01.WEB-DL.mkv")).unwrap();
        let mut prompt = ScriptedPrompt::default();

        let outcome = rename_file(dir.path(), "WEB-DL", "Show.S01E01.WEB-DL.mkv", &config(true), &mut prompt).unwrap();

        assert_eq!(outcome, RenameOutcome::Renamed("Show.S01E01..mkv".to_string()));
        assert_eq!(prompt.asked, 0);
        assert!(dir.path().join("Show.S01E01..mkv").exists());
        assert!(!dir.path().join("Show.S01E01.WEB-DL.mkv").exists());
    }

    #[test]
    fn confirmed_rename_uses_replacement() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("Show.HDTV.mkv")).unwrap();
        let mut prompt = ScriptedPrompt::new(&["y"]);
        let config = StripConfig {
            replace: "WEB".to_string(),
            ..StripConfig::default()
        };

        let outcome = rename_file(dir.path(), "HDTV", "Show.HDTV.mkv", &config, &mut prompt).unwrap();

        assert_eq!(outcome, RenameOutcome::Renamed("Show.WEB.mkv".to_string()));
        assert_eq!(prompt.asked, 1);
        assert!(dir.path().join("Show.WEB.mkv").exists());
    }

    #[test]
    fn declined_rename_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("Show.HDTV.mkv")).unwrap();
        let mut prompt = ScriptedPrompt::new(&["n"]);

        let outcome = rename_file(dir.path(), "HDTV", "Show.HDTV.mkv", &config(false), &mut prompt).unwrap();

        assert_eq!(outcome, RenameOutcome::Declined);
        assert!(dir.path().join("Show.HDTV.mkv").exists());
    }

    #[test]
    fn invalid_response_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("Show.HDTV.mkv")).unwrap();
        let mut prompt = ScriptedPrompt::new(&["maybe"]);

        let error = rename_file(dir.path(), "HDTV", "Show.HDTV.mkv", &config(false), &mut prompt).unwrap_err();

        assert!(matches!(
            error.downcast_ref::<StripError>(),
            Some(StripError::InvalidResponse(_))
        ));
        assert!(dir.path().join("Show.HDTV.mkv").exists());
    }

    #[test]
    fn same_name_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("Show.mkv")).unwrap();
        let mut prompt = ScriptedPrompt::default();

        let outcome = rename_file(dir.path(), "WEB-DL", "Show.mkv", &config(true), &mut prompt).unwrap();

        assert_eq!(outcome, RenameOutcome::Renamed("Show.mkv".to_string()));
        assert!(dir.path().join("Show.mkv").exists());
    }

    #[test]
    fn dry_run_does_not_ask_or_rename() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("Show.HDTV.mkv")).unwrap();
        let mut prompt = ScriptedPrompt::default();
        let config = StripConfig {
            dryrun: true,
            ..StripConfig::default()
        };

        let outcome = rename_file(dir.path(), "HDTV", "Show.HDTV.mkv", &config, &mut prompt).unwrap();

        assert_eq!(outcome, RenameOutcome::Renamed("Show..mkv".to_string()));
        assert_eq!(prompt.asked, 0);
        assert!(dir.path().join("Show.HDTV.mkv").exists());
    }

    #[test]
    fn existing_target_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Show.HDTV.mkv"), "hdtv").unwrap();
        fs::write(dir.path().join("Show..mkv"), "webdl").unwrap();
        let mut prompt = ScriptedPrompt::default();

        let result = rename_file(dir.path(), "HDTV", "Show.HDTV.mkv", &config(true), &mut prompt);

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(dir.path().join("Show.HDTV.mkv")).unwrap(), "hdtv");
        assert_eq!(fs::read_to_string(dir.path().join("Show..mkv")).unwrap(), "webdl");
    }

    #[test]
    fn existing_target_fails_before_asking() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("Show.HDTV.mkv")).unwrap();
        File::create(dir.path().join("Show..mkv")).unwrap();
        let mut prompt = ScriptedPrompt::new(&["y"]);

        assert!(rename_file(dir.path(), "HDTV", "Show.HDTV.mkv", &config(false), &mut prompt).is_err());
        assert_eq!(prompt.asked, 0);
    }

    #[test]
    fn capitalization_change_is_allowed() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("Show.hdtv.mkv")).unwrap();
        let mut prompt = ScriptedPrompt::default();
        let config = StripConfig {
            force: true,
            replace: "HDTV".to_string(),
            ..StripConfig::default()
        };

        let outcome = rename_file(dir.path(), "hdtv", "Show.hdtv.mkv", &config, &mut prompt).unwrap();

        assert_eq!(outcome, RenameOutcome::Renamed("Show.HDTV.mkv".to_string()));
        assert!(dir.path().join("Show.HDTV.mkv").exists());
    }

    #[test]
    fn missing_source_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompt = ScriptedPrompt::default();
        assert!(rename_file(dir.path(), "HDTV", "Show.HDTV.mkv", &config(true), &mut prompt).is_err());
    }
}
