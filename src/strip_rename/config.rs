//! Configuration for strip rename operations.

use std::path::PathBuf;
use std::{fmt, fs};

use anyhow::Context;
use itertools::Itertools;
use serde::Deserialize;

use crate::strip_rename::PatternSet;

/// Media file extensions that subtitle companions are matched against.
///
/// Stored without the leading dot: the dot before the extension stays in the subtitle name,
/// so `movie..mkv` becomes `movie...en.srt`.
pub const MEDIA_EXTENSIONS: [&str; 6] = ["mkv", "mp4", "avi", "m4v", "mov", "wmv"];

/// A subtitle language slot.
///
/// A subtitle file belongs to the language if any label is contained in its name,
/// ignoring case. The suffix replaces the media extension of the renamed file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Language {
    pub name: String,
    pub labels: Vec<String>,
    pub suffix: String,
}

impl Language {
    #[must_use]
    pub fn new(name: &str, labels: &[&str], suffix: &str) -> Self {
        Self {
            name: name.to_string(),
            labels: labels.iter().map(|label| label.to_lowercase()).collect(),
            suffix: suffix.to_string(),
        }
    }

    /// Check if any label of this language is part of the filename.
    #[must_use]
    pub fn matches(&self, filename: &str) -> bool {
        let filename = filename.to_lowercase();
        self.labels
            .iter()
            .any(|label| !label.is_empty() && filename.contains(&label.to_lowercase()))
    }
}

/// Built-in language table.
#[must_use]
pub fn default_languages() -> Vec<Language> {
    vec![
        Language::new("English", &["english", ".en.", ".eng."], ".en.srt"),
        Language::new("Spanish", &["spanish", ".es.", ".spa."], ".es.srt"),
        Language::new("French", &["french", ".fr.", ".fre."], ".fr.srt"),
        Language::new("German", &["german", ".de.", ".ger."], ".de.srt"),
    ]
}

/// Config from the user config file.
#[derive(Debug, Default, Deserialize)]
pub struct StripRenameConfig {
    #[serde(default)]
    pub patterns_file: Option<PathBuf>,
    #[serde(default)]
    pub media_extensions: Vec<String>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub dryrun: bool,
    #[serde(default)]
    pub verbose: bool,
}

/// Wrapper needed for parsing the config section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    strip_rename: StripRenameConfig,
}

/// Final config created from CLI arguments and user config file.
#[derive(Debug)]
pub struct StripConfig {
    pub dryrun: bool,
    pub force: bool,
    pub languages: Vec<Language>,
    pub media_extensions: Vec<String>,
    pub patterns_file: Option<PathBuf>,
    pub replace: String,
    pub strip: Option<String>,
    pub verbose: bool,
}

impl StripRenameConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    pub fn get_user_config() -> anyhow::Result<Self> {
        let Some(path) = crate::config_path() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {error}",
                path.display()
            )),
        }
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.strip_rename)
            .context("Failed to parse strip_rename config TOML")
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            dryrun: false,
            force: false,
            languages: default_languages(),
            media_extensions: MEDIA_EXTENSIONS.iter().map(ToString::to_string).collect(),
            patterns_file: None,
            replace: String::new(),
            strip: None,
            verbose: false,
        }
    }
}

impl StripConfig {
    /// Create config from the user config file values, falling back to built-in defaults.
    #[must_use]
    pub fn from_user_config(user_config: StripRenameConfig) -> Self {
        let defaults = Self::default();

        let media_extensions = if user_config.media_extensions.is_empty() {
            defaults.media_extensions
        } else {
            user_config
                .media_extensions
                .into_iter()
                .map(|extension| normalize_extension(&extension))
                .filter(|extension| !extension.is_empty())
                .collect()
        };

        let languages = if user_config.languages.is_empty() {
            defaults.languages
        } else {
            user_config.languages
        };

        Self {
            dryrun: user_config.dryrun,
            languages,
            media_extensions,
            patterns_file: user_config.patterns_file,
            verbose: user_config.verbose,
            ..defaults
        }
    }

    /// Load the patterns for this run.
    ///
    /// A strip string overrides the patterns file.
    ///
    /// # Errors
    /// Returns an error if the patterns file is missing or invalid.
    pub fn load_patterns(&self) -> anyhow::Result<PatternSet> {
        if let Some(strip) = &self.strip {
            return PatternSet::from_literal(strip);
        }

        let path = self
            .patterns_file
            .as_deref()
            .or_else(|| crate::config::default_patterns_path())
            .context("Failed to determine patterns file path")?;

        PatternSet::from_file(path)
    }
}

/// Remove surrounding whitespace and the leading dot from an extension.
fn normalize_extension(extension: &str) -> String {
    let extension = extension.trim();
    extension.strip_prefix('.').unwrap_or(extension).to_string()
}

impl fmt::Display for StripConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let languages = self
            .languages
            .iter()
            .map(|language| format!("    {} -> {}", language.name, language.suffix))
            .join("\n");
        writeln!(f, "Config:")?;
        writeln!(f, "  dryrun:     {}", crate::colorize_bool(self.dryrun))?;
        writeln!(f, "  force:      {}", crate::colorize_bool(self.force))?;
        writeln!(f, "  verbose:    {}", crate::colorize_bool(self.verbose))?;
        writeln!(f, "  strip:      \"{}\"", self.strip.as_deref().unwrap_or_default())?;
        writeln!(f, "  replace:    \"{}\"", self.replace)?;
        writeln!(
            f,
            "  patterns:   {}",
            self.patterns_file
                .as_ref()
                .map_or_else(|| "default".to_string(), |path| path.display().to_string())
        )?;
        writeln!(f, "  extensions: [{}]", self.media_extensions.join(", "))?;
        write!(f, "  languages:\n{languages}")
    }
}
