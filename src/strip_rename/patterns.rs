//! Load strip patterns from a line-oriented patterns file.
//!
//! Each non-blank line is one rule:
//! - `/…/` is a regular expression,
//! - `SUBTITLE:/…/` is a subtitle file regular expression,
//! - anything else is a literal string matched by containment.

use std::path::Path;
use std::{fmt, fs};

use anyhow::{Context, Result};
use colored::Colorize;
use itertools::Itertools;
use regex::Regex;

use crate::strip_rename::StripError;

const SUBTITLE_PREFIX: &str = "SUBTITLE:";

/// Patterns loaded once per run.
#[derive(Debug, Default, Clone)]
pub struct PatternSet {
    pub direct: Vec<String>,
    pub regex: Vec<Regex>,
    pub subtitle: Vec<Regex>,
}

impl PatternSet {
    /// Read and parse the patterns file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file can not be read or contains an invalid rule.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read patterns file: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse patterns file: {}", path.display()))
    }

    /// Build a pattern set that only strips the given literal string.
    ///
    /// # Errors
    /// Returns an error if the string is empty.
    pub fn from_literal(strip: &str) -> Result<Self> {
        if strip.is_empty() {
            return Err(StripError::EmptyStrip.into());
        }
        Ok(Self {
            direct: vec![strip.to_string()],
            ..Self::default()
        })
    }

    /// Parse pattern rules from text.
    ///
    /// # Errors
    /// Returns an error if a regex does not compile
    /// or a subtitle rule is missing its `/` delimiters.
    pub fn parse(content: &str) -> Result<Self> {
        let mut patterns = Self::default();

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix(SUBTITLE_PREFIX) {
                let rest = rest.trim();
                let pattern = delimited(rest)
                    .with_context(|| format!("Subtitle rule on line {line_number} must be wrapped in '/': {rest}"))?;
                patterns.subtitle.push(compile(pattern, line_number)?);
            } else if let Some(pattern) = delimited(trimmed) {
                patterns.regex.push(compile(pattern, line_number)?);
            } else {
                patterns.direct.push(line.to_string());
            }
        }

        Ok(patterns)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.regex.is_empty() && self.subtitle.is_empty()
    }

    /// Check if a filename matches any subtitle pattern.
    #[must_use]
    pub fn is_subtitle(&self, filename: &str) -> bool {
        self.subtitle.iter().any(|regex| regex.is_match(filename))
    }
}

/// Return the text between a leading and trailing `/`.
fn delimited(text: &str) -> Option<&str> {
    if text.len() >= 2 && text.starts_with('/') && text.ends_with('/') {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

fn compile(pattern: &str, line_number: usize) -> Result<Regex> {
    if pattern.is_empty() {
        anyhow::bail!("Empty regex on line {line_number}");
    }
    Regex::new(pattern).with_context(|| format!("Invalid regex on line {line_number}: '{pattern}'"))
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "Patterns:".bold())?;
        writeln!(
            f,
            "  direct:   [{}]",
            self.direct.iter().map(|s| format!("\"{s}\"")).join(", ")
        )?;
        writeln!(
            f,
            "  regex:    [{}]",
            self.regex.iter().map(|r| format!("/{}/", r.as_str())).join(", ")
        )?;
        write!(
            f,
            "  subtitle: [{}]",
            self.subtitle.iter().map(|r| format!("/{}/", r.as_str())).join(", ")
        )
    }
}
