use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Filenames in the target directory at the moment of listing.
///
/// The listing is not refreshed when files are renamed,
/// so consumers must tolerate names that no longer exist on disk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    names: Vec<String>,
}

impl DirectoryListing {
    /// List regular files directly under the given directory, sorted by name.
    ///
    /// # Errors
    /// Returns an error if the directory can not be read.
    pub fn read(directory: &Path) -> Result<Self> {
        let mut names = Vec::new();
        for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
            let entry = entry.with_context(|| format!("Failed to read directory: {}", directory.display()))?;
            if !entry.path().is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => crate::print_warning!("Skipping file with invalid unicode name: {}", entry.path().display()),
            }
        }
        names.sort_unstable();
        Ok(Self { names })
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names ordered by their first two characters.
    ///
    /// The sort is stable so names sharing a two character prefix keep their listed order.
    #[must_use]
    pub fn sorted_by_prefix(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_by(|a, b| a.chars().take(2).cmp(b.chars().take(2)));
        names
    }
}

impl From<Vec<String>> for DirectoryListing {
    fn from(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl<'a> IntoIterator for &'a DirectoryListing {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
