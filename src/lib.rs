pub mod config;
pub mod strip_rename;

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Command;
use clap_complete::Shell;
use colored::{ColoredString, Colorize};
use difference::{Changeset, Difference};

use crate::strip_rename::StripError;

pub use crate::config::config_path;

/// Format bool value as a coloured string.
#[must_use]
pub fn colorize_bool(value: bool) -> ColoredString {
    if value { "true".green() } else { "false".red() }
}

/// Resolve the given target directory to an absolute path.
///
/// The directory must exist, otherwise a [`StripError`] is returned
/// so the caller can exit with a usage status.
///
/// ```rust
/// use std::path::Path;
/// use media_strip::resolve_target_directory;
///
/// let absolute_path = resolve_target_directory(Path::new("src")).unwrap();
/// assert!(absolute_path.is_absolute());
/// ```
pub fn resolve_target_directory(path: &Path) -> Result<PathBuf> {
    let input_path = path_to_string(path).trim().to_string();
    if input_path.is_empty() {
        return Err(StripError::MissingPath.into());
    }

    let directory = PathBuf::from(input_path);
    if !directory.exists() {
        return Err(StripError::PathNotFound(directory).into());
    }
    if !directory.is_dir() {
        return Err(StripError::NotADirectory(directory).into());
    }

    let absolute_path = dunce::canonicalize(&directory)
        .with_context(|| format!("Failed to resolve path: {}", directory.display()))?;

    // Canonicalize fails for network drives on Windows :(
    if path_to_string(&absolute_path).starts_with(r"\\?") && !path_to_string(&directory).starts_with(r"\\?") {
        Ok(directory)
    } else {
        Ok(absolute_path)
    }
}

/// Convert given path to string with invalid Unicode handling.
pub fn path_to_string(path: &Path) -> String {
    path.to_str().map_or_else(
        || path.to_string_lossy().to_string().replace('\u{FFFD}', ""),
        std::string::ToString::to_string,
    )
}

#[inline]
pub fn print_error(message: &str) {
    eprintln!("{}", format!("Error: {message}").red());
}

#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => {
        $crate::print_error(&format!($($arg)*))
    };
}

#[inline]
pub fn print_warning(message: &str) {
    eprintln!("{}", message.yellow());
}

#[macro_export]
macro_rules! print_warning {
    ($($arg:tt)*) => {
        $crate::print_warning(&format!($($arg)*))
    };
}

/// Leading padding that lines up the first common run of characters in both names,
/// so the stripped part stands out when the names are printed on top of each other.
fn diff_padding(changeset: &Changeset, old: &str, new: &str) -> (String, String) {
    let Some((old_index, new_index)) = changeset.diffs.iter().find_map(|diff| match diff {
        Difference::Same(same) if same.chars().count() >= 3 => old.find(same.as_str()).zip(new.find(same.as_str())),
        _ => None,
    }) else {
        return (String::new(), String::new());
    };

    match old_index.cmp(&new_index) {
        Ordering::Greater => (String::new(), " ".repeat(old_index - new_index)),
        Ordering::Less => (" ".repeat(new_index - old_index), String::new()),
        Ordering::Equal => (String::new(), String::new()),
    }
}

/// Create a coloured filename diff: removed text in red, added text in green.
pub fn color_diff(old: &str, new: &str) -> (String, String) {
    let changeset = Changeset::new(old, new, "");
    let (mut old_diff, mut new_diff) = diff_padding(&changeset, old, new);

    for diff in &changeset.diffs {
        match diff {
            Difference::Same(same) => {
                old_diff.push_str(same);
                new_diff.push_str(same);
            }
            Difference::Add(added) => new_diff.push_str(&added.green().to_string()),
            Difference::Rem(removed) => old_diff.push_str(&removed.red().to_string()),
        }
    }

    (old_diff, new_diff)
}

/// Print the old and new filename on top of each other.
pub fn show_diff(old: &str, new: &str) {
    let (old_diff, new_diff) = color_diff(old, new);
    println!("{old_diff}");
    if old_diff != new_diff {
        println!("{new_diff}");
    }
}

/// Generate a shell completion script for the given shell.
pub fn generate_shell_completion(shell: Shell, mut command: Command, install: bool, command_name: &str) -> Result<()> {
    if install {
        let out_dir = get_shell_completion_dir(shell)?;
        let path = clap_complete::generate_to(shell, &mut command, command_name, out_dir)?;
        println!("Completion file generated to: {}", path.display());
    } else {
        clap_complete::generate(shell, &mut command, command_name, &mut std::io::stdout());
    }
    Ok(())
}

/// Directory for installing the completion file.
///
/// Uses the system directory if it exists,
/// otherwise creates the per-user directory under home.
/// Only bash, fish and zsh are supported for installing.
fn get_shell_completion_dir(shell: Shell) -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to get home directory")?;
    let (user_dir, system_dir) = match shell {
        Shell::Bash => (home.join(".bash_completion.d"), "/etc/bash_completion.d"),
        Shell::Fish => (home.join(".config/fish/completions"), "/usr/share/fish/completions"),
        Shell::Zsh => (home.join(".zsh/completions"), "/usr/share/zsh/site-functions"),
        _ => anyhow::bail!("Installing completions is not supported for {shell}, print them instead"),
    };

    let system_dir = PathBuf::from(system_dir);
    if !user_dir.exists() && system_dir.exists() {
        return Ok(system_dir);
    }

    std::fs::create_dir_all(&user_dir)
        .with_context(|| format!("Failed to create completion directory {}", user_dir.display()))?;
    Ok(user_dir)
}
