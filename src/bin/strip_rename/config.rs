use std::path::PathBuf;

use media_strip::strip_rename::{StripConfig, StripError, StripRenameConfig};

use crate::Args;

/// Create the target directory and final config from CLI arguments and the user config file.
///
/// # Errors
/// Returns an error if the path is missing or invalid,
/// or if the config file cannot be read or parsed.
pub fn from_args(args: Args) -> anyhow::Result<(PathBuf, StripConfig)> {
    let path = args.path.clone().ok_or(StripError::MissingPath)?;
    let root = media_strip::resolve_target_directory(&path)?;
    let user_config = StripRenameConfig::get_user_config()?;
    Ok((root, merge(args, user_config)))
}

/// Combine CLI args with the user config. CLI values take precedence.
fn merge(args: Args, user_config: StripRenameConfig) -> StripConfig {
    let config = StripConfig::from_user_config(user_config);
    StripConfig {
        dryrun: args.print || config.dryrun,
        force: args.force,
        patterns_file: args.patterns.or(config.patterns_file),
        replace: args.replace,
        strip: args.strip,
        verbose: args.verbose || config.verbose,
        ..config
    }
}
