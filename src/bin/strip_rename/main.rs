mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;

use media_strip::strip_rename::{Outcome, StdinPrompt, StripError, StripRename, USAGE_EXIT_CODE};

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Remove strings from media file names and rename matching subtitles"
)]
pub struct Args {
    /// Directory containing the files to rename
    #[arg(short, long, value_hint = clap::ValueHint::DirPath, required_unless_present = "SHELL")]
    path: Option<PathBuf>,

    /// String to remove from file names instead of the configured patterns
    #[arg(short, long, value_name = "TEXT")]
    strip: Option<String>,

    /// Replacement for the removed string
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    replace: String,

    /// Rename without asking and delete leftover subtitles
    #[arg(short, long)]
    force: bool,

    /// Patterns file to use instead of the default
    #[arg(short = 'c', long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    patterns: Option<PathBuf>,

    /// Only print changes without renaming or deleting
    #[arg(short = 'x', long)]
    print: bool,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Some(ref shell) = args.completion {
        return report(media_strip::generate_shell_completion(
            *shell,
            Args::command(),
            true,
            env!("CARGO_BIN_NAME"),
        ));
    }

    match run(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => report(Err(error)),
    }
}

fn run(args: Args) -> anyhow::Result<Outcome> {
    let (root, config) = config::from_args(args)?;
    let patterns = config.load_patterns()?;
    StripRename::new(root, config, patterns).run(&mut StdinPrompt)
}

/// Print the error and map it to the exit status.
fn report(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) if error.downcast_ref::<StripError>().is_some() => {
            println!("{}", error.to_string().red());
            ExitCode::from(USAGE_EXIT_CODE)
        }
        Err(error) => {
            media_strip::print_error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
