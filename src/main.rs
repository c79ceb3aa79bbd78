use clap::Parser;
use shelflife::cli::{PurgeMode, run_cli_with_config};
use shelflife::config::default_target_dir;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sort a directory's entries into recent/aged/old buckets by modification time",
    long_about = None
)]
struct Args {
    /// Directory to organize (prompted for when omitted)
    path: Option<PathBuf>,

    /// Purge the old bucket to the trash without asking
    #[arg(long, conflicts_with = "keep")]
    purge: bool,

    /// Keep the old bucket; skip the trash prompt entirely
    #[arg(long)]
    keep: bool,

    /// Path to a configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    println!("Welcome to shelflife - age-based directory organization made easy!");

    let args = Args::parse();

    let base_path = match args.path.or_else(prompt_for_directory) {
        Some(path) => path,
        None => return,
    };

    let purge_mode = if args.purge {
        PurgeMode::Always
    } else if args.keep {
        PurgeMode::Never
    } else {
        PurgeMode::Prompt
    };

    if let Err(e) = run_cli_with_config(&base_path, purge_mode, args.config.as_deref()) {
        eprintln!("Error: {}", e);
    }
}

/// Asks for a directory on stdin, falling back to the default when the
/// answer is blank.
fn prompt_for_directory() -> Option<PathBuf> {
    print!("Which directory should be organized? (blank for the default): ");
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut answer = String::new();
    match io::stdin().read_line(&mut answer) {
        // End of input mid-prompt
        Ok(0) => {
            println!("\nInterruption detected. Exiting.");
            None
        }
        Ok(_) => {
            let trimmed = answer.trim();
            if trimmed.is_empty() {
                match default_target_dir() {
                    Some(default) => {
                        println!("No folder received, defaulting to {}", default.display());
                        Some(default)
                    }
                    None => {
                        eprintln!("No folder received and no home directory to fall back on.");
                        None
                    }
                }
            } else {
                Some(PathBuf::from(trimmed))
            }
        }
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            None
        }
    }
}
