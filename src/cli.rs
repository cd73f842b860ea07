use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tick",
    about = concat!("[x] ticklist v", env!("CARGO_PKG_VERSION"), " - your tasks, one list"),
    version
)]
pub struct Cli {
    /// Keep tasks in a different directory (default: ~/.ticklist)
    #[arg(short = 'C', long = "data-dir")]
    pub data_dir: Option<PathBuf>,
}

/// Resolve the data directory: `--data-dir` flag, then `$TICKLIST_DIR`,
/// then `~/.ticklist`.
pub fn resolve_data_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.data_dir {
        return dir.clone();
    }
    if let Ok(dir) = std::env::var("TICKLIST_DIR")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".ticklist")
}
