use clap::Parser;
use ticklist::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    let data_dir = cli::resolve_data_dir(&cli);

    if let Err(e) = ticklist::tui::run(&data_dir) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
