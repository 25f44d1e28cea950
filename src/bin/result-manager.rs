use std::{io, path::PathBuf};

use campus_records::{
    ResultTable,
    config::{PartialConfig, Settings},
    console::Console,
    logging, shell,
};
use clap::Parser;
use colored::Colorize;

/// Command-line arguments for the result manager
#[derive(Parser, Debug)]
#[command(author, version, about = "Student result manager", long_about = None)]
struct Args {
    /// JSON file with default settings; flags win over it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter for stderr output, e.g. "info" (RUST_LOG wins when set)
    #[arg(long)]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let flags = PartialConfig { log_level: args.log_level, ..PartialConfig::default() };
    let settings = match Settings::resolve(args.config.as_deref(), flags) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{}", format!("Error: {err}").as_str().red());
            return;
        }
    };
    if let Err(err) = logging::init(&settings.log_level) {
        eprintln!("{}", format!("Warning: {err}").as_str().yellow());
    }

    let mut table = ResultTable::new();
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    if let Err(err) = shell::results::run(&mut table, &mut console) {
        tracing::error!("console failed: {err}");
    }
    tracing::info!(students = table.len(), "session ended");
}
