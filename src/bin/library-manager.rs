use std::{io, path::PathBuf};

use campus_records::{
    LibrarySystem,
    config::{PartialConfig, Settings},
    console::Console,
    logging, shell,
};
use clap::Parser;
use colored::Colorize;

/// Command-line arguments for the library manager
#[derive(Parser, Debug)]
#[command(author, version, about = "City library catalog manager", long_about = None)]
struct Args {
    /// Directory holding the record files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Book file name inside the data directory
    #[arg(long)]
    books_file: Option<String>,

    /// Member file name inside the data directory
    #[arg(long)]
    members_file: Option<String>,

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

    let flags = PartialConfig {
        data_dir: args.data_dir,
        books_file: args.books_file,
        members_file: args.members_file,
        log_level: args.log_level,
    };
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

    let (mut system, report) =
        match LibrarySystem::open(&settings.books_path(), &settings.members_path()) {
            Ok(opened) => opened,
            Err(err) => {
                tracing::error!("{err}");
                println!("{}", "Error loading files.".red());
                return;
            }
        };

    tracing::info!(
        books = report.books.loaded,
        members = report.members.loaded,
        "records loaded from {}",
        settings.data_dir.display()
    );
    if report.books.skipped > 0 || report.members.skipped > 0 {
        println!(
            "{}",
            format!(
                "Skipped {} unreadable book line(s) and {} unreadable member line(s).",
                report.books.skipped, report.members.skipped
            )
            .as_str()
            .yellow()
        );
    }
    for problem in system.check_consistency() {
        tracing::warn!("inconsistent records: {problem}");
    }

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    if let Err(err) = shell::library::run(&mut system, &mut console) {
        tracing::error!("console failed: {err}");
    }
}
