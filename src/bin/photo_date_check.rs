use clap::Parser;
use console::style;
use photodate::report::{print_audit_header, print_audit_row};
use photodate::{AuditOptions, audit_directory, logging};
use std::path::PathBuf;
use std::process::ExitCode;

/// Sync Image Metadata with Filename Dates
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Directory containing images
    dir: PathBuf,

    /// Write filename date to metadata
    #[arg(long)]
    fix: bool,

    /// Compare Year, Month, and Day
    #[arg(long)]
    extensive: bool,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    let options = AuditOptions::new(cli.fix, cli.extensive);

    print_audit_header();

    match audit_directory(&cli.dir, &options, print_audit_row) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", style(error).red());
            ExitCode::FAILURE
        }
    }
}
