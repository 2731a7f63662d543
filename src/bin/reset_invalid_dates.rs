use clap::Parser;
use console::style;
use photodate::report::{print_dry_run_notice, print_reset_header, print_reset_row};
use photodate::{ResetOptions, logging, reset_directory};
use std::path::PathBuf;
use std::process::ExitCode;

/// Reset impossible EXIF dates
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Directory to clean
    dir: PathBuf,

    /// Actually delete the metadata
    #[arg(long)]
    execute: bool,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    let options = ResetOptions::new(cli.execute);

    if !options.execute {
        print_dry_run_notice();
    }
    print_reset_header();

    match reset_directory(&cli.dir, &options, print_reset_row) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", style(error).red());
            ExitCode::FAILURE
        }
    }
}
