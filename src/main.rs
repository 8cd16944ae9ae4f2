use std::{fs, path::PathBuf, process};

use clap::Parser;
use lumen::run_program;

/// lumen is a small, strictly evaluated functional language with mutable
/// records and arrays.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the source file to run.
    source: PathBuf,
}

fn main() {
    let args = Args::parse();

    let script = fs::read_to_string(&args.source).unwrap_or_else(|_| {
                     eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                               args.source.display());
                     process::exit(1);
                 });

    match run_program(&script) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("{e}");
            process::exit(e.exit_code());
        },
    }
}
