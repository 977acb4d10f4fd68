//! Print the number of samples stored in .DXX files

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use dxx::{file_sample_count, init_logging};

#[derive(Parser, Debug)]
#[command(name = "len_file_dxx")]
#[command(about = "Print the number of samples in .DXX files", version)]
struct Args {
    /// DXX files to inspect
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if let [file] = args.files.as_slice() {
        let count = file_sample_count(file)
            .with_context(|| format!("Cannot inspect {}", file.display()))?;
        println!("{}", count);
        return Ok(());
    }

    for file in &args.files {
        let count = file_sample_count(file)
            .with_context(|| format!("Cannot inspect {}", file.display()))?;
        println!("{}: {}", file.display(), count);
    }
    Ok(())
}
