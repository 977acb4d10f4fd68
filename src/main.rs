//! dxxconv - convert between .DXX and .wav files

use std::process;

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser};
use dxx::processing::{DxxProcessor, Endpoint, ParallelConverter};
use dxx::{init_logging, list_names, Args, Config, DxxError};

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        if e.downcast_ref::<DxxError>().is_some_and(DxxError::is_unsupported_format) {
            print_usage_on_error();
        }
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if args.list_formats {
        for name in list_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = Config::from_args_and_config(&args)?;
    if config.verbose() {
        println!("{}", dxx::get_library_info());
        println!();
    }

    match args.to.as_deref() {
        Some(ext) => run_batch(&args, ext, config),
        None => run_single(&args, config),
    }
}

fn run_single(args: &Args, config: Config) -> anyhow::Result<()> {
    let [input, output] = args.paths.as_slice() else {
        Args::command()
            .error(
                clap::error::ErrorKind::WrongNumberOfValues,
                "expected INPUT and OUTPUT (use --to EXT to convert several files)",
            )
            .exit();
    };

    let result = DxxProcessor::new(config).process_file(input, output)?;
    if result.skipped {
        println!("Skipped (exists): {}", result.output_path.display());
    }
    log::debug!(
        "{} -> {}: {} samples in {:.3}s",
        result.input_path.display(),
        result.output_path.display(),
        result.sample_count,
        result.processing_time_secs
    );
    Ok(())
}

fn run_batch(args: &Args, ext: &str, config: Config) -> anyhow::Result<()> {
    let target = Endpoint::from_extension(ext)?;

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create output directory {}", dir.display()))?;
    }

    let jobs = ParallelConverter::plan(&args.paths, target, args.out_dir.as_deref())?;
    let converter = ParallelConverter::new(config)?;
    let report = converter.process_batch(jobs);

    for (job, err) in report.failures() {
        eprintln!("Failed: {} -> {}: {}", job.input.display(), job.output.display(), err);
    }

    println!("=== Conversion Complete ===");
    println!("Converted: {}/{}", report.succeeded(), report.outcomes.len());
    println!("Samples: {}", report.total_samples());
    println!("Time: {:.2}s ({} workers)", report.processing_time_secs, report.worker_count);

    if report.failed() > 0 {
        bail!("{} of {} conversions failed", report.failed(), report.outcomes.len());
    }
    Ok(())
}

fn print_usage_on_error() {
    let valid: Vec<String> = list_names().iter().map(|n| format!(".{}", n)).collect();
    eprintln!("Valid extensions: {}, .wav", valid.join(", "));
    eprintln!();
    let _ = Args::command().write_help(&mut std::io::stderr());
}
