use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use walkdir::WalkDir;

use svgslim::{format_bytes, MetaDataAggregator, RuleConfig, SvgOptimizer};

#[derive(Parser)]
#[command(name = "svgslim")]
#[command(version, about = "A rule-based SVG optimizer", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Path to a JSON file with custom optimization rules; defaults apply
    /// without it
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only calculate potential savings without modifying the files
    #[arg(short, long, global = true)]
    dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Display the version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: (),

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Optimize the given SVG files and directories in place
    Process {
        /// Files or directories to process
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout with success; everything else
            // is an argument error.
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    print!("{}", err);
                    ExitCode::SUCCESS
                }
                _ => {
                    eprint!("{}", err);
                    ExitCode::FAILURE
                }
            };
        }
    };

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let Command::Process { ref paths } = cli.command;

    let mut aggregator = MetaDataAggregator::new();
    for path in paths {
        process_path(path, &config, &cli, &mut aggregator);
    }

    if !cli.quiet {
        print_summary(&aggregator);
    }

    ExitCode::SUCCESS
}

fn load_config(path: Option<&Path>) -> Result<RuleConfig, svgslim::SvgslimError> {
    match path {
        Some(path) => RuleConfig::from_json_file(path),
        None => Ok(RuleConfig::default()),
    }
}

/// A failure on one file is reported and the batch continues; only the
/// current path is skipped.
fn process_path(path: &Path, config: &RuleConfig, cli: &Cli, aggregator: &mut MetaDataAggregator) {
    if path.is_dir() {
        for entry in WalkDir::new(path).into_iter().filter_map(Result::ok) {
            if entry.file_type().is_file() && has_svg_extension(entry.path()) {
                optimize_file(entry.path(), config, cli, aggregator);
            }
        }
    } else if path.is_file() && has_svg_extension(path) {
        optimize_file(path, config, cli, aggregator);
    } else {
        eprintln!("\"{}\" is not a valid SVG file or directory.", path.display());
    }
}

fn has_svg_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn optimize_file(
    path: &Path,
    config: &RuleConfig,
    cli: &Cli,
    aggregator: &mut MetaDataAggregator,
) {
    let result = (|| {
        let mut optimizer = SvgOptimizer::from_file(path)?;
        optimizer.with_rules(config.clone());
        optimizer.optimize()?;
        if !cli.dry_run {
            optimizer.save_to_file(path)?;
        }
        optimizer.metadata()
    })();

    match result {
        Ok(meta) => {
            aggregator.add_file_data(meta.original_size, meta.optimized_size);
            if !cli.quiet {
                println!("{} ({:.2}%)", path.display(), meta.saved_percentage());
            }
        }
        Err(err) => {
            eprintln!("{}: {}", path.display(), err);
        }
    }
}

fn print_summary(aggregator: &MetaDataAggregator) {
    println!();
    println!("Files optimized: {}", aggregator.optimized_file_count());
    println!(
        "Total size: {} -> {}",
        format_bytes(aggregator.total_original_size()),
        format_bytes(aggregator.total_optimized_size())
    );
    println!(
        "Saved: {} ({:.2}%)",
        format_bytes(aggregator.saved_bytes()),
        aggregator.saved_percentage()
    );
}
