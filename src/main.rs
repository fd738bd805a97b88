//! gocov-tree: Go coverage report viewer CLI

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use colored::Colorize;
use gocov_tree::config::{default_config_json, load_config, CliOverrides, CONFIG_FILENAME};
use gocov_tree::input::is_url;
use gocov_tree::logging::init_logging;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Turn a Go coverage HTML report into a browsable file-tree page
#[derive(Parser, Debug)]
#[command(name = "gocov-tree")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Coverage report path or URL (omit when using a subcommand)
    #[arg(required = true)]
    input: Option<String>,

    /// Output HTML file (default: output.html)
    output: Option<PathBuf>,

    /// Prefix stripped from recorded file paths
    #[arg(long, value_name = "PREFIX")]
    strip_prefix: Option<String>,

    /// Fail when a recorded path does not contain the prefix
    #[arg(long)]
    require_prefix: bool,

    /// Where a report given as URL is saved (default: input.html)
    #[arg(long, value_name = "PATH")]
    download_to: Option<PathBuf>,

    /// Stage extracted files in a scratch directory instead of memory
    #[arg(long)]
    stage_on_disk: bool,

    /// Scratch directory for --stage-on-disk (default: files)
    #[arg(long, value_name = "DIR")]
    scratch_dir: Option<PathBuf>,

    /// Page title
    #[arg(long)]
    title: Option<String>,

    /// Hide per-file coverage percentages in the tree
    #[arg(long)]
    no_coverage: bool,

    /// Path to config file (default: search .gocovtreerc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .gocovtreerc.json with the default settings
    Init {
        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    init_logging(args.verbose, args.quiet);

    if let Some(Commands::Init { dir }) = &args.command {
        return match run_init(dir.as_deref()) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{}: {:#}", "Error".red().bold(), e);
                ExitCode::from(2)
            }
        };
    }

    run_convert(args)
}

fn run_convert(args: Args) -> ExitCode {
    let Some(input) = args.input else {
        eprintln!("{}: report file or url not provided", "Error".red().bold());
        return ExitCode::from(1);
    };

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match load_config(&cwd, args.config.as_deref()) {
        Ok(config) => config.merge_with_cli(CliOverrides {
            strip_prefix: args.strip_prefix,
            require_prefix: args.require_prefix,
            output: args.output,
            download_path: args.download_to,
            title: args.title,
            no_coverage: args.no_coverage,
            stage_on_disk: args.stage_on_disk,
            scratch_dir: args.scratch_dir,
        }),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            return ExitCode::from(e.exit_code());
        }
    };

    if !args.quiet && is_url(&input) {
        eprintln!(
            "{}: Downloading {} to {}",
            "Info".blue(),
            input,
            config.download_path.display()
        );
    }

    match gocov_tree::run(&input, &config) {
        Ok(summary) => {
            if !args.quiet {
                if summary.options == 0 {
                    eprintln!(
                        "{}: No files found in {}",
                        "Warning".yellow(),
                        summary.input.display()
                    );
                }
                eprintln!(
                    "{}: Wrote {} ({} files)",
                    "Info".blue(),
                    summary.output.display(),
                    summary.files
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run_init(dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    std::fs::write(&config_path, default_config_json() + "\n")
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    eprintln!("{}: Created {}", "Info".blue(), config_path.display());
    Ok(ExitCode::SUCCESS)
}
