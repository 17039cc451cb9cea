//! Command-line interface for modcheck.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{Config, DEFAULT_CONFIG_NAMES};
use crate::error::CheckError;
use crate::report::{self, RenderOptions};
use crate::runner::{self, Checker, ValidationReport};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Commented config written by `modcheck init`.
pub const CONFIG_TEMPLATE: &str = include_str!("templates/modcheck.yaml");

/// Cross-reference checker for grand-strategy mod content.
///
/// Modcheck scans script, interface and localisation files for flags,
/// event targets and scripted localisations, and reports names that are
/// cleared but never set, used but never defined, or defined but never
/// used.
#[derive(Parser)]
#[command(name = "modcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check country, state and global flags and event targets
    Variables(ValidateArgs),
    /// Check scripted localisation definitions and references
    #[command(name = "scripted-loc")]
    ScriptedLoc(ValidateArgs),
    /// Run every checker and summarize
    All(AllArgs),
    /// Write a config file from the built-in template
    Init(InitArgs),
}

/// Flags shared by every checking command.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Mod root directory
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Only scan files staged in git
    #[arg(long)]
    pub staged: bool,

    /// Exit with code 1 when any issue is found
    #[arg(long)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to config YAML file (default: auto-discover in the mod root)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for a single checker.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Also write the plain report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the all command.
#[derive(Args, Debug, Clone)]
pub struct AllArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the init command.
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "modcheck.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Resolve and check the mod root.
pub fn resolve_root(path: &Path) -> Result<PathBuf, CheckError> {
    if !path.exists() {
        return Err(CheckError::InvalidPath(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(CheckError::NotADirectory(path.to_path_buf()));
    }
    path.canonicalize()
        .map_err(|_| CheckError::InvalidPath(path.to_path_buf()))
}

/// Root and config for a checking command, or the exit code to stop with.
fn prepare(common: &CommonArgs) -> Result<(PathBuf, Config), i32> {
    if common.no_color {
        colored::control::set_override(false);
    }

    let root = match resolve_root(&common.path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(EXIT_ERROR);
        }
    };

    match Config::load(&root, common.config.as_deref()) {
        Ok((config, source)) => {
            if let Some(source) = source {
                tracing::debug!(path = %source.display(), "loaded config");
            }
            Ok((root, config))
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if common.config.is_none() {
                eprintln!(
                    "Fix or remove the config file ({}) in the mod root",
                    DEFAULT_CONFIG_NAMES.join(" or ")
                );
            }
            Err(EXIT_ERROR)
        }
    }
}

/// Run one checker, print its report and optionally save it.
///
/// Returns `None` when staged mode found nothing to scan.
fn check(
    checker: Checker,
    common: &CommonArgs,
    root: &Path,
    config: &Config,
    output: Option<&Path>,
) -> anyhow::Result<Option<ValidationReport>> {
    let report = match runner::validate(checker, root, config, common.staged) {
        Ok(report) => report,
        Err(CheckError::EmptyInput) => {
            println!("No staged files to validate for {}.", checker);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let options = RenderOptions {
        root: root.display().to_string(),
        staged: common.staged,
        output_file: output.map(|p| p.display().to_string()),
        color: !common.no_color,
    };

    print!("{}", report::render(&report, &options));

    if let Some(path) = output {
        report::write_report_file(path, &report, &options)?;
    }

    Ok(Some(report))
}

fn exit_code(strict: bool, has_issues: bool) -> i32 {
    if strict && has_issues {
        EXIT_FAILED
    } else {
        EXIT_SUCCESS
    }
}

/// Run a single checker command.
pub fn run_validate(checker: Checker, args: &ValidateArgs) -> anyhow::Result<i32> {
    let (root, config) = match prepare(&args.common) {
        Ok(prepared) => prepared,
        Err(code) => return Ok(code),
    };

    let report = check(
        checker,
        &args.common,
        &root,
        &config,
        args.output.as_deref(),
    )?;

    let has_issues = report.map(|r| r.has_issues()).unwrap_or(false);
    Ok(exit_code(args.common.strict, has_issues))
}

/// Path of the temp report written by `all` for one checker.
pub fn temp_report_path(checker: Checker) -> PathBuf {
    std::env::temp_dir().join(format!("modcheck-{}.txt", checker))
}

/// Run every checker, then print a summary.
pub fn run_all(args: &AllArgs) -> anyhow::Result<i32> {
    let (root, config) = match prepare(&args.common) {
        Ok(prepared) => prepared,
        Err(code) => return Ok(code),
    };

    let mut failed: Vec<(Checker, PathBuf)> = Vec::new();

    for checker in Checker::ALL {
        let report_path = temp_report_path(checker);
        let report = check(
            checker,
            &args.common,
            &root,
            &config,
            Some(&report_path),
        )?;
        println!();

        if let Some(report) = report {
            if report.has_issues() {
                failed.push((checker, report_path));
            }
        }
    }

    write_summary(&failed, args.common.no_color);
    Ok(exit_code(args.common.strict, !failed.is_empty()))
}

fn write_summary(failed: &[(Checker, PathBuf)], no_color: bool) {
    use colored::*;

    let rule = "=".repeat(80);
    println!("{}", rule);
    println!("SUMMARY");
    println!("{}", rule);

    if failed.is_empty() {
        let msg = "✓ All validations passed";
        if no_color {
            println!("{}", msg);
        } else {
            println!("{}", msg.green());
        }
        return;
    }

    let names: Vec<&str> = failed.iter().map(|(c, _)| c.as_str()).collect();
    let msg = format!("✗ Issues found by: {}", names.join(", "));
    if no_color {
        println!("{}", msg);
    } else {
        println!("{}", msg.red());
    }
    println!();
    println!("Reports:");
    for (checker, path) in failed {
        println!("  {:<14} {}", checker.as_str(), path.display());
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it, use --force, or use --output to choose another path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to tune the allow-lists for your mod", args.output.display());
    println!("  2. Run: modcheck all --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
