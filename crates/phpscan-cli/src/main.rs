//! phpscan - php.ini security baseline auditor
//!
//! Audits a php.ini against the built-in baseline (or a TOML rule catalog)
//! and prints every deviation. Run without a path for the interactive flow.

mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use phpscan_audit::{render_json, render_text, AuditResult, Catalog, ConfigAuditor, Configuration};
use phpscan_common::config::{Config, ReportFormat};
use phpscan_common::logging::{init_logging_with_config, LogConfig};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

const DEFAULT_CONFIG_PATH: &str = "/etc/phpscan/phpscan.toml";

/// Exit status for a completed audit
const EXIT_OK: u8 = 0;

/// Exit status when the php.ini to audit does not exist
const EXIT_MISSING_INPUT: u8 = 1;

/// Exit status when --fail-on-findings is set and the audit found deviations
const EXIT_FINDINGS: u8 = 2;

const MISSING_FILE_MESSAGE: &str =
    "The specified file does not exist. Please check the path and try again.";

/// phpscan php.ini Auditor
#[derive(Parser, Debug)]
#[command(name = "phpscan")]
#[command(version)]
#[command(about = "Audit a php.ini against a security baseline", long_about = None)]
struct Args {
    /// php.ini to audit (prompted for when omitted)
    path: Option<PathBuf>,

    /// Tool configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// TOML rule catalog replacing the built-in baseline
    #[arg(long)]
    rules: Option<String>,

    /// Report format (text, json)
    #[arg(long)]
    format: Option<ReportFormat>,

    /// Save the report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Exit with status 2 when any deviation is found
    #[arg(long)]
    fail_on_findings: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<String>,

    /// Log span enter/exit events
    #[arg(long)]
    log_spans: bool,

    /// Include source file and line in log events
    #[arg(long)]
    log_file_lines: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = load_config(&args, Path::new(DEFAULT_CONFIG_PATH))?.merge_env();
    let config = apply_overrides(&args, config);

    init_logging_with_config(LogConfig::from(&config.logging));
    debug!("phpscan v{}", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let status = run(&args, &config, &mut stdin.lock(), &mut io::stdout())?;
    Ok(ExitCode::from(status))
}

/// Run one audit, reading answers from `input` and writing to `output`
///
/// Returns the process exit status.
fn run<R: BufRead, W: Write>(args: &Args, config: &Config, input: &mut R, output: &mut W) -> Result<u8> {
    let catalog = match config.audit.rules_file.as_deref() {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::builtin(),
    };
    info!("Using catalog with {} rules", catalog.len());

    let interactive = args.path.is_none();
    let path = match args.path.clone() {
        Some(path) => path,
        None => {
            writeln!(output, "Welcome to the phpscan php.ini security auditor!")?;
            PathBuf::from(prompt::ask(
                input,
                output,
                "Please enter the path to your php.ini file: ",
            )?)
        }
    };

    let ini = match Configuration::from_file(&path) {
        Ok(ini) => ini,
        Err(e) if e.is_missing_input() => {
            warn!("php.ini not found: {}", path.display());
            writeln!(output, "{}", MISSING_FILE_MESSAGE)?;
            return Ok(EXIT_MISSING_INPUT);
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    let format = config.audit.report_format;
    let (result, report) = audit_config(&ini, &path, catalog, format)?;

    if interactive && format == ReportFormat::Text {
        writeln!(output, "\nAudit Report:\n")?;
    }
    if report.is_empty() {
        writeln!(output, "No deviations from the baseline were found.")?;
    } else {
        writeln!(output, "{}", report)?;
    }

    match args.output.as_deref() {
        Some(target) => {
            save_report(target, &report)?;
            info!("Report saved to {}", target.display());
        }
        None if interactive => offer_save(input, output, &report)?,
        None => {}
    }

    if config.audit.fail_on_findings && !result.is_clean() {
        warn!("{} deviations found", result.findings.len());
        return Ok(EXIT_FINDINGS);
    }

    Ok(EXIT_OK)
}

/// Load the tool configuration file, or defaults when there is none
///
/// `--config` must exist; `default_path` is read only when present.
fn load_config(args: &Args, default_path: &Path) -> Result<Config> {
    let config = match args.config.as_deref() {
        Some(path) => Config::from_file(path)?,
        None if default_path.exists() => Config::from_file(default_path)?,
        None => Config::default(),
    };
    Ok(config)
}

/// Apply command-line overrides on top of file and environment settings
fn apply_overrides(args: &Args, mut config: Config) -> Config {
    if let Some(rules) = &args.rules {
        config.audit.rules_file = Some(rules.clone());
    }
    if let Some(format) = args.format {
        config.audit.report_format = format;
    }
    if args.fail_on_findings {
        config.audit.fail_on_findings = true;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &args.log_format {
        config.logging.format = format.clone();
    }
    if args.log_spans {
        config.logging.spans = true;
    }
    if args.log_file_lines {
        config.logging.file_lines = true;
    }
    config
}

/// Audit a parsed php.ini, rendering the report in the requested format
fn audit_config(
    ini: &Configuration,
    path: &Path,
    catalog: Catalog,
    format: ReportFormat,
) -> Result<(AuditResult, String)> {
    let result = ConfigAuditor::with_catalog(catalog).run_audit(ini);

    let report = match format {
        ReportFormat::Text => render_text(&result.findings),
        ReportFormat::Json => render_json(&result, path.to_str())?,
    };

    Ok((result, report))
}

fn offer_save<R: BufRead, W: Write>(input: &mut R, output: &mut W, report: &str) -> Result<()> {
    if prompt::confirm(input, output, "\nDo you want to save the report to a file? (yes/no): ")? {
        let target = prompt::ask(input, output, "Please enter the path to save the report file: ")?;
        save_report(Path::new(&target), report)?;
        writeln!(output, "Report saved to {}", target)?;
    } else {
        writeln!(output, "Report not saved.")?;
    }
    Ok(())
}

fn save_report(path: &Path, report: &str) -> Result<()> {
    std::fs::write(path, report)
        .with_context(|| format!("Failed to save report to {}", path.display()))
}
