//! CLI entry point for stigguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `stigguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use stigguard_app::{
    GateInput, ResolveInput, decision_exit_code, error_code, input_error_report,
    parse_gate_report, render_annotations, render_markdown, run_gate, run_resolve,
    run_selection, serialize_report, to_renderable,
};
use stigguard_settings::Overrides;
use stigguard_store::{FileCatalog, SelectionCache};
use stigguard_types::{GateMode, GateReport, TargetDescriptor};
use time::{Date, OffsetDateTime};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "stigguard",
    version,
    about = "Benchmark resolution and compliance gating for STIG remediation pipelines"
)]
struct Cli {
    /// Path to stigguard config TOML (a missing file means preset defaults).
    #[arg(long, global = true, default_value = "stigguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (default|strict).
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pin the benchmark for a run (resolving it on first use) and print it as JSON.
    Resolve {
        /// Benchmark catalog JSON (array or {"benchmarks": [...]}).
        #[arg(long)]
        catalog: Utf8PathBuf,

        /// Target OS family, e.g. WindowsServer.
        #[arg(long)]
        os_family: String,

        /// Target OS major version, e.g. 2022.
        #[arg(long)]
        os_version: String,

        /// Target role, e.g. MS or DC.
        #[arg(long)]
        role: Option<String>,

        #[command(flatten)]
        run: RunArgs,

        /// Allow the degraded, version-agnostic fallback match.
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        allow_generic_fallback: Option<bool>,

        /// Also write the selection JSON to this file.
        #[arg(long)]
        out: Option<Utf8PathBuf>,
    },

    /// Print the run's pinned selection. Exits 1 if none exists.
    Selection {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Evaluate a scan phase's findings and decide whether the pipeline may proceed.
    Gate {
        /// Findings JSON written by the scan engine.
        #[arg(long)]
        report_path: Utf8PathBuf,

        /// Exemption policy JSON.
        #[arg(long)]
        exemptions: Option<Utf8PathBuf>,

        /// Fail on any CAT I finding without an active exemption.
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        fail_on_cat_i: Option<bool>,

        /// Fail when CAT II findings exceed the threshold.
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        fail_on_cat_ii: Option<bool>,

        /// CAT II failures tolerated (inclusive).
        #[arg(long)]
        cat_ii_threshold: Option<u32>,

        /// Date exemption expiry is checked against (YYYY-MM-DD, default today in UTC).
        #[arg(long, value_parser = parse_date)]
        today: Option<Date>,

        /// standard halts on a failed decision; informational only records it.
        #[arg(long, value_enum, default_value_t = ModeArg::Standard)]
        mode: ModeArg,

        /// Pipeline phase label recorded in the report (e.g. baseline, verify).
        #[arg(long)]
        phase: Option<String>,

        /// Run cache holding the pinned benchmark to record in the report.
        #[arg(long, requires = "run_id")]
        cache_dir: Option<Utf8PathBuf>,

        #[arg(long, requires = "cache_dir")]
        run_id: Option<String>,

        /// Where to write the gate report JSON (stdout when omitted).
        #[arg(long)]
        decision_out: Option<Utf8PathBuf>,

        /// Write a Markdown summary alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown summary (if enabled).
        #[arg(long, default_value = "artifacts/stigguard/gate.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing gate report.
    Md {
        /// Path to the gate report JSON.
        #[arg(long, default_value = "artifacts/stigguard/gate.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing gate report.
    Annotations {
        /// Path to the gate report JSON.
        #[arg(long, default_value = "artifacts/stigguard/gate.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Directory holding per-run selection caches.
    #[arg(long)]
    cache_dir: Utf8PathBuf,

    /// Pipeline run identifier ([A-Za-z0-9._-]).
    #[arg(long)]
    run_id: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Standard,
    Informational,
}

impl From<ModeArg> for GateMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Standard => GateMode::Standard,
            ModeArg::Informational => GateMode::Informational,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = parse_args();

    match cli.cmd {
        Commands::Resolve {
            ref catalog,
            ref os_family,
            ref os_version,
            ref role,
            ref run,
            allow_generic_fallback,
            ref out,
        } => {
            let target = TargetDescriptor::new(os_family, os_version, role.as_deref());
            exit_on_error(
                "resolve",
                cmd_resolve(&cli, catalog, target, run, allow_generic_fallback, out.as_deref()),
            )
        }
        Commands::Selection { ref run } => exit_on_error("selection", cmd_selection(run)),
        Commands::Gate {
            ref report_path,
            ref exemptions,
            fail_on_cat_i,
            fail_on_cat_ii,
            cat_ii_threshold,
            today,
            mode,
            ref phase,
            ref cache_dir,
            ref run_id,
            ref decision_out,
            write_markdown,
            ref markdown_out,
        } => {
            let overrides = Overrides {
                profile: cli.profile.clone(),
                fail_on_cat_i,
                fail_on_cat_ii,
                cat_ii_threshold,
                allow_generic_fallback: None,
            };
            cmd_gate(GateArgs {
                config: &cli.config,
                overrides,
                report_path,
                exemptions: exemptions.as_deref(),
                today,
                mode: mode.into(),
                phase: phase.clone(),
                cache_dir: cache_dir.as_deref(),
                run_id: run_id.as_deref(),
                decision_out: decision_out.as_deref(),
                markdown_out: write_markdown.then_some(markdown_out.as_path()),
            })
        }
        Commands::Md { report, output } => exit_on_error("md", cmd_md(report, output)),
        Commands::Annotations { report, max } => {
            exit_on_error("annotations", cmd_annotations(report, max))
        }
    }
}

/// Usage errors exit 1 like every other failure; only help and version exit 0.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            if let Err(print_err) = err.print() {
                tracing::warn!(error = %print_err, "failed to print usage");
            }
            std::process::exit(code);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print a fatal error with its stable code and exit 1.
fn exit_on_error(command: &str, result: anyhow::Result<()>) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) => {
            report_error(command, &err);
            std::process::exit(1);
        }
    }
}

fn report_error(command: &str, err: &anyhow::Error) {
    match error_code(err) {
        Some(code) => eprintln!("stigguard {command} error: [{code}] {err:#}"),
        None => eprintln!("stigguard {command} error: {err:#}"),
    }
}

fn cmd_resolve(
    cli: &Cli,
    catalog: &Utf8Path,
    target: TargetDescriptor,
    run: &RunArgs,
    allow_generic_fallback: Option<bool>,
    out: Option<&Utf8Path>,
) -> anyhow::Result<()> {
    let cfg_text = read_config_text(&cli.config)?;
    let cache = SelectionCache::for_run(&run.cache_dir, &run.run_id).context("open selection cache")?;
    let catalog = FileCatalog::new(catalog);

    let output = run_resolve(ResolveInput {
        target,
        catalog: &catalog,
        cache: &cache,
        config_text: &cfg_text,
        overrides: Overrides {
            profile: cli.profile.clone(),
            allow_generic_fallback,
            ..Overrides::default()
        },
        now: OffsetDateTime::now_utc(),
    })?;

    let json = serde_json::to_string_pretty(&output.selection).context("serialize selection")?;
    if let Some(path) = out {
        write_text_file(path, &format!("{json}\n")).context("write selection")?;
    }
    println!("{json}");
    Ok(())
}

fn cmd_selection(run: &RunArgs) -> anyhow::Result<()> {
    let cache = SelectionCache::for_run(&run.cache_dir, &run.run_id).context("open selection cache")?;
    match run_selection(&cache)? {
        Some(selection) => {
            let json = serde_json::to_string_pretty(&selection).context("serialize selection")?;
            println!("{json}");
            Ok(())
        }
        None => anyhow::bail!("no pinned benchmark selection at {}", cache.path()),
    }
}

struct GateArgs<'a> {
    config: &'a Utf8Path,
    overrides: Overrides,
    report_path: &'a Utf8Path,
    exemptions: Option<&'a Utf8Path>,
    today: Option<Date>,
    mode: GateMode,
    phase: Option<String>,
    cache_dir: Option<&'a Utf8Path>,
    run_id: Option<&'a str>,
    decision_out: Option<&'a Utf8Path>,
    markdown_out: Option<&'a Utf8Path>,
}

fn cmd_gate(args: GateArgs<'_>) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config_text(args.config)?;
        let cache = match (args.cache_dir, args.run_id) {
            (Some(dir), Some(run_id)) => {
                Some(SelectionCache::for_run(dir, run_id).context("open selection cache")?)
            }
            _ => None,
        };

        let output = run_gate(GateInput {
            report_path: args.report_path,
            exemptions_path: args.exemptions,
            selection_cache: cache.as_ref(),
            config_text: &cfg_text,
            overrides: args.overrides.clone(),
            today: args.today,
            mode: args.mode,
            phase: args.phase.clone(),
        })?;

        emit_gate_report(&args, &output.report)?;
        Ok(decision_exit_code(&output.report))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            // Input errors always halt, informational mode included.
            let report =
                input_error_report(args.mode, args.phase.clone(), args.today, &format!("{err:#}"));
            if let Err(emit_err) = emit_gate_report(&args, &report) {
                tracing::warn!(
                    error = %format!("{emit_err:#}"),
                    "failed to write fail-closed gate report"
                );
            }
            report_error("gate", &err);
            std::process::exit(1);
        }
    }
}

fn emit_gate_report(args: &GateArgs<'_>, report: &GateReport) -> anyhow::Result<()> {
    let data = serialize_report(report)?;
    match args.decision_out {
        Some(path) => write_bytes_file(path, &data).context("write gate report")?,
        None => print!("{}", String::from_utf8_lossy(&data)),
    }
    if let Some(path) = args.markdown_out {
        let md = render_markdown(&to_renderable(report));
        write_text_file(path, &md).context("write markdown")?;
    }
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report = read_gate_report(&report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report = read_gate_report(&report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn read_gate_report(path: &Utf8Path) -> anyhow::Result<GateReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_gate_report(&text)
}

/// Missing config is allowed (preset defaults apply); any other read failure is not.
fn read_config_text(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(config = %path, "no config file; using preset defaults");
            Ok(String::new())
        }
        Err(e) => Err(e).with_context(|| format!("read config: {}", path)),
    }
}

fn parse_date(s: &str) -> Result<Date, String> {
    stigguard_types::parse_iso_date(s).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn write_bytes_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data).with_context(|| format!("write file: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes_file(path, text.as_bytes())
}
