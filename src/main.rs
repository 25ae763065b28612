use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dupscan::{
    CancellationToken, CheckReport, DocumentParser, DupscanConfig, MatchResult, MatchSource,
    ProgressUpdate, ScanMode, ScanStatus, check_files, read_sources, request_cancellation,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    /// Compare paragraphs within one file
    Single,
    /// Compare paragraphs within and across all files
    Cross,
}

impl From<ModeArg> for ScanMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Single => ScanMode::Single,
            ModeArg::Cross => ScanMode::Cross,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "dupscan",
    version,
    about = "Find near-duplicate paragraphs in exam and question banks"
)]
struct Args {
    /// Files to check (.txt, .md)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Minimum similarity in [0, 1] (default 0.75)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Scan mode (default: single for one file, cross otherwise)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable the candidate filter and score every pair
    #[arg(long, default_value_t = false)]
    exhaustive: bool,

    /// Build paragraph profiles on all cores
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Report at most this many matches
    #[arg(long)]
    limit: Option<usize>,

    /// Cancel the check after this many seconds and print partial results
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print progress updates to stderr
    #[arg(long, default_value_t = false)]
    progress: bool,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dupscan=info,matcher=info,ingest=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(args: &Args) -> Result<DupscanConfig> {
    let mut cfg = match &args.config {
        Some(path) => DupscanConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DupscanConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        cfg.scan.threshold = threshold;
    }
    if let Some(mode) = args.mode {
        cfg.scan.mode = Some(mode.into());
    }
    if args.exhaustive {
        cfg.filter.enabled = false;
    }
    if args.parallel {
        cfg.scan.use_parallel = true;
    }
    if args.limit.is_some() {
        cfg.scan.limit = args.limit;
    }
    cfg.validate().context("invalid configuration")?;
    Ok(cfg)
}

fn location(result: &MatchResult) -> String {
    match &result.source {
        MatchSource::Single { document } => format!(
            "{document} #{} <-> #{}",
            result.index_a + 1,
            result.index_b + 1
        ),
        MatchSource::Cross {
            document_a,
            document_b,
        } => format!(
            "{document_a} #{} <-> {document_b} #{}",
            result.index_a + 1,
            result.index_b + 1
        ),
    }
}

fn print_text(report: &CheckReport, threshold: f64) {
    let outcome = &report.outcome;
    for result in &outcome.matches {
        println!("[{:>3}%] {}", result.percent(), location(result));
        println!("    A: {}", result.paragraph_a);
        println!("    B: {}", result.paragraph_b);
    }

    let stats = &outcome.stats;
    println!(
        "{} documents, {} paragraphs, {} of {} pairs compared ({} filtered), {} matches at >= {:.0}%",
        report.documents.len(),
        report.paragraph_count(),
        stats.pairs_visited,
        stats.total_pairs,
        stats.pairs_filtered,
        outcome.matches.len(),
        threshold * 100.0
    );
    if outcome.status == ScanStatus::Cancelled {
        println!("check cancelled: results are partial");
    }
}

fn print_json(report: &CheckReport) -> Result<()> {
    let documents: Vec<_> = report
        .documents
        .iter()
        .map(|d| serde_json::json!({ "name": d.name, "paragraphs": d.len() }))
        .collect();
    let value = serde_json::json!({
        "status": report.outcome.status,
        "stats": report.outcome.stats,
        "elapsed_ms": report.outcome.elapsed.as_millis() as u64,
        "documents": documents,
        "matches": report.outcome.matches,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let cfg = load_config(&args)?;
    let files = read_sources(&args.files)?;
    let scan_cfg = cfg.scan_config(files.len());
    let parser = DocumentParser::new(cfg.ingest.clone());

    let token = CancellationToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, cancelling");
                request_cancellation(&token);
            }
        });
    }
    if let Some(secs) = args.timeout_secs {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            warn!(timeout_secs = secs, "timeout reached, cancelling");
            request_cancellation(&token);
        });
    }

    let show_progress = args.progress;
    let observer = move |update: &ProgressUpdate| {
        if show_progress {
            eprintln!("[{:>3}%] {}", update.percent, update.message);
        }
    };

    let mut report = check_files(&files, &parser, &scan_cfg, &observer, &token).await?;
    if let Some(limit) = cfg.scan.limit {
        report.outcome.truncate(limit);
    }

    if args.json {
        print_json(&report)?;
    } else {
        print_text(&report, scan_cfg.threshold);
    }
    Ok(())
}
