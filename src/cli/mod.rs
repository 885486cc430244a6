//! # CLI Module
//!
//! Command-line interface for the incremental copier.
//!
//! ## Usage
//! ```bash
//! # Copy everything new from a camera card
//! copy-sort /media/card ~/Backup
//!
//! # Keep a separate manifest per card
//! copy-sort --manifest ~/.card-a.manifest /media/card ~/Backup
//!
//! # Machine-readable summary
//! copy-sort --output json /media/card ~/Backup
//! ```

use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use console::{style, Term};
use copy_sort::core::manifest::default_manifest_path;
use copy_sort::core::session::{SyncOptions, SyncOutcome, SyncSession};
use copy_sort::core::transfer::DEFAULT_WORKERS;
use copy_sort::error::Result;
use copy_sort::events::{Event, EventChannel, EventReceiver, TransferEvent, TransferSummary};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Copy new files from SOURCE to DEST, sorting photos and videos by date
#[derive(Parser, Debug)]
#[command(name = "copy-sort")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to copy from
    source: PathBuf,

    /// Directory to copy into
    dest: PathBuf,

    /// Manifest of already-copied files (default: ~/.copy_sort_manifest.txt)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Number of parallel copy workers
    #[arg(short, long, default_value_t = DEFAULT_WORKERS, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    workers: usize,

    /// Summary format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Progress bar and a human-readable summary
    Pretty,
    /// JSON summary only
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    copy_sort::init_tracing();
    let cli = Cli::parse();
    let term = Term::stdout();

    let manifest_path = match cli.manifest {
        Some(path) => path,
        None => default_manifest_path()?,
    };

    if matches!(cli.output, OutputFormat::Pretty) {
        term.write_line(&format!("Using manifest {}", manifest_path.display()))
            .ok();
    }

    let session = SyncSession::new(
        SyncOptions::new(cli.source, cli.dest, manifest_path).workers(cli.workers),
    );

    let (sender, receiver) = EventChannel::new();
    let show_progress = matches!(cli.output, OutputFormat::Pretty);
    let event_thread = thread::spawn(move || render_progress(receiver, show_progress));

    let outcome = session.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    match (outcome?, cli.output) {
        (SyncOutcome::NothingToDo { .. }, OutputFormat::Pretty) => {
            term.write_line("No files to copy. You're done!").ok();
        }
        (SyncOutcome::Completed { summary, .. }, OutputFormat::Pretty) => {
            print_pretty_summary(&term, &summary);
        }
        (outcome, OutputFormat::Json) => print_json_summary(&outcome),
    }

    Ok(())
}

fn render_progress(receiver: EventReceiver, visible: bool) {
    let mut bar: Option<ProgressBar> = None;

    for event in receiver.iter() {
        match event {
            Event::Transfer(TransferEvent::Started {
                total_jobs,
                already_copied,
            }) if visible => {
                let pb = ProgressBar::new((total_jobs + already_copied) as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{prefix:.cyan} [{bar:40.green}] {pos}/{len} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=> "),
                );
                pb.set_prefix("Copying...");
                pb.set_position(already_copied as u64);
                pb.enable_steady_tick(Duration::from_millis(100));
                bar = Some(pb);
            }
            Event::Transfer(TransferEvent::FileCopied(progress)) => {
                if let Some(ref pb) = bar {
                    pb.inc(1);
                    let mut message = format_bytes(progress.bytes_copied);
                    if let Some(rate) = progress.bytes_per_second {
                        message.push_str(&format!(" @ {}/s", format_bytes(rate as u64)));
                    }
                    if let Some(eta_ms) = progress.eta_ms {
                        message.push_str(&format!(
                            ", ETA {}",
                            format_duration(Duration::from_millis(eta_ms))
                        ));
                    }
                    pb.set_message(message);
                }
            }
            Event::Transfer(TransferEvent::Completed { .. }) => {
                if let Some(pb) = bar.take() {
                    pb.finish_and_clear();
                }
            }
            _ => {}
        }
    }
}

fn print_pretty_summary(term: &Term, summary: &TransferSummary) {
    term.write_line("").ok();
    term.write_line(&format!(
        "{} Done: {} files, {} copied in {} ({:.2} MB/s)",
        style("✅").green(),
        style(summary.files_copied).cyan(),
        style(format_bytes(summary.bytes_copied)).cyan(),
        format_duration(Duration::from_millis(summary.duration_ms)),
        summary.megabytes_per_second()
    ))
    .ok();

    if summary.skipped > 0 {
        term.write_line(&format!(
            "  {} files could not be copied and will be retried on the next run",
            style(summary.skipped).yellow()
        ))
        .ok();
    }
}

fn print_json_summary(outcome: &SyncOutcome) {
    let output = match outcome {
        SyncOutcome::NothingToDo { already_copied } => serde_json::json!({
            "status": "nothing_to_do",
            "already_copied": already_copied,
        }),
        SyncOutcome::Completed {
            already_copied,
            summary,
        } => serde_json::json!({
            "status": "completed",
            "already_copied": already_copied,
            "files_copied": summary.files_copied,
            "bytes_copied": summary.bytes_copied,
            "skipped": summary.skipped,
            "excluded": summary.excluded,
            "duration_ms": summary.duration_ms,
            "megabytes_per_second": summary.megabytes_per_second(),
        }),
    };

    println!("{}", output);
}

/// Size in 1024-based units with one decimal, e.g. `1.5 MB`
fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    const PREFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if bytes < UNIT {
        return format!("{} B", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!("{:.1} {}B", bytes as f64 / div as f64, PREFIXES[exp])
}

/// Coarse duration: `2h5m`, `3m12s` or `42s`
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs / 60) % 60, secs % 60);

    if hours >= 1 {
        format!("{}h{}m", hours, minutes)
    } else if secs >= 60 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
