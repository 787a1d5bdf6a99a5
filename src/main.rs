//! # weekpack CLI
//!
//! Command-line interface for the weekpack library. Progress goes to stderr;
//! the summaries go to stdout or to `--output`.

use std::io::Write;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use weekpack::WeekpackError;
use weekpack::cli::Args;
use weekpack::core::aggregate::WeeklyAggregator;
use weekpack::core::filter::apply_date_filter;
use weekpack::core::processor::{
    ProcessingStats, date_span, merge_transcripts, read_transcript_with_count,
};
use weekpack::format::{to_format_string, write_to_format};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.log_filter());

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn run(args: &Args) -> Result<(), WeekpackError> {
    let total_start = Instant::now();
    let settings = args.settings()?;
    let date_filter = args.date_filter()?;
    let format = args.output_format();
    let target = settings.window.target_user.as_str();

    eprintln!("📦 weekpack v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for input in &args.inputs {
        eprintln!("📂 Input:   {}", input.display());
    }
    eprintln!("👤 User:    {}", target);
    eprintln!("🪟 Context: {}", settings.window.context_size);
    eprintln!("📄 Format:  {}", format);
    if let Some(after) = &args.after {
        eprintln!("📅 After:   {}", after);
    }
    if let Some(before) = &args.before {
        eprintln!("📅 Before:  {}", before);
    }
    eprintln!();

    // Step 1: Parse and clean each transcript on its own
    let mut stats = ProcessingStats::default();
    let mut transcripts = Vec::with_capacity(args.inputs.len());

    for input in &args.inputs {
        eprintln!("⏳ Parsing {}...", input.display());
        let (messages, parsed) = read_transcript_with_count(input, &settings.transcript)?;
        stats.parsed += parsed;
        stats.after_system_filter += messages.len();

        let messages = apply_date_filter(messages, &date_filter);
        stats.after_date_filter += messages.len();
        transcripts.push(messages);
    }

    eprintln!("   Parsed {} messages", stats.parsed);
    if settings.transcript.skip_system_messages {
        eprintln!(
            "   {} after removing system notices",
            stats.after_system_filter
        );
    }
    if date_filter.is_active() {
        eprintln!("   {} in the date range", stats.after_date_filter);
    }

    // Step 2: Merge into one timeline
    let messages = merge_transcripts(transcripts);
    match date_span(messages.as_slice()) {
        Some((first, last)) => eprintln!("🗓️  Range:   {} to {}", first, last),
        None => eprintln!("⚠️  No messages found"),
    }

    // Step 3: Weeks and windows
    let summaries = WeeklyAggregator::new(settings.window.clone()).aggregate(&messages);
    stats.weeks = summaries.len();

    eprintln!();
    eprintln!("📊 {} weeks:", stats.weeks);
    for summary in summaries.values() {
        eprintln!(
            "   {}: {} messages from {}, {} total messages",
            summary.week_key, summary.target_message_count, target, summary.total_message_count
        );
    }

    // Step 4: Output
    match &args.output {
        Some(path) => {
            write_to_format(&summaries, path, format)?;
            eprintln!();
            eprintln!("✅ Done! Output saved to {}", path.display());
        }
        None => {
            let text = to_format_string(&summaries, format)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.is_empty() && !text.ends_with('\n') {
                writeln!(stdout)?;
            }
            stdout.flush()?;
        }
    }

    tracing::info!(
        parsed = stats.parsed,
        weeks = stats.weeks,
        elapsed_ms = u64::try_from(total_start.elapsed().as_millis()).unwrap_or(u64::MAX),
        "finished"
    );
    Ok(())
}
