use std::io::{stdout, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::*;
use serde::Serialize;

use raid_summary_processor::constants::SUMMARY_ENCOUNTER_ID;
use raid_summary_processor::logger::init_logger;
use raid_summary_processor::{parse_report, ParserOptions};

#[derive(Debug, Parser)]
#[command(name = "raid-summary")]
#[command(about = "Aggregates a combat-log report into per-encounter character statistics")]
struct Args {
    /// Report identifier, e.g. the code in the report URL
    report_id: String,

    /// Encounter to print: a fight id, -1 for the whole report, 0 for trash
    #[arg(long, default_value_t = SUMMARY_ENCOUNTER_ID, allow_negative_numbers = true)]
    encounter: i64,

    /// Print every view instead of a single encounter
    #[arg(long)]
    all: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }

    writeln!(out)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = init_logger(&args.log_level)?;

    let options = ParserOptions::from_env()?;
    let report = parse_report(&options, &args.report_id)
        .await
        .with_context(|| format!("failed to parse report {}", args.report_id))?;

    let mut out = BufWriter::new(stdout().lock());

    if args.all {
        let views: Vec<_> = report.views().collect();
        write_json(&mut out, &views, args.pretty)?;
    } else {
        let view = report.view(args.encounter);

        if view.is_empty() {
            warn!("no characters took part in encounter {}", args.encounter);
        }

        write_json(&mut out, &view, args.pretty)?;
    }

    out.flush()?;
    Ok(())
}
