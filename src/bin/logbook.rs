use std::env;
use std::error::Error;
use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use brolly::config::Config;
use brolly::file::ReadJsonFile;
use brolly::ledger::{max_drawdown, month_window, summarise, week_window, LedgerEntry, RoiBand};
use brolly::print::{tabulate_ledger, tabulate_summary};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// JSON file containing an array of logbook entries
    #[clap(short = 'f', long)]
    file: PathBuf,

    /// config file
    #[clap(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    debug!("args: {args:?}");
    let config = Config::load_or_default(args.config.as_ref())?;

    let entries = Vec::<LedgerEntry>::read_json_file(&args.file)?;
    debug!("read {} entries from {}", entries.len(), args.file.display());

    let today = Local::now().date_naive();
    let week = week_window(today, &Local);
    let month = month_window(today, &Local);
    debug!("today: {today}, week: {week:?}, month: {month:?}");

    let summaries = [
        ("week", summarise(&entries, week)),
        ("month", summarise(&entries, month)),
        ("all", summarise(&entries, None)),
    ];
    info!("\n{}", Console::default().render(&tabulate_ledger(&summaries)));

    let overall = &summaries[2].1;
    let band = overall
        .roi
        .map(|roi| RoiBand::classify(roi, &config.ledger).to_string())
        .unwrap_or_else(|| "-".into());
    let table = tabulate_summary(&[
        ("Max drawdown", format!("{:.2}", max_drawdown(&entries))),
        ("ROI band", band),
    ]);
    info!("\n{}", Console::default().render(&table));
    Ok(())
}
