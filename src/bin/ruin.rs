use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, StdRand};
use tracing::{debug, info, warn};

use brolly::config::Config;
use brolly::print::{tabulate_ruin, tabulate_summary};
use brolly::ruin::{simulate, RuinParams};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// starting bankroll
    #[clap(short = 'b', long)]
    bankroll: f64,

    /// flat stake per trial
    #[clap(long)]
    bet: f64,

    /// number of trials per path
    #[clap(short = 'n', long)]
    trials: u64,

    /// number of simulated paths
    #[clap(short = 's', long, default_value = "2000")]
    sims: u64,

    /// house edge, in percent
    #[clap(short = 'e', long, default_value = "2.7")]
    edge: f64,

    /// profit multiple of the stake on a win
    #[clap(short = 'p', long, default_value = "1.0")]
    payout: f64,

    /// seed for the random source; defaults to the current time
    #[clap(long)]
    seed: Option<u64>,

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

    let seed = args
        .seed
        .unwrap_or_else(|| Utc::now().timestamp_micros() as u64);
    debug!("seed: {seed}");
    let params = RuinParams {
        bankroll: args.bankroll,
        bet: args.bet,
        trials: args.trials,
        sims: args.sims,
        house_edge_percent: args.edge,
        payout: args.payout,
    };

    let start_time = Instant::now();
    let summary = simulate(&params, &config.ruin, &mut StdRand::seed(seed))?;
    let elapsed = start_time.elapsed();
    debug!(
        "simulated {} paths in {:.3}s",
        summary.params.sims,
        elapsed.as_millis() as f64 / 1_000.
    );
    if summary.params != params {
        warn!("parameters clamped to {:?}", summary.params);
    }

    let table = tabulate_summary(&[
        ("Win probability", format!("{:.4}", summary.win_prob)),
        ("Ruin probability", format!("{:.2}%", summary.ruin_prob * 100.0)),
        ("Paths", format!("{}", summary.params.sims)),
    ]);
    info!("\n{}", Console::default().render(&table));
    info!("\n{}", Console::default().render(&tabulate_ruin(&summary)));
    if summary.is_severe(&config.ruin) {
        warn!("severe ruin risk: reduce the stake or the number of trials");
    }
    Ok(())
}
