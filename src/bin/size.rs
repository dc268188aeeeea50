use std::env;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use brolly::config::Config;
use brolly::kelly::{kelly_stake, SizingRequest, Verdict};
use brolly::print::tabulate_sizing;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// current bankroll
    #[clap(short = 'b', long)]
    bankroll: f64,

    /// decimal odds
    #[clap(short = 'o', long)]
    odds: f64,

    /// estimated win probability
    #[clap(short = 'p', long)]
    prob: f64,

    /// Kelly multiplier
    #[clap(short = 'f', long, default_value = "0.25")]
    fraction: f64,

    /// per-bet cap, as a fraction of the bankroll
    #[clap(long, default_value = "0.02")]
    cap: f64,

    /// consecutive recent losses
    #[clap(short = 'l', long, default_value = "0")]
    losses: u32,

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

    let request = SizingRequest {
        bankroll: args.bankroll,
        odds: args.odds,
        win_prob: args.prob,
        fraction: args.fraction,
        cap: args.cap,
        loss_streak: args.losses,
    };
    let sizing = kelly_stake(&request, &config.kelly)?;
    info!("\n{}", Console::default().render(&tabulate_sizing(&sizing)));
    match sizing.verdict {
        Verdict::NoEdge => info!("no edge at {:.2} with p = {:.3}; pass", args.odds, args.prob),
        Verdict::Bet if sizing.is_capped() => {
            info!("stake limited by the {:.1}% cap", args.cap * 100.0)
        }
        Verdict::Bet => {}
    }
    Ok(())
}
