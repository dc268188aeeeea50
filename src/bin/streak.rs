use std::env;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use brolly::config::Config;
use brolly::print::tabulate_summary;
use brolly::streak::{run_probability, Commonness};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// number of trials
    #[clap(short = 'n', long)]
    trials: u64,

    /// per-trial probability of the streaking outcome
    #[clap(short = 'p', long)]
    prob: f64,

    /// streak length
    #[clap(short = 'k', long)]
    run: usize,

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

    let prob = run_probability(args.trials, args.prob, args.run)?;
    let table = tabulate_summary(&[
        ("Trials", format!("{}", args.trials)),
        ("Streak length", format!("{}", args.run)),
        ("P(streak)", format!("{:.4}%", prob * 100.0)),
        ("Commonness", Commonness::classify(prob, &config.streak).to_string()),
    ]);
    info!("\n{}", Console::default().render(&table));
    Ok(())
}
