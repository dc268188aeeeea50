use std::env;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use brolly::clv::closing_line_value;
use brolly::config::Config;
use brolly::print::tabulate_summary;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// decimal odds obtained when the bet was placed
    #[clap(short = 'b', long)]
    bet: f64,

    /// decimal closing odds
    #[clap(short = 'c', long)]
    close: f64,

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

    let clv = closing_line_value(args.bet, args.close, &config.clv)?;
    let table = tabulate_summary(&[
        ("Bet odds", format!("{:.2}", args.bet)),
        ("Closing odds", format!("{:.2}", args.close)),
        ("Price CLV", format!("{:+.2}%", clv.price_clv)),
        ("Probability CLV", format!("{:+.2}pp", clv.prob_clv)),
        ("Band", clv.band.to_string()),
    ]);
    info!("\n{}", Console::default().render(&table));
    Ok(())
}
