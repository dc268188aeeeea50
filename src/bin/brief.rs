use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use brolly::briefing::{brief, Liquidity};
use brolly::config::Config;
use brolly::market::{Market, MIN_OUTCOMES};
use brolly::movement::line_move;
use brolly::parse::{normalise_odds, parse_numbers, MarketKind};
use brolly::print::{tabulate_briefing, tabulate_line_move, tabulate_market, tabulate_summary};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// current prices, as free text (e.g. "1.85 / 2.05")
    #[clap(short = 'c', long)]
    current: String,

    /// opening prices, as free text
    #[clap(short = 'o', long)]
    open: Option<String>,

    /// market kind
    #[clap(short = 'k', long, default_value = "2way")]
    kind: MarketKind,

    /// market liquidity
    #[clap(short = 'l', long, default_value = "mid")]
    liquidity: Liquidity,

    /// config file
    #[clap(long)]
    config: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.current.trim().is_empty() {
            bail!("current prices must be specified");
        }
        Ok(())
    }
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
    args.validate()?;
    debug!("args: {args:?}");
    let config = Config::load_or_default(args.config.as_ref())?;

    let current = normalise_odds(&parse_numbers(&args.current), args.kind);
    let open = args
        .open
        .as_ref()
        .map(|open| normalise_odds(&parse_numbers(open), args.kind));
    debug!("current: {current:?}, open: {open:?}");

    if current.len() >= MIN_OUTCOMES {
        if current.len() != args.kind.outcomes() {
            warn!(
                "expected {} prices for a {} market, found {}",
                args.kind.outcomes(),
                args.kind,
                current.len()
            );
        }
        let market = Market::fit(current.clone())?;
        info!(
            "{} market, margin {:.2}%:\n{}",
            args.kind,
            market.overround.margin_percent(),
            Console::default().render(&tabulate_market(&market))
        );
    } else {
        let kinds: Vec<_> = MarketKind::iter().map(|kind| kind.to_string()).collect();
        warn!("too few prices to measure the margin; supported kinds: {}", kinds.join(", "));
    }

    if let Some(open) = &open {
        if open.len() == current.len() && current.len() >= MIN_OUTCOMES {
            let line_move = line_move(open, &current, &config.movement)?;
            let table = tabulate_line_move(open, &current, &line_move);
            info!("\n{}", Console::default().render(&table));
            let table = tabulate_summary(&[
                ("Max move", format!("{:.2}pp", line_move.max_delta)),
                ("Intensity", line_move.intensity(&config.movement).to_string()),
            ]);
            info!("\n{}", Console::default().render(&table));
        } else {
            warn!("opening prices do not align with current prices; move not measured");
        }
    }

    let briefing = brief(
        open.as_deref(),
        &current,
        args.liquidity,
        &config.movement,
        &config.briefing,
    )?;
    info!("risk briefing:\n{}", Console::default().render(&tabulate_briefing(&briefing)));
    Ok(())
}
