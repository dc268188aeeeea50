use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::{env, fs, io};

use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use brolly::config::Config;
use brolly::parlay::parlay_overlap;
use brolly::print::{tabulate_overlaps, tabulate_summary};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to read the legs from, one per line; reads stdin if omitted
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// most legs permitted on a shared key before the correlation is deemed high
    #[clap(short = 'd', long, default_value = "1")]
    dup_limit: usize,

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

    let text = match &args.file {
        Some(file) => fs::read_to_string(file)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let check = parlay_overlap(&text, args.dup_limit, &config.parlay)?;
    let table = tabulate_summary(&[
        ("Legs", format!("{}", check.legs)),
        ("Correlation", check.correlation.to_string()),
    ]);
    info!("\n{}", Console::default().render(&table));
    if !check.overlaps.is_empty() {
        let table = tabulate_overlaps(&check.overlaps);
        info!("overlapping legs:\n{}", Console::default().render(&table));
    }
    if check.many_legs {
        warn!("{} legs: combined hit rate falls quickly with each added leg", check.legs);
    }
    Ok(())
}
