//! Console tables for the command-line tools.

use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Cell, Col, Row, Table};

use crate::briefing::Briefing;
use crate::kelly::BetSizing;
use crate::ledger::LedgerSummary;
use crate::market::Market;
use crate::movement::LineMove;
use crate::parlay::Overlap;
use crate::ruin::RuinSummary;

fn format_option(value: Option<f64>, format: impl FnOnce(f64) -> String) -> Cell {
    value.map(format).unwrap_or_else(|| "-".into()).into()
}

/// A two-column table of labelled values.
pub fn tabulate_summary(rows: &[(&str, String)]) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(16)).with(Left)),
        Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
    ]);
    for (label, value) in rows {
        table.push_row(Row::new(Styles::default(), vec![(*label).into(), value.clone().into()]));
    }
    table
}

pub fn tabulate_market(market: &Market) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Outcome".into(),
                "Price".into(),
                "Implied".into(),
                "Fair".into(),
                "Fair price".into(),
            ],
        ));
    for (index, (price, fair_price)) in market.prices.iter().zip(market.fair_prices()).enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                format!("{price:.2}").into(),
                format!("{:.2}%", 100.0 / price).into(),
                format!("{:.2}%", market.probs[index] * 100.0).into(),
                format!("{fair_price:.3}").into(),
            ],
        ));
    }
    table
}

pub fn tabulate_line_move(open: &[f64], close: &[f64], line_move: &LineMove) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(Separator(true)).with(MinWidth(10)).with(Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Outcome".into(),
                "Open".into(),
                "Close".into(),
                "Δ (pp)".into(),
                "Direction".into(),
            ],
        ));
    for (index, direction) in line_move.directions.iter().enumerate() {
        let marker = if index == line_move.favourite { "*" } else { "" };
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}{marker}", index + 1).into(),
                format!("{:.2}", open[index]).into(),
                format!("{:.2}", close[index]).into(),
                format!("{:.2}", line_move.deltas[index]).into(),
                direction.to_string().into(),
            ],
        ));
    }
    table
}

pub fn tabulate_sizing(sizing: &BetSizing) -> Table {
    tabulate_summary(&[
        ("Verdict", sizing.verdict.to_string()),
        ("Kelly fraction", format!("{:.5}", sizing.kelly_fraction)),
        ("Clamped fraction", format!("{:.5}", sizing.clamped_fraction)),
        ("Streak guard", format!("×{:.2}", sizing.streak_multiplier)),
        ("Adjusted fraction", format!("{:.5}", sizing.adjusted_fraction)),
        ("Raw stake", format!("{:.2}", sizing.raw_stake)),
        ("Cap", format!("{:.2}", sizing.cap_amount)),
        ("Stake", format!("{:.0}", sizing.stake)),
    ])
}

pub fn tabulate_ruin(summary: &RuinSummary) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(14)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["".into(), "P05".into(), "P50".into(), "P95".into()],
        ));
    for (label, percentiles) in [
        ("Final bankroll", &summary.final_bankroll),
        ("Max drawdown", &summary.max_drawdown),
    ] {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                label.into(),
                format!("{:.2}", percentiles.p05).into(),
                format!("{:.2}", percentiles.p50).into(),
                format!("{:.2}", percentiles.p95).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_overlaps(overlaps: &[Overlap]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Key".into(), "Legs".into()],
        ));
    for overlap in overlaps {
        table.push_row(Row::new(
            Styles::default(),
            vec![overlap.key.clone().into(), format!("{}", overlap.count).into()],
        ));
    }
    table
}

pub fn tabulate_briefing(briefing: &Briefing) -> Table {
    let flags: Vec<_> = briefing.flags.iter().map(ToString::to_string).collect();
    let mut table = tabulate_summary(&[
        ("Score", format!("{}", briefing.score)),
        ("Level", briefing.level.to_string()),
    ]);
    table.push_row(Row::new(
        Styles::default(),
        vec!["Margin".into(), format_option(briefing.margin, |margin| format!("{margin:.2}%"))],
    ));
    table.push_row(Row::new(
        Styles::default(),
        vec![
            "Max move".into(),
            format_option(briefing.max_move, |max_move| format!("{max_move:.2}pp")),
        ],
    ));
    table.push_row(Row::new(Styles::default(), vec!["Flags".into(), flags.join(", ").into()]));
    table
}

pub fn tabulate_ledger(summaries: &[(&str, LedgerSummary)]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(8)).with(Left)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(9)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(9)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(9)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Window".into(),
                "Bets".into(),
                "Staked".into(),
                "Profit".into(),
                "ROI".into(),
                "Win rate".into(),
                "Avg odds".into(),
            ],
        ));
    for (label, summary) in summaries {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                (*label).into(),
                format!("{}", summary.count).into(),
                format!("{:.2}", summary.staked).into(),
                format!("{:.2}", summary.profit).into(),
                format_option(summary.roi, |roi| format!("{:.2}%", roi * 100.0)),
                format_option(summary.win_rate, |win_rate| format!("{:.1}%", win_rate * 100.0)),
                format_option(summary.avg_odds, |avg_odds| format!("{avg_odds:.2}")),
            ],
        ));
    }
    table
}
