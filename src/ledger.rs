//! Key performance indicators over a log of settled bets.

use std::ops::Range;

use anyhow::bail;
use chrono::{Datelike, Days, Months, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    #[strum(serialize = "W")]
    Win,

    #[serde(rename = "L")]
    #[strum(serialize = "L")]
    Loss,

    #[serde(rename = "V")]
    #[strum(serialize = "V")]
    Void,
}

/// A single logged bet, in the shape exported by the logbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Time of placement, in milliseconds since the Unix epoch.
    pub ts: i64,
    pub stake: f64,
    pub odds: f64,
    pub res: Outcome,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub market: String,
}
impl LedgerEntry {
    pub fn profit(&self) -> f64 {
        match self.res {
            Outcome::Win => self.stake * (self.odds - 1.0),
            Outcome::Loss => -self.stake,
            Outcome::Void => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// ROI magnitude beyond which performance is banded as positive or negative.
    pub roi_band: f64,
}
impl LedgerConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.roi_band.is_nan() || self.roi_band < 0.0 {
            bail!("ROI band must be non-negative")
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self { roi_band: 0.02 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RoiBand {
    Positive,
    Flat,
    Negative,
}
impl RoiBand {
    pub fn classify(roi: f64, config: &LedgerConfig) -> Self {
        if roi >= config.roi_band {
            Self::Positive
        } else if roi <= -config.roi_band {
            Self::Negative
        } else {
            Self::Flat
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSummary {
    pub count: usize,
    pub staked: f64,
    pub profit: f64,

    /// Profit over staked; `None` when nothing was staked.
    pub roi: Option<f64>,
    pub wins: usize,
    pub losses: usize,
    pub voids: usize,

    /// Wins over settled (non-void) bets; `None` when there were none.
    pub win_rate: Option<f64>,

    /// Mean price over entries quoted above evens.
    pub avg_odds: Option<f64>,
}

/// Summarises the `entries` placed within the half-open `window` of timestamps, or all of them.
pub fn summarise(entries: &[LedgerEntry], window: Option<Range<i64>>) -> LedgerSummary {
    let mut summary = LedgerSummary::default();
    let mut odds_sum = 0.0;
    let mut odds_count = 0;
    for entry in entries
        .iter()
        .filter(|entry| window.as_ref().map_or(true, |window| window.contains(&entry.ts)))
    {
        summary.count += 1;
        summary.staked += entry.stake;
        summary.profit += entry.profit();
        match entry.res {
            Outcome::Win => summary.wins += 1,
            Outcome::Loss => summary.losses += 1,
            Outcome::Void => summary.voids += 1,
        }
        if entry.odds > 1.0 {
            odds_sum += entry.odds;
            odds_count += 1;
        }
    }

    if summary.staked > 0.0 {
        summary.roi = Some(summary.profit / summary.staked);
    }
    let settled = summary.wins + summary.losses;
    if settled > 0 {
        summary.win_rate = Some(summary.wins as f64 / settled as f64);
    }
    if odds_count > 0 {
        summary.avg_odds = Some(odds_sum / odds_count as f64);
    }
    summary
}

/// Largest fall of cumulative profit from its running peak, taking entries in timestamp order.
/// The peak starts at zero, so a log that only ever loses has a drawdown equal to its total loss.
pub fn max_drawdown(entries: &[LedgerEntry]) -> f64 {
    let mut ordered: Vec<_> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.ts);

    let mut cumulative = 0.0;
    let mut peak = 0.0;
    let mut max_drawdown = 0.0;
    for entry in ordered {
        cumulative += entry.profit();
        peak = f64::max(peak, cumulative);
        max_drawdown = f64::max(max_drawdown, peak - cumulative);
    }
    max_drawdown
}

/// The calendar week, Monday to Sunday, containing `date`, as a window of timestamps at midnight
/// in `tz`.
pub fn week_window<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<Range<i64>> {
    let start = date.checked_sub_days(Days::new(date.weekday().num_days_from_monday() as u64))?;
    let end = start.checked_add_days(Days::new(7))?;
    Some(midnight(start, tz)?..midnight(end, tz)?)
}

/// The calendar month containing `date`, as a window of timestamps at midnight in `tz`.
pub fn month_window<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<Range<i64>> {
    let start = date.with_day(1)?;
    let end = start.checked_add_months(Months::new(1))?;
    Some(midnight(start, tz)?..midnight(end, tz)?)
}

fn midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<i64> {
    let local = date.and_hms_opt(0, 0, 0)?;
    tz.from_local_datetime(&local)
        .earliest()
        .map(|datetime| datetime.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_float_eq::*;
    use chrono::Utc;

    use super::*;

    fn entry(ts: i64, stake: f64, odds: f64, res: Outcome) -> LedgerEntry {
        LedgerEntry {
            ts,
            stake,
            odds,
            res,
            date: String::new(),
            sport: "soccer".into(),
            market: "1x2".into(),
        }
    }

    fn sample() -> Vec<LedgerEntry> {
        vec![
            entry(3_000, 10.0, 2.5, Outcome::Win),
            entry(1_000, 20.0, 1.8, Outcome::Loss),
            entry(2_000, 10.0, 3.0, Outcome::Loss),
            entry(4_000, 15.0, 1.9, Outcome::Void),
        ]
    }

    #[test]
    fn profit_by_outcome() {
        assert_float_absolute_eq!(15.0, entry(0, 10.0, 2.5, Outcome::Win).profit(), 1e-12);
        assert_eq!(-10.0, entry(0, 10.0, 2.5, Outcome::Loss).profit());
        assert_eq!(0.0, entry(0, 10.0, 2.5, Outcome::Void).profit());
    }

    #[test]
    fn summarise_all() {
        let summary = summarise(&sample(), None);
        assert_eq!(4, summary.count);
        assert_float_absolute_eq!(55.0, summary.staked, 1e-12);
        assert_float_absolute_eq!(-15.0, summary.profit, 1e-12);
        assert_float_absolute_eq!(-15.0 / 55.0, summary.roi.unwrap(), 1e-12);
        assert_eq!((1, 2, 1), (summary.wins, summary.losses, summary.voids));
        assert_float_absolute_eq!(1.0 / 3.0, summary.win_rate.unwrap(), 1e-12);
        assert_float_absolute_eq!(2.3, summary.avg_odds.unwrap(), 1e-12);
        let band = RoiBand::classify(summary.roi.unwrap(), &LedgerConfig::default());
        assert_eq!(RoiBand::Negative, band);
    }

    #[test]
    fn summarise_window() {
        let summary = summarise(&sample(), Some(2_000..4_000));
        assert_eq!(2, summary.count);
        assert_float_absolute_eq!(5.0, summary.profit, 1e-12);
        assert_float_absolute_eq!(0.25, summary.roi.unwrap(), 1e-12);

        let summary = summarise(&sample(), Some(10_000..20_000));
        assert_eq!(LedgerSummary::default(), summary);
    }

    #[test]
    fn summarise_voids_only() {
        let summary = summarise(&[entry(0, 0.0, 1.0, Outcome::Void)], None);
        assert_eq!(None, summary.roi);
        assert_eq!(None, summary.win_rate);
        assert_eq!(None, summary.avg_odds);
    }

    #[test]
    fn drawdown_in_timestamp_order() {
        // -20, -30, -15, -15
        assert_float_absolute_eq!(30.0, max_drawdown(&sample()), 1e-12);

        let entries = vec![
            entry(1, 10.0, 3.0, Outcome::Win),
            entry(2, 5.0, 2.0, Outcome::Loss),
            entry(3, 10.0, 2.0, Outcome::Loss),
            entry(4, 10.0, 3.0, Outcome::Win),
        ];
        assert_float_absolute_eq!(15.0, max_drawdown(&entries), 1e-12);
        assert_eq!(0.0, max_drawdown(&[]));
    }

    #[test]
    fn calendar_windows() {
        let wednesday = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        assert_eq!(Some(1_707_696_000_000..1_708_300_800_000), week_window(wednesday, &Utc));
        assert_eq!(Some(1_706_745_600_000..1_709_251_200_000), month_window(wednesday, &Utc));

        let monday = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
        assert_eq!(week_window(wednesday, &Utc), week_window(monday, &Utc));

        let december = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(Some(1_733_011_200_000..1_735_689_600_000), month_window(december, &Utc));
    }

    #[test]
    fn roi_bands() {
        let config = LedgerConfig::default();
        assert_eq!(RoiBand::Positive, RoiBand::classify(0.02, &config));
        assert_eq!(RoiBand::Flat, RoiBand::classify(0.0199, &config));
        assert_eq!(RoiBand::Flat, RoiBand::classify(-0.0199, &config));
        assert_eq!(RoiBand::Negative, RoiBand::classify(-0.02, &config));
    }

    #[test]
    fn deserialise_logbook_export() {
        let json = r#"[
            {"ts": 1700000000000, "stake": 10, "odds": 1.95, "res": "W",
             "date": "2023-11-14", "sport": "soccer", "market": "1x2"},
            {"ts": 1700000100000, "stake": 5, "odds": 2.1, "res": "V"}
        ]"#;
        let entries: Vec<LedgerEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(2, entries.len());
        assert_eq!(Outcome::Win, entries[0].res);
        assert_eq!("soccer", entries[0].sport);
        assert_eq!("", entries[1].market);
        assert_eq!(Outcome::Loss, Outcome::from_str("L").unwrap());
    }
}
