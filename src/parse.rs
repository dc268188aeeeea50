//! Extraction of prices from free-form text, such as a line copied off a bookmaker's screen.

use std::sync::LazyLock;

use regex::Regex;
use strum_macros::{Display, EnumIter, EnumString};

/// Largest absolute value still read as a handicap or total line rather than a price.
const MAX_LINE: f64 = 15.0;

/// ASCII digits only; `\d` would also admit other Unicode digit classes.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9]+(?:\.[0-9]+)?").expect("invalid number pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MarketKind {
    #[strum(to_string = "1x2", serialize = "one_x_two")]
    OneXTwo,
    #[strum(to_string = "2way", serialize = "two_way")]
    TwoWay,
    #[strum(to_string = "ou", serialize = "over_under")]
    OverUnder,
    Handicap,
}
impl MarketKind {
    pub fn outcomes(&self) -> usize {
        match self {
            MarketKind::OneXTwo => 3,
            _ => 2,
        }
    }
}

/// Every number in `text` of the form `-?\d+(\.\d+)?` that is finite and positive.
pub fn parse_numbers(text: &str) -> Vec<f64> {
    NUMBER
        .find_iter(text)
        .filter_map(|number| number.as_str().parse::<f64>().ok())
        .filter(|number| number.is_finite() && *number > 0.0)
        .collect()
}

/// Selects the prices for a market of the given `kind` from `numbers`:
///
/// * three numbers where the first looks like a line and the others like prices are read as
///   line + two prices;
/// * a three-way market takes the first three numbers;
/// * a two-way market takes the last two;
/// * anything else takes the first two.
pub fn normalise_odds(numbers: &[f64], kind: MarketKind) -> Vec<f64> {
    if numbers.len() == 3 && numbers[0].abs() <= MAX_LINE && numbers[1] > 1.0 && numbers[2] > 1.0 {
        return numbers[1..].to_vec();
    }
    match kind {
        MarketKind::OneXTwo if numbers.len() >= 3 => numbers[..3].to_vec(),
        MarketKind::TwoWay | MarketKind::OverUnder | MarketKind::Handicap if numbers.len() >= 2 => {
            numbers[numbers.len() - 2..].to_vec()
        }
        _ if numbers.len() >= 2 => numbers[..2].to_vec(),
        _ => numbers.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn parse_numbers_extracts_decimals() {
        assert_eq!(vec![1.85, 2.05], parse_numbers("1.85 / 2.05"));
        assert_eq!(vec![2.5, 1.9, 1.95], parse_numbers("O/U 2.5: over 1.90, under 1.95"));
        assert_eq!(vec![3.0, 7.0], parse_numbers("3.x7"));
        assert!(parse_numbers("").is_empty());
        assert!(parse_numbers("no prices here").is_empty());
    }

    #[test]
    fn parse_numbers_drops_non_positive() {
        assert_eq!(vec![1.95], parse_numbers("-1.5 1.95 0"));
        assert!(parse_numbers("--2").is_empty());
        assert_eq!(vec![1.5], parse_numbers("홈 1.5배"));
        assert_eq!(vec![2.0], parse_numbers("１２ 2"));
        assert_eq!(vec![1.9, 2.0], parse_numbers("1.9.2.0"));
    }

    #[test]
    fn normalise_line_and_prices() {
        assert_eq!(vec![1.9, 1.95], normalise_odds(&[2.5, 1.9, 1.95], MarketKind::OverUnder));
        assert_eq!(vec![1.9, 1.95], normalise_odds(&[2.5, 1.9, 1.95], MarketKind::OneXTwo));
    }

    #[test]
    fn normalise_by_kind() {
        let numbers = [2.45, 3.3, 2.9, 1.9];
        assert_eq!(vec![2.45, 3.3, 2.9], normalise_odds(&numbers, MarketKind::OneXTwo));
        assert_eq!(vec![2.9, 1.9], normalise_odds(&numbers, MarketKind::TwoWay));
        assert_eq!(vec![2.9, 1.9], normalise_odds(&numbers, MarketKind::Handicap));
        assert_eq!(vec![2.45, 3.3], normalise_odds(&[2.45, 3.3], MarketKind::OneXTwo));
        assert_eq!(vec![2.45], normalise_odds(&[2.45], MarketKind::TwoWay));
    }

    #[test]
    fn market_kind_from_str() {
        assert_eq!(MarketKind::OneXTwo, MarketKind::from_str("1x2").unwrap());
        assert_eq!(MarketKind::TwoWay, MarketKind::from_str("2way").unwrap());
        assert_eq!(MarketKind::OverUnder, MarketKind::from_str("ou").unwrap());
        assert_eq!(MarketKind::Handicap, MarketKind::from_str("handicap").unwrap());
        assert!(MarketKind::from_str("parlay").is_err());
        assert_eq!(3, MarketKind::OneXTwo.outcomes());
    }
}
