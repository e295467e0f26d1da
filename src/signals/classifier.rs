use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

/// Bars whose body is smaller than this share of the range are indecision
const MIN_BODY_RATIO: Decimal = dec!(0.2);
const NEUTRAL_CONFIDENCE: Decimal = dec!(0.5);
const BASE_CONFIDENCE: Decimal = dec!(0.6);
const MAX_CONFIDENCE: Decimal = dec!(0.9);
const CONFIDENCE_CAP_RATIO: Decimal = dec!(0.6);

/// Directional call for the next trading day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Bullish,
    Bearish,
    Sideways,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Bullish => "Bullish",
            Signal::Bearish => "Bearish",
            Signal::Sideways => "Sideways",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a single OHLC bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub signal: Signal,

    /// Heuristic score in [0.5, 0.9], not a probability
    pub confidence: Decimal,

    pub reason: &'static str,
}

impl Classification {
    fn sideways(reason: &'static str) -> Self {
        Self {
            signal: Signal::Sideways,
            confidence: NEUTRAL_CONFIDENCE,
            reason,
        }
    }

    /// Confidence as a whole percentage, truncated
    pub fn confidence_pct(&self) -> u32 {
        (self.confidence * dec!(100)).trunc().to_u32().unwrap_or(0)
    }
}

/// Classify one candle from its open, high, low and close.
///
/// Algorithm:
/// 1. range = |high - low|; a flat bar is Sideways
/// 2. body ratio = |close - open| / range
/// 3. ratio < 0.2 is mostly wick, Sideways
/// 4. otherwise the body direction decides, with confidence
///    min(0.9, 0.6 + ratio / 2)
pub fn classify(open: Decimal, high: Decimal, low: Decimal, close: Decimal) -> Classification {
    // Spreads wider than Decimal can hold are treated as a degenerate bar
    let range = match high.max(low).checked_sub(high.min(low)) {
        Some(range) if range > Decimal::ZERO => range,
        _ => return Classification::sideways("No range"),
    };
    let Some(body) = close.checked_sub(open).map(|d| d.abs()) else {
        return Classification::sideways("No range");
    };
    let ratio = body.checked_div(range).unwrap_or(Decimal::MAX);

    if ratio < MIN_BODY_RATIO {
        return Classification::sideways("Small body vs range — indecision");
    }

    // Ratios past CONFIDENCE_CAP_RATIO all land on MAX_CONFIDENCE
    let confidence =
        (BASE_CONFIDENCE + ratio.min(CONFIDENCE_CAP_RATIO) / dec!(2)).min(MAX_CONFIDENCE);

    if close > open {
        Classification {
            signal: Signal::Bullish,
            confidence,
            reason: "Close above open",
        }
    } else if close < open {
        Classification {
            signal: Signal::Bearish,
            confidence,
            reason: "Close below open",
        }
    } else {
        Classification::sideways("Flat")
    }
}
