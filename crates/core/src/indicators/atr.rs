use crate::indicators::ema::ema;
use crate::models::ohlc::Ohlc;

/// Average true range, smoothed with the seeded EMA.
///
/// The true range of the first bar is its high/low span; later bars
/// widen it by any gap from the previous close.
pub fn atr(bars: &[Ohlc], period: usize) -> Vec<f64> {
    if bars.is_empty() {
        return Vec::new();
    }

    let mut true_ranges = Vec::with_capacity(bars.len());
    true_ranges.push(bars[0].high - bars[0].low);
    for i in 1..bars.len() {
        let prev_close = bars[i - 1].close;
        let tr = (bars[i].high - bars[i].low)
            .max((bars[i].high - prev_close).abs())
            .max((bars[i].low - prev_close).abs());
        true_ranges.push(tr);
    }

    ema(&true_ranges, period)
}
