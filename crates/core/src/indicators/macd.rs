use crate::indicators::ema::ema;

/// MACD output, all three series aligned 1:1 with the input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Moving average convergence/divergence.
///
/// The line is `ema(fast) - ema(slow)`, the signal an EMA of the line,
/// the histogram their difference. The seeded EMA is defined at every
/// index, so no realignment is needed anywhere.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema(&line, signal);
    let histogram = line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    MacdSeries {
        macd: line,
        signal: signal_line,
        histogram,
    }
}
