use crate::indicators::sma::sma;
use crate::models::ohlc::Ohlc;

/// Stochastic oscillator output, aligned 1:1 with the input bars.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StochasticSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

/// Stochastic oscillator.
///
/// %K places the close inside the highest-high/lowest-low range of the
/// trailing `k_period` bars (50 when the range is flat). %D is an SMA
/// over the defined %K values, re-aligned to the source indices.
pub fn stochastic(bars: &[Ohlc], k_period: usize, d_period: usize) -> StochasticSeries {
    let mut k = vec![None; bars.len()];
    if k_period == 0 || bars.len() < k_period {
        return StochasticSeries {
            k,
            d: vec![None; bars.len()],
        };
    }

    for i in (k_period - 1)..bars.len() {
        let window = &bars[i + 1 - k_period..=i];
        let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

        k[i] = Some(if highest == lowest {
            50.0
        } else {
            (bars[i].close - lowest) / (highest - lowest) * 100.0
        });
    }

    // Defined %K values form a contiguous tail starting at k_period - 1,
    // so the compacted SMA maps back by a fixed offset.
    let defined: Vec<f64> = k.iter().filter_map(|v| *v).collect();
    let d_compact = sma(&defined, d_period);
    let mut d = vec![None; bars.len()];
    for (offset, value) in d_compact.into_iter().enumerate() {
        d[k_period - 1 + offset] = value;
    }

    StochasticSeries { k, d }
}
