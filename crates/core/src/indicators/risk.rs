//! Return-series risk metrics. Ratios are annualized assuming daily
//! returns over a 252-day trading year.

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Historical-simulation value at risk at the given confidence level
/// (e.g. 0.95). Returns the magnitude of the loss at the cut-off
/// percentile, 0.0 for an empty series.
pub fn historical_var(returns: &[f64], confidence: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let mut sorted = returns.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let idx = (((1.0 - confidence) * sorted.len() as f64).floor() as usize).min(sorted.len() - 1);
    sorted[idx].abs()
}

/// Annualized Sharpe ratio: mean excess return over the population
/// standard deviation of returns, scaled by sqrt(252).
pub fn sharpe_ratio(returns: &[f64], risk_free: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let excess = mean(returns) - risk_free;
    annualized_ratio(excess, population_std(returns))
}

/// Annualized Sortino ratio: like Sharpe, but the denominator is the
/// deviation of only the returns below the risk-free rate.
pub fn sortino_ratio(returns: &[f64], risk_free: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let excess = mean(returns) - risk_free;
    let downside: Vec<f64> = returns
        .iter()
        .filter(|&&r| r < risk_free)
        .map(|&r| (r - risk_free).powi(2))
        .collect();
    let downside_dev = if downside.is_empty() {
        0.0
    } else {
        (downside.iter().sum::<f64>() / downside.len() as f64).sqrt()
    };

    annualized_ratio(excess, downside_dev)
}

/// Calmar ratio: annualized return over the maximum drawdown of the
/// equity curve compounded from the returns.
pub fn calmar_ratio(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let annualized = mean(returns) * TRADING_DAYS_PER_YEAR;
    let mut equity = Vec::with_capacity(returns.len() + 1);
    let mut value = 1.0;
    equity.push(value);
    for r in returns {
        value *= 1.0 + r;
        equity.push(value);
    }
    let drawdown = max_drawdown(&equity).max_drawdown;

    if drawdown == 0.0 {
        if annualized > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    } else {
        annualized / drawdown
    }
}

/// Drawdown profile of a price or equity series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawdownSeries {
    /// Worst peak-to-trough decline as a fraction (0.25 = down 25%).
    pub max_drawdown: f64,
    /// Drawdown at every index, aligned 1:1 with the input.
    pub series: Vec<f64>,
}

/// Running-peak drawdown: at each index, `(peak - price) / peak` against
/// the highest price seen so far. Non-positive peaks report 0.
pub fn max_drawdown(prices: &[f64]) -> DrawdownSeries {
    let mut series = Vec::with_capacity(prices.len());
    let mut max_dd = 0.0_f64;
    let mut peak = f64::NEG_INFINITY;

    for &price in prices {
        if price > peak {
            peak = price;
        }
        let dd = if peak > 0.0 { (peak - price) / peak } else { 0.0 };
        max_dd = max_dd.max(dd);
        series.push(dd);
    }

    DrawdownSeries {
        max_drawdown: max_dd,
        series,
    }
}

/// A zero denominator with positive excess return reports infinity
/// (riskless gain); otherwise a zero denominator reports 0.
fn annualized_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    } else {
        numerator / denominator * TRADING_DAYS_PER_YEAR.sqrt()
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}
