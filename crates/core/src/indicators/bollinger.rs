use crate::indicators::sma::sma;

/// Bollinger band output; `None` wherever the middle band is undefined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Bollinger bands: an SMA middle band with upper and lower bands
/// `std_dev` population standard deviations away.
pub fn bollinger(closes: &[f64], period: usize, std_dev: f64) -> BollingerSeries {
    let middle = sma(closes, period);
    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];

    for i in 0..closes.len() {
        if let Some(mean) = middle[i] {
            let window = &closes[i + 1 - period..=i];
            let variance =
                window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
            let width = variance.sqrt() * std_dev;
            upper[i] = Some(mean + width);
            lower[i] = Some(mean - width);
        }
    }

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}
