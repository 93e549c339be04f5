/// Exponential moving average with smoothing factor `2 / (period + 1)`.
///
/// Defined at every index: positions before the window fills hold the
/// running mean of the values seen so far, and from `period - 1` on the
/// usual recursion `v * k + prev * (1 - k)` applies. Periods of 0 or 1
/// return the input unchanged.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    if period <= 1 {
        return values.to_vec();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut seed_sum = values[0];
    out.push(values[0]);

    for i in 1..values.len() {
        if i < period - 1 {
            seed_sum += values[i];
            out.push(seed_sum / (i + 1) as f64);
        } else {
            let prev = out[i - 1];
            out.push(values[i] * k + prev * (1.0 - k));
        }
    }

    out
}
