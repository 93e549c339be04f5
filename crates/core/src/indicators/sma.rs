/// Simple moving average.
///
/// `out[i]` is the mean of `values[i + 1 - period ..= i]`; positions
/// before the first full window are `None`. A zero period or a series
/// shorter than the period yields all `None`.
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    for i in (period - 1)..values.len() {
        let window = &values[i + 1 - period..=i];
        let sum: f64 = window.iter().sum();
        out[i] = Some(sum / period as f64);
    }

    out
}
