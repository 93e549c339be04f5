use stockwatch_core::indicators::{
    atr, bollinger, calmar_ratio, ema, historical_var, macd, max_drawdown, rsi, sharpe_ratio, sma,
    sortino_ratio, stochastic,
};
use stockwatch_core::models::ohlc::Ohlc;

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
}

// ═══════════════════════════════════════════════════════════════════
//  SMA
// ═══════════════════════════════════════════════════════════════════

mod simple_moving_average {
    use super::*;

    #[test]
    fn empty_series() {
        assert!(sma(&[], 3).is_empty());
    }

    #[test]
    fn output_aligns_with_input() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(sma(&values, 3).len(), values.len());
    }

    #[test]
    fn none_until_window_fills() {
        let out = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(2.0));
        assert_eq!(out[3], Some(3.0));
        assert_eq!(out[4], Some(4.0));
    }

    #[test]
    fn constant_series_reads_the_constant() {
        let out = sma(&[6.5; 7], 4);
        for v in out.into_iter().flatten() {
            assert_eq!(v, 6.5);
        }
    }

    #[test]
    fn series_shorter_than_period_is_all_none() {
        let out = sma(&[1.0, 2.0], 3);
        assert!(out.iter().all(|v| v.is_none()));
    }

    #[test]
    fn zero_period_is_all_none() {
        let out = sma(&[1.0, 2.0, 3.0], 0);
        assert!(out.iter().all(|v| v.is_none()));
    }

    #[test]
    fn period_one_is_identity() {
        let values = [4.0, 7.0, 1.0];
        let out = sma(&values, 1);
        for (v, o) in values.iter().zip(&out) {
            assert_eq!(*o, Some(*v));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  EMA
// ═══════════════════════════════════════════════════════════════════

mod exponential_moving_average {
    use super::*;

    #[test]
    fn empty_series() {
        assert!(ema(&[], 3).is_empty());
    }

    #[test]
    fn defined_at_every_index() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(ema(&values, 4).len(), values.len());
    }

    #[test]
    fn period_one_is_identity() {
        let values = [3.0, 1.0, 4.0];
        assert_eq!(ema(&values, 1), values.to_vec());
    }

    #[test]
    fn seeds_with_running_mean_then_recurses() {
        // period 3, k = 0.5
        let out = ema(&[1.0, 2.0, 3.0, 4.0], 3);
        approx(out[0], 1.0);
        approx(out[1], 1.5);
        approx(out[2], 2.25);
        approx(out[3], 3.125);
    }

    #[test]
    fn constant_series_stays_constant() {
        let out = ema(&[10.0; 5], 3);
        for v in out {
            approx(v, 10.0);
        }
    }

    #[test]
    fn tracks_toward_recent_values() {
        let out = ema(&[1.0, 1.0, 1.0, 1.0, 100.0], 3);
        let last = *out.last().unwrap();
        assert!(last > 1.0 && last < 100.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  RSI
// ═══════════════════════════════════════════════════════════════════

mod relative_strength_index {
    use super::*;

    #[test]
    fn too_short_series_is_all_none() {
        let out = rsi(&[1.0, 2.0, 3.0], 14);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|v| v.is_none()));
    }

    #[test]
    fn first_defined_index_follows_seed() {
        let out = rsi(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3);
        for v in &out[..=3] {
            assert!(v.is_none());
        }
        assert!(out[4].is_some());
        assert!(out[5].is_some());
    }

    #[test]
    fn monotonic_gains_saturate_at_100() {
        let closes: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let out = rsi(&closes, 3);
        for v in out.into_iter().flatten() {
            approx(v, 100.0);
        }
    }

    #[test]
    fn monotonic_losses_read_zero() {
        let closes: Vec<f64> = (1..=10).rev().map(|i| i as f64).collect();
        let out = rsi(&closes, 3);
        for v in out.into_iter().flatten() {
            approx(v, 0.0);
        }
    }

    #[test]
    fn mixed_series_stays_inside_bounds() {
        let closes = [44.0, 44.3, 44.1, 44.2, 43.6, 44.3, 44.8, 44.5, 45.1, 44.9];
        let out = rsi(&closes, 4);
        let defined: Vec<f64> = out.into_iter().flatten().collect();
        assert!(!defined.is_empty());
        for v in defined {
            assert!(v > 0.0 && v < 100.0);
        }
    }

    #[test]
    fn zero_period_is_all_none() {
        let out = rsi(&[1.0, 2.0, 3.0], 0);
        assert!(out.iter().all(|v| v.is_none()));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  MACD
// ═══════════════════════════════════════════════════════════════════

mod macd_series {
    use super::*;

    #[test]
    fn all_series_align_with_input() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i % 7) as f64).collect();
        let out = macd(&closes, 12, 26, 9);
        assert_eq!(out.macd.len(), closes.len());
        assert_eq!(out.signal.len(), closes.len());
        assert_eq!(out.histogram.len(), closes.len());
    }

    #[test]
    fn constant_series_is_all_zero() {
        let out = macd(&[50.0; 40], 12, 26, 9);
        for ((m, s), h) in out.macd.iter().zip(&out.signal).zip(&out.histogram) {
            approx(*m, 0.0);
            approx(*s, 0.0);
            approx(*h, 0.0);
        }
    }

    #[test]
    fn uptrend_pushes_line_above_zero() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let out = macd(&closes, 12, 26, 9);
        assert!(*out.macd.last().unwrap() > 0.0);
    }

    #[test]
    fn histogram_is_line_minus_signal() {
        let closes: Vec<f64> = (0..30).map(|i| (i as f64 * 0.7).sin() * 10.0 + 100.0).collect();
        let out = macd(&closes, 5, 10, 4);
        for i in 0..closes.len() {
            approx(out.histogram[i], out.macd[i] - out.signal[i]);
        }
    }

    #[test]
    fn empty_series() {
        let out = macd(&[], 12, 26, 9);
        assert!(out.macd.is_empty());
        assert!(out.signal.is_empty());
        assert!(out.histogram.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Bollinger Bands
// ═══════════════════════════════════════════════════════════════════

mod bollinger_bands {
    use super::*;

    #[test]
    fn bands_follow_population_deviation() {
        let out = bollinger(&[1.0, 2.0, 3.0, 4.0, 5.0], 5, 2.0);
        // mean 3, population variance 2
        let width = 2.0 * 2.0_f64.sqrt();
        approx(out.middle[4].unwrap(), 3.0);
        approx(out.upper[4].unwrap(), 3.0 + width);
        approx(out.lower[4].unwrap(), 3.0 - width);
    }

    #[test]
    fn constant_series_collapses_bands() {
        let out = bollinger(&[7.0; 6], 3, 2.0);
        for i in 2..6 {
            approx(out.upper[i].unwrap(), 7.0);
            approx(out.middle[i].unwrap(), 7.0);
            approx(out.lower[i].unwrap(), 7.0);
        }
    }

    #[test]
    fn none_until_window_fills() {
        let out = bollinger(&[1.0, 2.0, 3.0, 4.0], 3, 2.0);
        assert!(out.upper[0].is_none() && out.upper[1].is_none());
        assert!(out.middle[0].is_none());
        assert!(out.lower[1].is_none());
        assert!(out.upper[2].is_some());
    }

    #[test]
    fn upper_never_below_lower() {
        let closes: Vec<f64> = (0..20).map(|i| ((i * 13) % 7) as f64 + 50.0).collect();
        let out = bollinger(&closes, 5, 2.0);
        for i in 0..closes.len() {
            if let (Some(u), Some(l)) = (out.upper[i], out.lower[i]) {
                assert!(u >= l);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Stochastic Oscillator
// ═══════════════════════════════════════════════════════════════════

mod stochastic_oscillator {
    use super::*;

    fn bar(low: f64, high: f64, close: f64) -> Ohlc {
        Ohlc::new(low, high, low, close)
    }

    #[test]
    fn close_at_extremes() {
        let bars = [bar(1.0, 3.0, 3.0), bar(1.0, 4.0, 4.0), bar(2.0, 5.0, 5.0)];
        let out = stochastic(&bars, 3, 2);
        // close == highest high of the window
        approx(out.k[2].unwrap(), 100.0);

        let bars = [bar(1.0, 3.0, 2.0), bar(1.0, 4.0, 3.0), bar(1.0, 5.0, 1.0)];
        let out = stochastic(&bars, 3, 2);
        // close == lowest low of the window
        approx(out.k[2].unwrap(), 0.0);
    }

    #[test]
    fn flat_window_reads_midpoint() {
        let bars = [Ohlc::flat(5.0), Ohlc::flat(5.0), Ohlc::flat(5.0)];
        let out = stochastic(&bars, 3, 2);
        approx(out.k[2].unwrap(), 50.0);
    }

    #[test]
    fn d_line_alignment() {
        let bars: Vec<Ohlc> = (0..6).map(|i| bar(i as f64, i as f64 + 2.0, i as f64 + 1.0)).collect();
        let out = stochastic(&bars, 3, 2);

        // %K defined from k_period-1, %D one d_period later
        assert!(out.k[1].is_none());
        assert!(out.k[2].is_some());
        assert!(out.d[2].is_none());
        assert!(out.d[3].is_some());
        assert_eq!(out.k.len(), bars.len());
        assert_eq!(out.d.len(), bars.len());
    }

    #[test]
    fn short_series_is_all_none() {
        let bars = [Ohlc::flat(1.0), Ohlc::flat(2.0)];
        let out = stochastic(&bars, 5, 3);
        assert!(out.k.iter().all(|v| v.is_none()));
        assert!(out.d.iter().all(|v| v.is_none()));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ATR
// ═══════════════════════════════════════════════════════════════════

mod average_true_range {
    use super::*;

    #[test]
    fn empty_series() {
        assert!(atr(&[], 14).is_empty());
    }

    #[test]
    fn constant_range_bars() {
        let bars = vec![Ohlc::new(10.0, 12.0, 9.0, 10.0); 6];
        let out = atr(&bars, 3);
        for v in out {
            approx(v, 3.0);
        }
    }

    #[test]
    fn gap_widens_true_range() {
        let bars = [Ohlc::new(10.0, 12.0, 9.0, 10.0), Ohlc::new(20.0, 21.0, 19.0, 20.0)];
        let out = atr(&bars, 1);
        // period 1 returns the raw true ranges; the gap from close 10
        // dominates the second bar's high/low span
        approx(out[0], 3.0);
        approx(out[1], 11.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Risk Metrics
// ═══════════════════════════════════════════════════════════════════

mod value_at_risk {
    use super::*;

    #[test]
    fn empty_series_is_zero() {
        assert_eq!(historical_var(&[], 0.95), 0.0);
    }

    #[test]
    fn picks_the_tail_percentile() {
        let returns = [-0.05, 0.01, -0.02, 0.03];
        approx(historical_var(&returns, 0.95), 0.05);
        approx(historical_var(&returns, 0.5), 0.01);
    }

    #[test]
    fn index_clamped_to_series() {
        let returns = [-0.05, 0.01, -0.02, 0.03];
        // confidence 0 would index one past the end
        approx(historical_var(&returns, 0.0), 0.03);
    }
}

mod sharpe_and_sortino {
    use super::*;

    #[test]
    fn empty_series_is_zero() {
        assert_eq!(sharpe_ratio(&[], 0.0), 0.0);
        assert_eq!(sortino_ratio(&[], 0.0), 0.0);
    }

    #[test]
    fn riskless_gain_is_infinite() {
        assert_eq!(sharpe_ratio(&[0.01; 5], 0.0), f64::INFINITY);
    }

    #[test]
    fn zero_excess_with_zero_deviation_is_zero() {
        assert_eq!(sharpe_ratio(&[0.01; 5], 0.01), 0.0);
    }

    #[test]
    fn positive_excess_is_positive_and_finite() {
        let sharpe = sharpe_ratio(&[0.02, 0.01, 0.03], 0.0);
        assert!(sharpe > 0.0);
        assert!(sharpe.is_finite());
    }

    #[test]
    fn sortino_without_downside_is_infinite() {
        assert_eq!(sortino_ratio(&[0.01, 0.02], 0.0), f64::INFINITY);
    }

    #[test]
    fn sortino_penalizes_only_downside() {
        let sortino = sortino_ratio(&[0.02, -0.01], 0.0);
        // excess 0.005 over downside deviation 0.01, annualized
        approx(sortino, 0.005 / 0.01 * 252.0_f64.sqrt());
    }
}

mod drawdown_and_calmar {
    use super::*;

    #[test]
    fn empty_series() {
        let out = max_drawdown(&[]);
        assert_eq!(out.max_drawdown, 0.0);
        assert!(out.series.is_empty());
    }

    #[test]
    fn monotonic_rise_has_no_drawdown() {
        let out = max_drawdown(&[1.0, 2.0, 3.0]);
        assert_eq!(out.max_drawdown, 0.0);
        assert_eq!(out.series, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn tracks_running_peak() {
        let out = max_drawdown(&[100.0, 110.0, 99.0, 121.0, 60.5]);
        approx(out.series[0], 0.0);
        approx(out.series[1], 0.0);
        approx(out.series[2], 0.1);
        approx(out.series[3], 0.0);
        approx(out.series[4], 0.5);
        approx(out.max_drawdown, 0.5);
    }

    #[test]
    fn non_positive_peaks_report_zero() {
        let out = max_drawdown(&[-5.0, -4.0, -6.0]);
        assert_eq!(out.max_drawdown, 0.0);
    }

    #[test]
    fn calmar_empty_is_zero() {
        assert_eq!(calmar_ratio(&[]), 0.0);
    }

    #[test]
    fn calmar_without_drawdown_is_infinite() {
        assert_eq!(calmar_ratio(&[0.01; 10]), f64::INFINITY);
    }

    #[test]
    fn calmar_known_value() {
        // mean 0.025 annualized to 6.3, max drawdown 5%
        let calmar = calmar_ratio(&[0.1, -0.05]);
        assert!((calmar - 126.0).abs() < 1e-6);
    }
}
