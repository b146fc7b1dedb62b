//! Rolling top-of-book history
//!
//! One entry per tick per depth rank, for each side. Ranks the book did not
//! have that tick are recorded as [`BookLevel::Absent`] so every series stays
//! aligned with the tick count.

use harbor_core::{BookLevel, Level, Side};

/// Number of ranks recorded per side
pub const HISTORY_DEPTH: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct DepthHistory {
    bids: [Vec<BookLevel>; HISTORY_DEPTH],
    asks: [Vec<BookLevel>; HISTORY_DEPTH],
}

impl DepthHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one tick. `bids` and `asks` are best-first; anything beyond
    /// [`HISTORY_DEPTH`] is ignored.
    pub fn record(&mut self, bids: &[Level], asks: &[Level]) {
        for rank in 0..HISTORY_DEPTH {
            self.bids[rank].push(bids.get(rank).copied().into());
            self.asks[rank].push(asks.get(rank).copied().into());
        }
    }

    /// Number of ticks recorded
    pub fn len(&self) -> usize {
        self.bids[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Full series for a side at `depth` (1 = best level)
    pub fn series(&self, side: Side, depth: usize) -> Option<&[BookLevel]> {
        if depth == 0 || depth > HISTORY_DEPTH {
            return None;
        }
        let series = match side {
            Side::Buy => &self.bids[depth - 1],
            Side::Sell => &self.asks[depth - 1],
        };
        Some(series.as_slice())
    }

    /// Most recent `size` entries for a side at `depth`
    pub fn window(&self, side: Side, depth: usize, size: usize) -> Option<&[BookLevel]> {
        let series = self.series(side, depth)?;
        let start = series.len().saturating_sub(size);
        Some(&series[start..])
    }

    /// Sample standard deviation of log returns of the best bid/ask mid over
    /// the last `size` ticks. A return is only taken between adjacent ticks
    /// that both had two sides. Needs at least two returns.
    pub fn mid_volatility(&self, size: usize) -> Option<f64> {
        let bids = self.window(Side::Buy, 1, size)?;
        let asks = self.window(Side::Sell, 1, size)?;

        let mids: Vec<Option<f64>> = bids
            .iter()
            .zip(asks)
            .map(|(bid, ask)| match (bid.price(), ask.price()) {
                (Some(b), Some(a)) if b + a > 0 => Some((b + a) as f64 / 2.0),
                _ => None,
            })
            .collect();

        let returns: Vec<f64> = mids
            .windows(2)
            .filter_map(|w| match (w[0], w[1]) {
                (Some(prev), Some(next)) => Some((next / prev).ln()),
                _ => None,
            })
            .collect();
        if returns.len() < 2 {
            return None;
        }

        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Some(variance.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_record_pads_missing_ranks() {
        let mut history = DepthHistory::new();
        history.record(&[Level::new(10, 5)], &[Level::new(12, 3), Level::new(13, 4)]);

        assert_eq!(history.len(), 1);
        assert_eq!(history.series(Side::Buy, 1).unwrap(), &[BookLevel::present(10, 5)]);
        assert_eq!(history.series(Side::Buy, 2).unwrap(), &[BookLevel::Absent]);
        assert_eq!(history.series(Side::Sell, 2).unwrap(), &[BookLevel::present(13, 4)]);
        assert_eq!(history.series(Side::Sell, 3).unwrap(), &[BookLevel::Absent]);
    }

    #[test]
    fn test_rank_out_of_range() {
        let history = DepthHistory::new();
        assert!(history.series(Side::Buy, 0).is_none());
        assert!(history.series(Side::Sell, 4).is_none());
    }

    #[test]
    fn test_window_returns_tail() {
        let mut history = DepthHistory::new();
        for price in 10..15 {
            history.record(&[Level::new(price, 1)], &[]);
        }

        let window = history.window(Side::Buy, 1, 2).unwrap();
        assert_eq!(window, &[BookLevel::present(13, 1), BookLevel::present(14, 1)]);

        // Larger than the history just returns everything
        assert_eq!(history.window(Side::Buy, 1, 100).unwrap().len(), 5);
    }

    #[test]
    fn test_mid_volatility_flat_market() {
        let mut history = DepthHistory::new();
        for _ in 0..5 {
            history.record(&[Level::new(99, 1)], &[Level::new(101, 1)]);
        }
        assert_eq!(history.mid_volatility(5), Some(0.0));
    }

    #[test]
    fn test_mid_volatility_no_return_across_gap() {
        // Mids: 100, one-sided, 102, 100, 102
        let mut history = DepthHistory::new();
        history.record(&[Level::new(99, 1)], &[Level::new(101, 1)]);
        history.record(&[], &[Level::new(101, 1)]);
        history.record(&[Level::new(101, 1)], &[Level::new(103, 1)]);
        history.record(&[Level::new(99, 1)], &[Level::new(101, 1)]);
        history.record(&[Level::new(101, 1)], &[Level::new(103, 1)]);

        // Only 102 -> 100 and 100 -> 102 count; 100 -> 102 across the gap does not
        let returns = [(100.0f64 / 102.0).ln(), (102.0f64 / 100.0).ln()];
        let mean = (returns[0] + returns[1]) / 2.0;
        let expected =
            ((returns[0] - mean).powi(2) + (returns[1] - mean).powi(2)).sqrt();

        let vol = history.mid_volatility(10).unwrap();
        assert_relative_eq!(vol, expected, epsilon = 1e-12);
        assert_relative_eq!(vol, 0.0280, epsilon = 1e-4);
    }

    #[test]
    fn test_mid_volatility_gap_leaves_too_few_returns() {
        let mut history = DepthHistory::new();
        history.record(&[Level::new(99, 1)], &[Level::new(101, 1)]);
        history.record(&[Level::new(99, 1)], &[]);
        history.record(&[Level::new(101, 1)], &[Level::new(103, 1)]);
        history.record(&[Level::new(99, 1)], &[Level::new(101, 1)]);
        assert_eq!(history.mid_volatility(10), None);
    }

    #[test]
    fn test_mid_volatility_needs_two_returns() {
        let mut history = DepthHistory::new();
        history.record(&[Level::new(99, 1)], &[Level::new(101, 1)]);
        history.record(&[Level::new(100, 1)], &[Level::new(102, 1)]);
        assert_eq!(history.mid_volatility(10), None);
    }
}
