//! Campaign metrics — synthetic estimates recomputed after every
//! successful send. Not provider telemetry.

use mailblast_core::types::Stats;

/// Recompute all counters from the cumulative sent count.
///
/// Fixed ratios: 5% of sends bounce; 30% of deliveries open. Integer
/// arithmetic reproduces the floor behavior of the original dashboard
/// math exactly.
pub fn compute(total_sent: u64) -> Stats {
    let bounces = total_sent * 5 / 100;
    let deliveries = total_sent.saturating_sub(bounces);
    let opens = deliveries * 3 / 10;
    Stats {
        total_sent,
        deliveries,
        opens,
        bounces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(compute(0), Stats::default());
    }

    #[test]
    fn test_small_counts_floor_to_zero() {
        // 3 sends: 0 bounces, 3 deliveries, floor(0.9) = 0 opens
        let stats = compute(3);
        assert_eq!(stats.total_sent, 3);
        assert_eq!(stats.bounces, 0);
        assert_eq!(stats.deliveries, 3);
        assert_eq!(stats.opens, 0);
    }

    #[test]
    fn test_ratios_at_the_cap() {
        // 100 sends: 5 bounces, 95 deliveries, floor(28.5) = 28 opens
        let stats = compute(100);
        assert_eq!(stats.bounces, 5);
        assert_eq!(stats.deliveries, 95);
        assert_eq!(stats.opens, 28);
    }

    #[test]
    fn test_monotonic_in_total_sent() {
        let mut prev = compute(0);
        for total in 1..=500 {
            let next = compute(total);
            assert!(next.total_sent > prev.total_sent);
            assert!(next.deliveries >= prev.deliveries);
            assert!(next.opens >= prev.opens);
            assert!(next.bounces >= prev.bounces);
            prev = next;
        }
    }

    #[test]
    fn test_invariants_hold_everywhere() {
        for total in 0..=1000 {
            let stats = compute(total);
            assert_eq!(stats.bounces, total * 5 / 100);
            assert_eq!(stats.deliveries, total - stats.bounces);
            assert_eq!(stats.opens, stats.deliveries * 3 / 10);
        }
    }
}
