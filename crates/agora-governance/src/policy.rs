//! Vote thresholds that scale with community size.

/// Decides how many votes a proposal needs, given the current number of
/// members. Both thresholds must be monotone non-decreasing in the
/// member count.
pub trait ThresholdPolicy: Send {
    /// Weighted yes tally required before a proposal counts as funded.
    fn funding_threshold(&self, member_count: u64) -> u64;

    /// Unweighted payment-vote count required to release the current
    /// tranche. Scales far slower than the funding threshold.
    fn payment_threshold(&self, member_count: u64) -> u64;
}

/// Default policy: a tenth of the membership plus a fixed floor for
/// funding, a hundredth for payment release. The ratios mirror the
/// reference deployment and are deliberately replaceable rather than
/// baked into the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultThresholds;

impl ThresholdPolicy for DefaultThresholds {
    fn funding_threshold(&self, member_count: u64) -> u64 {
        member_count / 10 + 8
    }

    fn payment_threshold(&self, member_count: u64) -> u64 {
        member_count / 100
    }
}
