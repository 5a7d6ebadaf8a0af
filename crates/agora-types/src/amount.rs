//! Amount types for the two pooled assets.
//!
//! Governance tokens are small integers (the faucet hands out single
//! tokens), so `u64` is ample. Ether amounts are denominated in wei and
//! need the full `u128` range.

/// Governance token amount. One unit is one vote of weight.
pub type TokenAmount = u64;

/// Ether amount in wei.
pub type Wei = u128;

/// Wei per ether (10^18).
pub const WEI_PER_ETHER: Wei = 1_000_000_000_000_000_000;

/// Convert a whole-ether amount to wei.
pub const fn ether(whole: u64) -> Wei {
    whole as Wei * WEI_PER_ETHER
}

/// Convert a milliether amount to wei. Protocol fees are expressed in
/// fractions of an ether (0.1, 0.04), which milliether covers exactly.
pub const fn milliether(milli: u64) -> Wei {
    milli as Wei * (WEI_PER_ETHER / 1_000)
}
