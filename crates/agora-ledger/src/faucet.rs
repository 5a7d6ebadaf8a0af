//! One-time token faucet, doubling as the membership register.
//!
//! An address becomes a member the moment it claims its first token and
//! stays a member forever, regardless of its balance afterwards.

use std::collections::HashSet;

use agora_types::Address;

use crate::error::LedgerError;

/// Tracks which addresses have claimed the faucet. Claiming is
/// exactly-once and is what grants membership.
#[derive(Debug, Default)]
pub struct Faucet {
    claimed: HashSet<Address>,
}

impl Faucet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this address has claimed and is therefore a member.
    pub fn has_claimed(&self, address: &Address) -> bool {
        self.claimed.contains(address)
    }

    /// Record a claim. The token transfer itself is the caller's job;
    /// this only gates the one-per-address rule.
    pub fn claim(&mut self, address: Address) -> Result<(), LedgerError> {
        if !self.claimed.insert(address) {
            return Err(LedgerError::AlreadyClaimed(address));
        }
        Ok(())
    }

    /// Number of members (addresses that have ever claimed).
    pub fn member_count(&self) -> u64 {
        self.claimed.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = n;
        Address::from_bytes(bytes)
    }

    #[test]
    fn test_claim_once() {
        let mut faucet = Faucet::new();
        assert!(!faucet.has_claimed(&addr(1)));

        faucet.claim(addr(1)).unwrap();
        assert!(faucet.has_claimed(&addr(1)));
        assert_eq!(faucet.member_count(), 1);
    }

    #[test]
    fn test_second_claim_fails() {
        let mut faucet = Faucet::new();
        faucet.claim(addr(1)).unwrap();

        let err = faucet.claim(addr(1)).unwrap_err();
        assert_eq!(err, LedgerError::AlreadyClaimed(addr(1)));
        assert_eq!(faucet.member_count(), 1);
    }

    #[test]
    fn test_membership_never_revoked() {
        let mut faucet = Faucet::new();
        faucet.claim(addr(1)).unwrap();
        faucet.claim(addr(2)).unwrap();

        // There is no removal API at all; count only grows.
        assert_eq!(faucet.member_count(), 2);
    }
}
