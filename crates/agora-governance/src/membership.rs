//! Membership checks and vote weight lookup.
//!
//! Membership is granted by the first faucet claim and never revoked.
//! Vote weight is the member's live token balance, so spending or
//! donating tokens lowers the weight of future votes.

use agora_ledger::{Faucet, Ledger};
use agora_types::{Address, TokenAmount};

use crate::error::GovernanceError;

/// Answers "is this address a member" and "how much weight can it
/// spend". Read-only over the faucet register and the token ledger;
/// fails closed for unknown addresses.
pub struct MembershipOracle<'a> {
    faucet: &'a Faucet,
    ledger: &'a dyn Ledger,
}

impl<'a> MembershipOracle<'a> {
    pub fn new(faucet: &'a Faucet, ledger: &'a dyn Ledger) -> Self {
        Self { faucet, ledger }
    }

    pub fn is_member(&self, address: &Address) -> bool {
        self.faucet.has_claimed(address)
    }

    /// Spendable vote weight: the current token balance. Zero for
    /// non-members and for members that emptied their balance.
    pub fn weight_of(&self, address: &Address) -> TokenAmount {
        self.ledger.balance_of(address)
    }

    pub fn member_count(&self) -> u64 {
        self.faucet.member_count()
    }

    pub fn require_member(&self, address: &Address) -> Result<(), GovernanceError> {
        if self.is_member(address) {
            Ok(())
        } else {
            Err(GovernanceError::NotAMember(*address))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_ledger::TokenLedger;

    fn addr(n: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = n;
        Address::from_bytes(bytes)
    }

    #[test]
    fn test_unknown_address_is_not_a_member() {
        let faucet = Faucet::new();
        let ledger = TokenLedger::new();
        let oracle = MembershipOracle::new(&faucet, &ledger);

        assert!(!oracle.is_member(&addr(1)));
        assert_eq!(oracle.weight_of(&addr(1)), 0);
        assert_eq!(
            oracle.require_member(&addr(1)),
            Err(GovernanceError::NotAMember(addr(1)))
        );
    }

    #[test]
    fn test_member_weight_tracks_balance() {
        let mut faucet = Faucet::new();
        let mut ledger = TokenLedger::new();
        faucet.claim(addr(1)).unwrap();
        ledger.mint(addr(1), 7);

        let oracle = MembershipOracle::new(&faucet, &ledger);
        assert!(oracle.is_member(&addr(1)));
        assert_eq!(oracle.weight_of(&addr(1)), 7);
        assert_eq!(oracle.member_count(), 1);
    }

    #[test]
    fn test_member_with_empty_balance_stays_member() {
        let mut faucet = Faucet::new();
        let ledger = TokenLedger::new();
        faucet.claim(addr(1)).unwrap();

        let oracle = MembershipOracle::new(&faucet, &ledger);
        assert!(oracle.is_member(&addr(1)));
        assert_eq!(oracle.weight_of(&addr(1)), 0);
    }
}
