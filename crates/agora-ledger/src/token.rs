//! Token balance store backing fees and vote weight.

use std::collections::HashMap;

use agora_types::{Address, TokenAmount};

use crate::error::LedgerError;

/// Shared token balance store.
///
/// Governance consumes this behind a trait object so the balance backend
/// can be swapped without touching voting logic. Vote weight is always
/// the live balance reported here.
pub trait Ledger: Send {
    /// Current balance of an account. Unknown accounts hold zero.
    fn balance_of(&self, address: &Address) -> TokenAmount;

    /// Move tokens between accounts. Fails without effect if `from`
    /// holds less than `amount`.
    fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: TokenAmount,
    ) -> Result<(), LedgerError>;

    /// Create new tokens in `to`'s account.
    fn mint(&mut self, to: Address, amount: TokenAmount);

    /// Total tokens ever minted.
    fn total_supply(&self) -> TokenAmount;
}

/// In-memory token ledger.
#[derive(Debug, Default)]
pub struct TokenLedger {
    balances: HashMap<Address, TokenAmount>,
    total_supply: TokenAmount,
}

impl TokenLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with the full supply minted to one pool account.
    pub fn with_supply(pool: Address, supply: TokenAmount) -> Self {
        let mut ledger = Self::new();
        ledger.mint(pool, supply);
        ledger
    }
}

impl Ledger for TokenLedger {
    fn balance_of(&self, address: &Address) -> TokenAmount {
        self.balances.get(address).copied().unwrap_or(0)
    }

    fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(&from);
        if available < amount {
            return Err(LedgerError::InsufficientTokens {
                address: from,
                available,
                required: amount,
            });
        }

        *self.balances.entry(from).or_insert(0) -= amount;
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }

    fn mint(&mut self, to: Address, amount: TokenAmount) {
        *self.balances.entry(to).or_insert(0) += amount;
        self.total_supply += amount;
    }

    fn total_supply(&self) -> TokenAmount {
        self.total_supply
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
    fn test_mint_and_balance() {
        let mut ledger = TokenLedger::new();
        assert_eq!(ledger.balance_of(&addr(1)), 0);

        ledger.mint(addr(1), 100);
        assert_eq!(ledger.balance_of(&addr(1)), 100);
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn test_with_supply() {
        let pool = addr(9);
        let ledger = TokenLedger::with_supply(pool, 10_000_000);
        assert_eq!(ledger.balance_of(&pool), 10_000_000);
        assert_eq!(ledger.total_supply(), 10_000_000);
    }

    #[test]
    fn test_transfer() {
        let mut ledger = TokenLedger::new();
        ledger.mint(addr(1), 10);

        ledger.transfer(addr(1), addr(2), 4).unwrap();
        assert_eq!(ledger.balance_of(&addr(1)), 6);
        assert_eq!(ledger.balance_of(&addr(2)), 4);

        // Supply unchanged by transfers
        assert_eq!(ledger.total_supply(), 10);
    }

    #[test]
    fn test_transfer_insufficient() {
        let mut ledger = TokenLedger::new();
        ledger.mint(addr(1), 3);

        let err = ledger.transfer(addr(1), addr(2), 5).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientTokens { available: 3, required: 5, .. }));

        // No partial effect
        assert_eq!(ledger.balance_of(&addr(1)), 3);
        assert_eq!(ledger.balance_of(&addr(2)), 0);
    }
}
