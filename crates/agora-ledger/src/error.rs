use agora_types::{Address, TokenAmount, Wei};
use thiserror::Error;

/// Errors from ledger, treasury and faucet operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient token balance for {address}: have {available}, need {required}")]
    InsufficientTokens {
        address: Address,
        available: TokenAmount,
        required: TokenAmount,
    },

    #[error("Treasury shortfall: have {available} wei, need {required} wei")]
    TreasuryShortfall { available: Wei, required: Wei },

    #[error("Faucet already claimed by {0}")]
    AlreadyClaimed(Address),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::InsufficientTokens {
            address: Address::ZERO,
            available: 1,
            required: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("have 1"));
        assert!(msg.contains("need 5"));
    }
}
