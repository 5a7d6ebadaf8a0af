//! Shared ether treasury funding proposal tranches.

use agora_types::{Address, Wei};

use crate::error::LedgerError;

/// Shared ether balance. Fees and donations flow in, tranche payments
/// flow out.
pub trait Treasury: Send {
    /// Current treasury balance in wei.
    fn balance(&self) -> Wei;

    /// Accept wei into the treasury.
    fn deposit(&mut self, from: Address, amount: Wei);

    /// Pay wei out of the treasury. Fails without effect on shortfall.
    fn release(&mut self, to: Address, amount: Wei) -> Result<(), LedgerError>;
}

/// A movement of treasury funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreasuryEvent {
    /// Wei received from an account
    Deposit { from: Address, amount: Wei },
    /// Wei paid out to an account
    Release { to: Address, amount: Wei },
}

/// In-memory ether treasury with a full movement log.
#[derive(Debug, Default)]
pub struct EtherTreasury {
    balance: Wei,
    events: Vec<TreasuryEvent>,
}

impl EtherTreasury {
    pub fn new() -> Self {
        Self::default()
    }

    /// All deposits and releases since creation, in order.
    pub fn events(&self) -> &[TreasuryEvent] {
        &self.events
    }
}

impl Treasury for EtherTreasury {
    fn balance(&self) -> Wei {
        self.balance
    }

    fn deposit(&mut self, from: Address, amount: Wei) {
        self.balance += amount;
        self.events.push(TreasuryEvent::Deposit { from, amount });
        tracing::debug!("Treasury deposit of {} wei from {}", amount, from);
    }

    fn release(&mut self, to: Address, amount: Wei) -> Result<(), LedgerError> {
        if self.balance < amount {
            return Err(LedgerError::TreasuryShortfall {
                available: self.balance,
                required: amount,
            });
        }

        self.balance -= amount;
        self.events.push(TreasuryEvent::Release { to, amount });
        tracing::debug!("Treasury release of {} wei to {}", amount, to);
        Ok(())
    }
}
