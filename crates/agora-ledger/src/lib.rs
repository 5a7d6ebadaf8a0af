//! Value-holding collaborators of the governance engine.
//!
//! This crate provides:
//! - The `Ledger` trait and an in-memory token ledger
//! - The `Treasury` trait and an in-memory ether treasury
//! - The one-time faucet that doubles as the membership register
//!
//! Governance holds these behind trait objects and never touches
//! balances directly.

pub mod error;
pub mod faucet;
pub mod token;
pub mod treasury;

pub use error::LedgerError;
pub use faucet::Faucet;
pub use token::{Ledger, TokenLedger};
pub use treasury::{EtherTreasury, Treasury, TreasuryEvent};
