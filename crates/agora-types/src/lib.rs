//! Core types shared across the AGORA workspace.
//!
//! This crate provides:
//! - Member addresses (bech32m display, blake3 derivation)
//! - Token and ether amount types with protocol denominations
//! - The shared types error

pub mod address;
pub mod amount;
pub mod error;

pub use address::Address;
pub use amount::{TokenAmount, Wei, WEI_PER_ETHER};
pub use error::TypesError;
