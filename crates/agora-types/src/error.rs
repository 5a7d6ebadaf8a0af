use thiserror::Error;

/// Errors from core type parsing and construction.
///
/// `PartialEq` only: the embedded `hex::FromHexError` does not
/// implement `Eq`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    #[error("Invalid address length: {0} (expected 20)")]
    InvalidAddressLength(usize),

    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("Bech32 error: {0}")]
    Bech32Error(String),

    #[error("Hex decode error: {0}")]
    HexError(#[from] hex::FromHexError),
}
