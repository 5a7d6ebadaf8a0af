use agora_ledger::LedgerError;
use agora_types::{Address, Wei};
use thiserror::Error;

/// Errors that can occur in governance operations.
///
/// Every error aborts the whole operation: state is exactly as it was
/// before the call. Nothing is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("Proposal not found: {0}")]
    ProposalNotFound(u64),

    #[error("Survey not found: {0}")]
    SurveyNotFound(u64),

    #[error("{0} is not a member")]
    NotAMember(Address),

    #[error("Member has already voted or delegated here")]
    AlreadyActed,

    #[error("Faucet already claimed")]
    AlreadyClaimed,

    #[error("Grant already reserved")]
    AlreadyReserved,

    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    #[error("Invalid payment: expected exactly {expected} wei, got {got}")]
    InvalidPayment { expected: Wei, got: Wei },

    #[error("Self-delegation is not allowed")]
    SelfDelegationNotAllowed,

    #[error("Delegation chains are limited to one hop")]
    DelegationDepthExceeded,

    #[error("Not authorized: {0}")]
    NotAuthorized(&'static str),

    #[error("Proposal is not funded")]
    NotFunded,

    #[error("Payment is not ready for release")]
    NotReadyForPayment,

    #[error("All tranches have been withdrawn")]
    NoTranchesRemaining,

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(&'static str),

    #[error("Invalid survey response: {0}")]
    InvalidSurveyResponse(&'static str),
}

impl From<LedgerError> for GovernanceError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientTokens { .. } | LedgerError::TreasuryShortfall { .. } => {
                GovernanceError::InsufficientBalance(err.to_string())
            }
            LedgerError::AlreadyClaimed(_) => GovernanceError::AlreadyClaimed,
        }
    }
}
