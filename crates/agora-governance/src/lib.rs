//! Member-governed treasury engine.
//!
//! Members join through a one-time faucet claim, submit funding
//! proposals against a shared ether treasury, and decide them with
//! token-weighted, delegable votes. Funded proposals pay out in
//! tranches, each gated by a second one-member-one-vote round. Surveys
//! ride the same membership but stay unweighted.
//!
//! [`Governance`] is the entry point; everything else is the machinery
//! behind it.

pub mod config;
pub mod delegation;
pub mod error;
pub mod facade;
pub mod membership;
pub mod policy;
pub mod proposal;
pub mod survey;
pub mod tranche;

pub use config::GovConfig;
pub use delegation::{Delegation, DelegationBook};
pub use error::GovernanceError;
pub use facade::{Governance, ProjectInfo, SurveyInfo};
pub use membership::MembershipOracle;
pub use policy::{DefaultThresholds, ThresholdPolicy};
pub use proposal::{Action, ActionRecord, Proposal, ProposalRegistry};
pub use survey::{Survey, SurveyRegistry};
pub use tranche::TrancheState;
