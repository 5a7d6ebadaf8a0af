//! Proposal records, direct votes and the funding tally.
//!
//! A member gets exactly one action per proposal: a direct vote or a
//! delegation. Either consumes the action right permanently.

use std::collections::HashMap;

use agora_types::{Address, TokenAmount, Wei};

use crate::error::GovernanceError;
use crate::tranche::TrancheState;

/// How a member spent their action on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Voted directly
    Voted { support: bool },
    /// Handed the vote to another member
    Delegated { to: Address },
}

/// A consumed action and the weight it carried.
#[derive(Debug, Clone, Copy)]
pub struct ActionRecord {
    pub action: Action,
    pub weight: TokenAmount,
}

/// A funding request with an ordered payment schedule.
#[derive(Debug, Clone)]
pub struct Proposal {
    /// Sequential id starting at 1; never reused
    pub id: u64,
    pub owner: Address,
    /// Opaque content locator, e.g. an IPFS hash
    pub locator: String,
    /// Requested lifetime in seconds. Published to clients; not a
    /// scheduling deadline enforced by the engine.
    pub lifetime_secs: u64,
    /// Wei amount of each tranche, in release order
    pub tranche_amounts: Vec<Wei>,
    /// Advisory per-tranche vote counts published by the owner. Release
    /// is gated by the payment threshold policy, not by this list.
    pub tranche_vote_requirements: Vec<u64>,
    /// Weighted yes tally. Only ever grows.
    pub yes_weight: TokenAmount,
    /// Set once by the owner after the proposal is funded
    pub reserved: bool,
    /// Payment voting and release state
    pub tranches: TrancheState,
    acted: HashMap<Address, ActionRecord>,
}

impl Proposal {
    fn new(
        id: u64,
        owner: Address,
        locator: String,
        lifetime_secs: u64,
        tranche_amounts: Vec<Wei>,
        tranche_vote_requirements: Vec<u64>,
    ) -> Self {
        Self {
            id,
            owner,
            locator,
            lifetime_secs,
            tranche_amounts,
            tranche_vote_requirements,
            yes_weight: 0,
            reserved: false,
            tranches: TrancheState::new(),
            acted: HashMap::new(),
        }
    }

    /// Whether this member has voted or delegated here.
    pub fn has_acted(&self, address: &Address) -> bool {
        self.acted.contains_key(address)
    }

    pub fn action_of(&self, address: &Address) -> Option<&ActionRecord> {
        self.acted.get(address)
    }

    /// Record a direct vote. `weight` is everything the voter spends in
    /// this step: their own balance plus any delegated weight settled at
    /// the same moment. A "no" consumes the action and contributes zero.
    pub fn record_vote(
        &mut self,
        voter: Address,
        support: bool,
        weight: TokenAmount,
    ) -> Result<(), GovernanceError> {
        if self.acted.contains_key(&voter) {
            return Err(GovernanceError::AlreadyActed);
        }

        if support {
            self.yes_weight += weight;
        }
        self.acted.insert(voter, ActionRecord { action: Action::Voted { support }, weight });
        Ok(())
    }

    /// Record a delegation as the delegator's consumed action. The
    /// tally is not touched here; settlement is the caller's decision.
    pub fn record_delegation(
        &mut self,
        from: Address,
        to: Address,
        weight: TokenAmount,
    ) -> Result<(), GovernanceError> {
        if self.acted.contains_key(&from) {
            return Err(GovernanceError::AlreadyActed);
        }

        self.acted.insert(from, ActionRecord { action: Action::Delegated { to }, weight });
        Ok(())
    }

    /// Whether the yes tally clears the given funding threshold.
    pub fn is_funded(&self, funding_threshold: u64) -> bool {
        self.yes_weight >= funding_threshold
    }

    /// Wei amount of the tranche currently open, zero once all tranches
    /// are withdrawn.
    pub fn next_payment(&self) -> Wei {
        self.tranche_amounts.get(self.tranches.current()).copied().unwrap_or(0)
    }

    /// All tranches withdrawn; the proposal is read-only from here on.
    pub fn is_terminal(&self) -> bool {
        self.tranches.current() >= self.tranche_amounts.len()
    }
}

/// Check a tranche schedule before any value moves.
pub fn validate_schedule(
    tranche_amounts: &[Wei],
    tranche_vote_requirements: &[u64],
) -> Result<(), GovernanceError> {
    if tranche_amounts.is_empty() {
        return Err(GovernanceError::InvalidSchedule("at least one tranche is required"));
    }
    if tranche_amounts.len() != tranche_vote_requirements.len() {
        return Err(GovernanceError::InvalidSchedule(
            "tranche amounts and vote requirements must have the same length",
        ));
    }
    if tranche_amounts.contains(&0) {
        return Err(GovernanceError::InvalidSchedule("tranche amounts must be non-zero"));
    }
    Ok(())
}

/// Registry owning all proposal records.
#[derive(Debug, Default)]
pub struct ProposalRegistry {
    proposals: HashMap<u64, Proposal>,
    next_id: u64,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self { proposals: HashMap::new(), next_id: 1 }
    }

    /// Append a new proposal with the next sequential id. The schedule
    /// must have been validated already.
    pub fn submit(
        &mut self,
        owner: Address,
        locator: String,
        lifetime_secs: u64,
        tranche_amounts: Vec<Wei>,
        tranche_vote_requirements: Vec<u64>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let proposal =
            Proposal::new(id, owner, locator, lifetime_secs, tranche_amounts, tranche_vote_requirements);
        self.proposals.insert(id, proposal);
        id
    }

    pub fn get(&self, id: u64) -> Result<&Proposal, GovernanceError> {
        self.proposals.get(&id).ok_or(GovernanceError::ProposalNotFound(id))
    }

    pub fn get_mut(&mut self, id: u64) -> Result<&mut Proposal, GovernanceError> {
        self.proposals.get_mut(&id).ok_or(GovernanceError::ProposalNotFound(id))
    }

    /// Number of proposals ever submitted.
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }
}
