//! Per-tranche payment voting and release tracking.
//!
//! Unlike proposal voting, payment voting is one-member-one-vote: the
//! funding decision already weighed token holdings, the release vote
//! only confirms the project is still worth paying.

use std::collections::HashSet;

use agora_types::{Address, Wei};

use crate::error::GovernanceError;

/// Payment state of one proposal: which tranche is open, its running
/// tally, and how much wei has been released so far.
///
/// The tally and voter set belong to the open tranche only; both reset
/// when the tranche is paid out and the index advances. The index never
/// decreases and never exceeds the number of scheduled tranches.
#[derive(Debug, Clone, Default)]
pub struct TrancheState {
    current: usize,
    yes_votes: u64,
    voters: HashSet<Address>,
    released: Wei,
}

impl TrancheState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the tranche currently open for voting and release.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Yes votes on the open tranche.
    pub fn yes_votes(&self) -> u64 {
        self.yes_votes
    }

    /// Total wei released across all completed tranches.
    pub fn released(&self) -> Wei {
        self.released
    }

    /// Whether this member already voted on the open tranche.
    pub fn has_voted(&self, voter: &Address) -> bool {
        self.voters.contains(voter)
    }

    /// Cast one vote on the open tranche. A "no" consumes the vote
    /// right without moving the tally.
    pub fn cast_vote(&mut self, voter: Address, support: bool) -> Result<(), GovernanceError> {
        if !self.voters.insert(voter) {
            return Err(GovernanceError::AlreadyActed);
        }
        if support {
            self.yes_votes += 1;
        }
        Ok(())
    }

    /// Close the open tranche after paying out `amount`: advance the
    /// index and reset the tally and voter set for the next tranche.
    pub fn advance(&mut self, amount: Wei) {
        self.current += 1;
        self.yes_votes = 0;
        self.voters.clear();
        self.released += amount;
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
    fn test_vote_once_per_tranche() {
        let mut state = TrancheState::new();

        state.cast_vote(addr(1), true).unwrap();
        assert_eq!(state.yes_votes(), 1);
        assert!(state.has_voted(&addr(1)));

        let err = state.cast_vote(addr(1), true).unwrap_err();
        assert_eq!(err, GovernanceError::AlreadyActed);
        assert_eq!(state.yes_votes(), 1);
    }

    #[test]
    fn test_no_vote_counts_nothing() {
        let mut state = TrancheState::new();

        state.cast_vote(addr(1), false).unwrap();
        assert_eq!(state.yes_votes(), 0);

        // The action is still consumed
        assert_eq!(state.cast_vote(addr(1), true), Err(GovernanceError::AlreadyActed));
    }

    #[test]
    fn test_votes_are_unweighted() {
        let mut state = TrancheState::new();

        for n in 1..=5 {
            state.cast_vote(addr(n), true).unwrap();
        }
        assert_eq!(state.yes_votes(), 5);
    }

    #[test]
    fn test_advance_resets_tally() {
        let mut state = TrancheState::new();
        state.cast_vote(addr(1), true).unwrap();
        state.cast_vote(addr(2), true).unwrap();

        state.advance(100);

        assert_eq!(state.current(), 1);
        assert_eq!(state.yes_votes(), 0);
        assert_eq!(state.released(), 100);

        // Same member may vote again on the next tranche
        state.cast_vote(addr(1), true).unwrap();
        assert_eq!(state.yes_votes(), 1);

        state.advance(250);
        assert_eq!(state.current(), 2);
        assert_eq!(state.released(), 350);
    }
}
