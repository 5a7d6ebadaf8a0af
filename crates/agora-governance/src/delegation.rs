//! Per-proposal vote delegation with cascading settlement.
//!
//! A delegation hands the delegator's weight to another member for one
//! proposal only. The weight is captured when the edge is created and
//! stays "pending" until the delegate spends it by voting; pending
//! weight is visible through weight queries but never inflates the
//! proposal tally on its own.

use std::collections::HashMap;

use agora_types::{Address, TokenAmount};

use crate::error::GovernanceError;

/// A delegation edge scoped to a single proposal. Immutable once
/// created: there is no re-delegation and no revocation.
#[derive(Debug, Clone, Copy)]
pub struct Delegation {
    pub delegator: Address,
    pub delegate: Address,
    /// Delegator's weight at the moment of delegation
    pub weight: TokenAmount,
    /// True once a vote has spent (or a "no" vote consumed) this weight
    pub settled: bool,
}

/// Owns every delegation edge, keyed by proposal.
#[derive(Debug, Default)]
pub struct DelegationBook {
    /// (proposal, delegator) -> edge
    edges: HashMap<(u64, Address), Delegation>,
    /// (proposal, delegate) -> delegators, reverse lookup
    incoming: HashMap<(u64, Address), Vec<Address>>,
}

impl DelegationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this address has an outgoing edge on this proposal.
    pub fn has_delegated(&self, proposal: u64, address: &Address) -> bool {
        self.edges.contains_key(&(proposal, *address))
    }

    pub fn get(&self, proposal: u64, delegator: &Address) -> Option<&Delegation> {
        self.edges.get(&(proposal, *delegator))
    }

    /// Record an edge. At most one outgoing edge per (member, proposal);
    /// self-edges are rejected here as a last line even though the
    /// facade validates first.
    pub fn record(
        &mut self,
        proposal: u64,
        from: Address,
        to: Address,
        weight: TokenAmount,
    ) -> Result<(), GovernanceError> {
        if from == to {
            return Err(GovernanceError::SelfDelegationNotAllowed);
        }
        if self.edges.contains_key(&(proposal, from)) {
            return Err(GovernanceError::AlreadyActed);
        }

        self.edges.insert(
            (proposal, from),
            Delegation { delegator: from, delegate: to, weight, settled: false },
        );
        self.incoming.entry((proposal, to)).or_default().push(from);
        Ok(())
    }

    /// Sum of weights delegated to `to` on this proposal that no vote
    /// has spent yet.
    pub fn pending_incoming(&self, proposal: u64, to: &Address) -> TokenAmount {
        let Some(delegators) = self.incoming.get(&(proposal, *to)) else {
            return 0;
        };
        delegators
            .iter()
            .filter_map(|d| self.edges.get(&(proposal, *d)))
            .filter(|edge| !edge.settled)
            .map(|edge| edge.weight)
            .sum()
    }

    /// Mark every pending edge into `to` as settled and return their
    /// total weight. Called exactly when `to` spends its action, so the
    /// same weight can never be spent twice.
    pub fn settle_incoming(&mut self, proposal: u64, to: &Address) -> TokenAmount {
        let Some(delegators) = self.incoming.get(&(proposal, *to)) else {
            return 0;
        };

        let delegators = delegators.clone();
        let mut total = 0;
        for delegator in delegators {
            if let Some(edge) = self.edges.get_mut(&(proposal, delegator)) {
                if !edge.settled {
                    edge.settled = true;
                    total += edge.weight;
                }
            }
        }
        total
    }

    /// Mark a single edge settled: used when the delegate had already
    /// voted and the new weight cascades into the tally immediately.
    pub fn settle_edge(&mut self, proposal: u64, delegator: &Address) {
        if let Some(edge) = self.edges.get_mut(&(proposal, *delegator)) {
            edge.settled = true;
        }
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
    fn test_record_and_lookup() {
        let mut book = DelegationBook::new();

        book.record(1, addr(1), addr(2), 5).unwrap();
        assert!(book.has_delegated(1, &addr(1)));
        assert!(!book.has_delegated(2, &addr(1)));

        let edge = book.get(1, &addr(1)).unwrap();
        assert_eq!(edge.delegate, addr(2));
        assert_eq!(edge.weight, 5);
        assert!(!edge.settled);
    }

    #[test]
    fn test_self_delegation_rejected() {
        let mut book = DelegationBook::new();
        let err = book.record(1, addr(1), addr(1), 5).unwrap_err();
        assert_eq!(err, GovernanceError::SelfDelegationNotAllowed);
    }

    #[test]
    fn test_one_outgoing_edge_per_proposal() {
        let mut book = DelegationBook::new();
        book.record(1, addr(1), addr(2), 5).unwrap();

        // No re-delegation, not even to the same target
        assert_eq!(book.record(1, addr(1), addr(3), 5), Err(GovernanceError::AlreadyActed));
        assert_eq!(book.record(1, addr(1), addr(2), 5), Err(GovernanceError::AlreadyActed));

        // A different proposal is a fresh scope
        book.record(2, addr(1), addr(3), 5).unwrap();
    }

    #[test]
    fn test_pending_incoming_sums_unsettled() {
        let mut book = DelegationBook::new();
        book.record(1, addr(1), addr(9), 5).unwrap();
        book.record(1, addr(2), addr(9), 3).unwrap();
        book.record(2, addr(3), addr(9), 100).unwrap();

        assert_eq!(book.pending_incoming(1, &addr(9)), 8);
        assert_eq!(book.pending_incoming(2, &addr(9)), 100);
        assert_eq!(book.pending_incoming(1, &addr(1)), 0);
    }

    #[test]
    fn test_settle_incoming_spends_once() {
        let mut book = DelegationBook::new();
        book.record(1, addr(1), addr(9), 5).unwrap();
        book.record(1, addr(2), addr(9), 3).unwrap();

        assert_eq!(book.settle_incoming(1, &addr(9)), 8);
        assert_eq!(book.pending_incoming(1, &addr(9)), 0);

        // A second settlement finds nothing to spend
        assert_eq!(book.settle_incoming(1, &addr(9)), 0);
    }

    #[test]
    fn test_settle_edge() {
        let mut book = DelegationBook::new();
        book.record(1, addr(1), addr(9), 5).unwrap();
        book.record(1, addr(2), addr(9), 3).unwrap();

        book.settle_edge(1, &addr(1));
        assert_eq!(book.pending_incoming(1, &addr(9)), 3);
        assert_eq!(book.settle_incoming(1, &addr(9)), 3);
    }
}
