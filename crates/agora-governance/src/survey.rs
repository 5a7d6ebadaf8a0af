//! Member surveys: create, answer, tally.
//!
//! Structurally independent of proposal voting: no weights, no
//! delegation, just one validated response per member.

use std::collections::{HashMap, HashSet};

use agora_types::Address;

use crate::error::GovernanceError;

/// A survey with a fixed choice schema. A response is an ordered list
/// of distinct choice indices, at most `max_choices` long.
#[derive(Debug, Clone)]
pub struct Survey {
    /// Sequential id starting at 1
    pub id: u64,
    pub owner: Address,
    /// Opaque content locator, e.g. an IPFS hash
    pub locator: String,
    /// Requested lifetime in seconds; published, not enforced
    pub lifetime_secs: u64,
    /// Number of choices on offer
    pub num_choices: u32,
    /// Maximum choices one response may select
    pub max_choices: u32,
    tallies: Vec<u64>,
    takers: HashSet<Address>,
}

impl Survey {
    /// Times each choice has been selected, indexed by choice.
    pub fn results(&self) -> &[u64] {
        &self.tallies
    }

    pub fn has_taken(&self, address: &Address) -> bool {
        self.takers.contains(address)
    }

    /// Number of responses recorded.
    pub fn taker_count(&self) -> u64 {
        self.takers.len() as u64
    }

    /// Record one response. Validation happens before any tally moves,
    /// so a rejected response has zero effect.
    pub fn take(&mut self, taker: Address, choices: &[u32]) -> Result<(), GovernanceError> {
        if self.takers.contains(&taker) {
            return Err(GovernanceError::AlreadyActed);
        }
        if choices.len() > self.max_choices as usize {
            return Err(GovernanceError::InvalidSurveyResponse("too many choices selected"));
        }
        let mut seen = HashSet::new();
        for &choice in choices {
            if choice >= self.num_choices {
                return Err(GovernanceError::InvalidSurveyResponse("choice index out of range"));
            }
            if !seen.insert(choice) {
                return Err(GovernanceError::InvalidSurveyResponse("duplicate choice"));
            }
        }

        for &choice in choices {
            self.tallies[choice as usize] += 1;
        }
        self.takers.insert(taker);
        Ok(())
    }
}

/// Registry owning all surveys.
#[derive(Debug, Default)]
pub struct SurveyRegistry {
    surveys: HashMap<u64, Survey>,
    next_id: u64,
}

impl SurveyRegistry {
    pub fn new() -> Self {
        Self { surveys: HashMap::new(), next_id: 1 }
    }

    /// Create a survey with the next sequential id.
    pub fn submit(
        &mut self,
        owner: Address,
        locator: String,
        lifetime_secs: u64,
        num_choices: u32,
        max_choices: u32,
    ) -> Result<u64, GovernanceError> {
        if num_choices == 0 {
            return Err(GovernanceError::InvalidSchedule("survey must offer at least one choice"));
        }
        if max_choices == 0 {
            return Err(GovernanceError::InvalidSchedule("response budget must be at least one"));
        }

        let id = self.next_id;
        self.next_id += 1;

        self.surveys.insert(
            id,
            Survey {
                id,
                owner,
                locator,
                lifetime_secs,
                num_choices,
                max_choices,
                tallies: vec![0; num_choices as usize],
                takers: HashSet::new(),
            },
        );
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Result<&Survey, GovernanceError> {
        self.surveys.get(&id).ok_or(GovernanceError::SurveyNotFound(id))
    }

    pub fn get_mut(&mut self, id: u64) -> Result<&mut Survey, GovernanceError> {
        self.surveys.get_mut(&id).ok_or(GovernanceError::SurveyNotFound(id))
    }

    /// Number of surveys ever submitted.
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }
}
