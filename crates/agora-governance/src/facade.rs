//! The public governance surface.
//!
//! `Governance` composes the membership oracle, proposal ledger,
//! delegation book, tranche state and survey registry behind one mutex:
//! every operation runs to completion or aborts entirely before the
//! next one is admitted, so no caller ever observes partial state.
//!
//! On every path that moves funds, internal bookkeeping is updated
//! before the outbound transfer is issued.

use parking_lot::Mutex;

use agora_ledger::{EtherTreasury, Faucet, Ledger, TokenLedger, Treasury};
use agora_types::{Address, TokenAmount, Wei};

use crate::config::GovConfig;
use crate::delegation::DelegationBook;
use crate::error::GovernanceError;
use crate::membership::MembershipOracle;
use crate::policy::{DefaultThresholds, ThresholdPolicy};
use crate::proposal::{validate_schedule, Action, ProposalRegistry};
use crate::survey::SurveyRegistry;

/// Read-only view of a proposal's published fields.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub owner: Address,
    pub locator: String,
    pub lifetime_secs: u64,
    pub tranche_amounts: Vec<Wei>,
    pub tranche_vote_requirements: Vec<u64>,
}

/// Read-only view of a survey's published fields.
#[derive(Debug, Clone)]
pub struct SurveyInfo {
    pub owner: Address,
    pub locator: String,
    pub lifetime_secs: u64,
    pub num_choices: u32,
    pub max_choices: u32,
}

struct GovState {
    ledger: Box<dyn Ledger>,
    treasury: Box<dyn Treasury>,
    faucet: Faucet,
    /// Community pool account holding the undistributed token supply
    /// and receiving all token fees
    pool: Address,
    policy: Box<dyn ThresholdPolicy>,
    config: GovConfig,
    proposals: ProposalRegistry,
    delegations: DelegationBook,
    surveys: SurveyRegistry,
}

impl GovState {
    fn members(&self) -> MembershipOracle<'_> {
        MembershipOracle::new(&self.faucet, self.ledger.as_ref())
    }

    fn require_member(&self, address: &Address) -> Result<(), GovernanceError> {
        self.members().require_member(address)
    }

    fn weight_of(&self, address: &Address) -> TokenAmount {
        self.members().weight_of(address)
    }

    fn funding_threshold(&self) -> u64 {
        self.policy.funding_threshold(self.faucet.member_count())
    }

    fn payment_threshold(&self) -> u64 {
        self.policy.payment_threshold(self.faucet.member_count())
    }
}

/// Member-governed treasury: proposals, delegable weighted voting,
/// tranche-gated payouts, surveys.
pub struct Governance {
    state: Mutex<GovState>,
}

impl Governance {
    /// Assemble a governance engine over injected collaborators.
    pub fn new(
        ledger: Box<dyn Ledger>,
        treasury: Box<dyn Treasury>,
        pool: Address,
        policy: Box<dyn ThresholdPolicy>,
        config: GovConfig,
    ) -> Self {
        Self {
            state: Mutex::new(GovState {
                ledger,
                treasury,
                faucet: Faucet::new(),
                pool,
                policy,
                config,
                proposals: ProposalRegistry::new(),
                delegations: DelegationBook::new(),
                surveys: SurveyRegistry::new(),
            }),
        }
    }

    /// In-memory deployment with the full token supply minted to the
    /// pool and default fees and thresholds.
    pub fn in_memory(pool: Address, supply: TokenAmount) -> Self {
        Self::new(
            Box::new(TokenLedger::with_supply(pool, supply)),
            Box::new(EtherTreasury::new()),
            pool,
            Box::new(DefaultThresholds),
            GovConfig::default(),
        )
    }

    // ---- membership & faucet ------------------------------------------------

    /// One-time faucet claim; this is what makes the caller a member.
    pub fn claim_faucet(&self, caller: Address) -> Result<(), GovernanceError> {
        let mut guard = self.state.lock();
        let st = &mut *guard;

        let grant = st.config.faucet_grant;
        let pool_balance = st.ledger.balance_of(&st.pool);
        if pool_balance < grant {
            return Err(GovernanceError::InsufficientBalance(format!(
                "faucet pool holds {pool_balance} tokens, grant is {grant}"
            )));
        }

        st.faucet.claim(caller)?;
        let pool = st.pool;
        st.ledger.transfer(pool, caller, grant)?;

        tracing::info!("Member joined: {}", caller);
        Ok(())
    }

    /// Bootstrap helper: top up an account from the pool.
    pub fn grant_tokens(&self, to: Address, amount: TokenAmount) -> Result<(), GovernanceError> {
        let mut guard = self.state.lock();
        let st = &mut *guard;

        let pool = st.pool;
        st.ledger.transfer(pool, to, amount)?;
        Ok(())
    }

    /// Give tokens back to the community pool.
    pub fn donate_tokens(&self, caller: Address, amount: TokenAmount) -> Result<(), GovernanceError> {
        let mut guard = self.state.lock();
        let st = &mut *guard;

        let pool = st.pool;
        st.ledger.transfer(caller, pool, amount)?;
        Ok(())
    }

    /// Give ether to the shared treasury.
    pub fn donate_ether(&self, caller: Address, amount: Wei) {
        let mut guard = self.state.lock();
        guard.treasury.deposit(caller, amount);
    }

    pub fn member_count(&self) -> u64 {
        self.state.lock().faucet.member_count()
    }

    pub fn is_member(&self, address: &Address) -> bool {
        self.state.lock().members().is_member(address)
    }

    pub fn balance_of(&self, address: &Address) -> TokenAmount {
        self.state.lock().ledger.balance_of(address)
    }

    pub fn treasury_balance(&self) -> Wei {
        self.state.lock().treasury.balance()
    }

    // ---- proposals ----------------------------------------------------------

    /// Submit a funding proposal. Debits the fixed token fee and the
    /// exactly-matching wei fee, then appends the proposal with the next
    /// sequential id.
    pub fn submit_project_proposal(
        &self,
        caller: Address,
        locator: String,
        lifetime_secs: u64,
        tranche_amounts: Vec<Wei>,
        tranche_vote_requirements: Vec<u64>,
        attached_wei: Wei,
    ) -> Result<u64, GovernanceError> {
        let mut guard = self.state.lock();
        let st = &mut *guard;

        st.require_member(&caller)?;
        if attached_wei != st.config.proposal_wei_fee {
            return Err(GovernanceError::InvalidPayment {
                expected: st.config.proposal_wei_fee,
                got: attached_wei,
            });
        }
        validate_schedule(&tranche_amounts, &tranche_vote_requirements)?;

        let fee = st.config.proposal_token_fee;
        let available = st.ledger.balance_of(&caller);
        if available < fee {
            return Err(GovernanceError::InsufficientBalance(format!(
                "proposal fee is {fee} tokens, caller holds {available}"
            )));
        }

        // All checks passed; value moves, then the record is appended.
        let pool = st.pool;
        st.ledger.transfer(caller, pool, fee)?;
        st.treasury.deposit(caller, attached_wei);

        let id = st.proposals.submit(
            caller,
            locator,
            lifetime_secs,
            tranche_amounts,
            tranche_vote_requirements,
        );

        tracing::info!("Proposal #{} submitted by {}", id, caller);
        Ok(id)
    }

    /// Number of proposals ever submitted.
    pub fn project_proposal_count(&self) -> u64 {
        self.state.lock().proposals.count()
    }

    /// Cast a weighted vote. A yes spends the voter's balance plus any
    /// delegated weight pending for them, all in one step; a no consumes
    /// the action (and the pending weight) without moving the tally.
    pub fn vote_for_project_proposal(
        &self,
        caller: Address,
        proposal_id: u64,
        support: bool,
    ) -> Result<(), GovernanceError> {
        let mut guard = self.state.lock();
        let st = &mut *guard;

        st.require_member(&caller)?;
        let proposal = st.proposals.get(proposal_id)?;
        if proposal.has_acted(&caller) {
            return Err(GovernanceError::AlreadyActed);
        }

        let own = st.weight_of(&caller);
        let pending = st.delegations.settle_incoming(proposal_id, &caller);
        st.proposals.get_mut(proposal_id)?.record_vote(caller, support, own + pending)?;
        Ok(())
    }

    /// Delegate the caller's vote on one proposal. If the delegate has
    /// already voted yes, the delegated weight cascades into the tally
    /// immediately; otherwise it stays pending until the delegate votes.
    pub fn delegate_vote_to(
        &self,
        caller: Address,
        delegate: Address,
        proposal_id: u64,
    ) -> Result<(), GovernanceError> {
        let mut guard = self.state.lock();
        let st = &mut *guard;

        if !st.members().is_member(&caller) {
            return Err(GovernanceError::NotAMember(caller));
        }
        if !st.members().is_member(&delegate) {
            return Err(GovernanceError::NotAMember(delegate));
        }
        if caller == delegate {
            return Err(GovernanceError::SelfDelegationNotAllowed);
        }

        let proposal = st.proposals.get(proposal_id)?;
        if proposal.has_acted(&caller) {
            return Err(GovernanceError::AlreadyActed);
        }
        // One hop only: whoever already delegated cannot receive.
        let delegate_action = proposal.action_of(&delegate).map(|record| record.action);
        if matches!(delegate_action, Some(Action::Delegated { .. })) {
            return Err(GovernanceError::DelegationDepthExceeded);
        }

        let weight = st.weight_of(&caller);
        st.delegations.record(proposal_id, caller, delegate, weight)?;
        st.proposals.get_mut(proposal_id)?.record_delegation(caller, delegate, weight)?;

        // Cascading settlement: honor a delegate's prior yes for the
        // newly arrived weight.
        if let Some(Action::Voted { support }) = delegate_action {
            st.delegations.settle_edge(proposal_id, &caller);
            if support {
                st.proposals.get_mut(proposal_id)?.yes_weight += weight;
            }
        }
        Ok(())
    }

    /// Effective vote weight: own balance plus all unsettled weight
    /// delegated in for this proposal.
    pub fn vote_weight(&self, address: &Address, proposal_id: u64) -> Result<TokenAmount, GovernanceError> {
        let guard = self.state.lock();

        guard.proposals.get(proposal_id)?;
        Ok(guard.weight_of(address) + guard.delegations.pending_incoming(proposal_id, address))
    }

    pub fn is_project_funded(&self, proposal_id: u64) -> Result<bool, GovernanceError> {
        let guard = self.state.lock();
        let threshold = guard.funding_threshold();
        Ok(guard.proposals.get(proposal_id)?.is_funded(threshold))
    }

    /// Owner-only, exactly-once: mark a funded proposal's grant as
    /// reserved, unlocking payment voting.
    pub fn reserve_project_grant(&self, caller: Address, proposal_id: u64) -> Result<(), GovernanceError> {
        let mut guard = self.state.lock();
        let st = &mut *guard;

        let threshold = st.funding_threshold();
        let proposal = st.proposals.get_mut(proposal_id)?;
        if proposal.owner != caller {
            return Err(GovernanceError::NotAuthorized("only the project owner can reserve the grant"));
        }
        if !proposal.is_funded(threshold) {
            return Err(GovernanceError::NotFunded);
        }
        if proposal.reserved {
            return Err(GovernanceError::AlreadyReserved);
        }

        proposal.reserved = true;
        tracing::info!("Grant reserved for proposal #{}", proposal_id);
        Ok(())
    }

    // ---- tranche payments ---------------------------------------------------

    /// One-member-one-vote on the current tranche of a funded, reserved
    /// proposal.
    pub fn vote_for_project_payment(
        &self,
        caller: Address,
        proposal_id: u64,
        support: bool,
    ) -> Result<(), GovernanceError> {
        let mut guard = self.state.lock();
        let st = &mut *guard;

        st.require_member(&caller)?;
        let threshold = st.funding_threshold();
        let proposal = st.proposals.get_mut(proposal_id)?;
        if !proposal.is_funded(threshold) || !proposal.reserved {
            return Err(GovernanceError::NotReadyForPayment);
        }
        if proposal.is_terminal() {
            return Err(GovernanceError::NoTranchesRemaining);
        }

        proposal.tranches.cast_vote(caller, support)
    }

    /// Yes-vote count on the proposal's current tranche.
    pub fn current_payment_vote(&self, proposal_id: u64) -> Result<u64, GovernanceError> {
        let guard = self.state.lock();
        Ok(guard.proposals.get(proposal_id)?.tranches.yes_votes())
    }

    /// Owner-only: release the current tranche once its vote clears the
    /// payment threshold. Advances the tranche index and resets the
    /// tally before the funds leave the treasury.
    pub fn withdraw_project_payment(&self, caller: Address, proposal_id: u64) -> Result<Wei, GovernanceError> {
        let mut guard = self.state.lock();
        let st = &mut *guard;

        let needed = st.payment_threshold();
        let treasury_balance = st.treasury.balance();

        let proposal = st.proposals.get_mut(proposal_id)?;
        if proposal.owner != caller {
            return Err(GovernanceError::NotAuthorized("only the project owner can withdraw"));
        }
        if !proposal.reserved {
            return Err(GovernanceError::NotReadyForPayment);
        }
        let amount = match proposal.tranche_amounts.get(proposal.tranches.current()) {
            Some(&amount) => amount,
            None => return Err(GovernanceError::NoTranchesRemaining),
        };
        if proposal.tranches.yes_votes() < needed {
            return Err(GovernanceError::NotReadyForPayment);
        }
        if treasury_balance < amount {
            return Err(GovernanceError::InsufficientBalance(format!(
                "treasury holds {treasury_balance} wei, tranche is {amount}"
            )));
        }

        // Bookkeeping strictly before the outbound transfer.
        proposal.tranches.advance(amount);
        let owner = proposal.owner;
        st.treasury.release(owner, amount)?;

        tracing::info!("Released {} wei for proposal #{} tranche", amount, proposal_id);
        Ok(amount)
    }

    // ---- proposal read surface ----------------------------------------------

    pub fn project_info(&self, proposal_id: u64) -> Result<ProjectInfo, GovernanceError> {
        let guard = self.state.lock();
        let proposal = guard.proposals.get(proposal_id)?;
        Ok(ProjectInfo {
            owner: proposal.owner,
            locator: proposal.locator.clone(),
            lifetime_secs: proposal.lifetime_secs,
            tranche_amounts: proposal.tranche_amounts.clone(),
            tranche_vote_requirements: proposal.tranche_vote_requirements.clone(),
        })
    }

    pub fn project_owner(&self, proposal_id: u64) -> Result<Address, GovernanceError> {
        Ok(self.state.lock().proposals.get(proposal_id)?.owner)
    }

    /// Wei amount of the next tranche, zero once all are withdrawn.
    pub fn project_next_payment(&self, proposal_id: u64) -> Result<Wei, GovernanceError> {
        Ok(self.state.lock().proposals.get(proposal_id)?.next_payment())
    }

    /// Number of proposals currently clearing the funding threshold.
    pub fn funded_project_count(&self) -> u64 {
        let guard = self.state.lock();
        let threshold = guard.funding_threshold();
        guard.proposals.iter().filter(|p| p.is_funded(threshold)).count() as u64
    }

    /// Total wei this project has withdrawn so far.
    pub fn ether_received_by_project(&self, proposal_id: u64) -> Result<Wei, GovernanceError> {
        Ok(self.state.lock().proposals.get(proposal_id)?.tranches.released())
    }

    // ---- surveys ------------------------------------------------------------

    /// Submit a survey. Debits the fixed token fee and the
    /// exactly-matching wei fee.
    pub fn submit_survey(
        &self,
        caller: Address,
        locator: String,
        lifetime_secs: u64,
        num_choices: u32,
        max_choices: u32,
        attached_wei: Wei,
    ) -> Result<u64, GovernanceError> {
        let mut guard = self.state.lock();
        let st = &mut *guard;

        st.require_member(&caller)?;
        if attached_wei != st.config.survey_wei_fee {
            return Err(GovernanceError::InvalidPayment {
                expected: st.config.survey_wei_fee,
                got: attached_wei,
            });
        }
        if num_choices == 0 || max_choices == 0 {
            return Err(GovernanceError::InvalidSchedule("survey must offer at least one choice"));
        }

        let fee = st.config.survey_token_fee;
        let available = st.ledger.balance_of(&caller);
        if available < fee {
            return Err(GovernanceError::InsufficientBalance(format!(
                "survey fee is {fee} tokens, caller holds {available}"
            )));
        }

        let pool = st.pool;
        st.ledger.transfer(caller, pool, fee)?;
        st.treasury.deposit(caller, attached_wei);

        let id = st.surveys.submit(caller, locator, lifetime_secs, num_choices, max_choices)?;

        tracing::info!("Survey #{} submitted by {}", id, caller);
        Ok(id)
    }

    /// Record one validated response per member.
    pub fn take_survey(&self, caller: Address, survey_id: u64, choices: &[u32]) -> Result<(), GovernanceError> {
        let mut guard = self.state.lock();
        let st = &mut *guard;

        st.require_member(&caller)?;
        st.surveys.get_mut(survey_id)?.take(caller, choices)
    }

    /// Times each choice has been selected, indexed by choice.
    pub fn survey_results(&self, survey_id: u64) -> Result<Vec<u64>, GovernanceError> {
        Ok(self.state.lock().surveys.get(survey_id)?.results().to_vec())
    }

    pub fn survey_info(&self, survey_id: u64) -> Result<SurveyInfo, GovernanceError> {
        let guard = self.state.lock();
        let survey = guard.surveys.get(survey_id)?;
        Ok(SurveyInfo {
            owner: survey.owner,
            locator: survey.locator.clone(),
            lifetime_secs: survey.lifetime_secs,
            num_choices: survey.num_choices,
            max_choices: survey.max_choices,
        })
    }

    pub fn survey_owner(&self, survey_id: u64) -> Result<Address, GovernanceError> {
        Ok(self.state.lock().surveys.get(survey_id)?.owner)
    }

    pub fn survey_count(&self) -> u64 {
        self.state.lock().surveys.count()
    }

    pub fn has_taken_survey(&self, address: &Address, survey_id: u64) -> Result<bool, GovernanceError> {
        Ok(self.state.lock().surveys.get(survey_id)?.has_taken(address))
    }
}
