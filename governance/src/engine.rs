//! The governance engine: every DAO operation against persisted records.
//!
//! Each operation reads `now` once, loads the records it needs, runs every
//! check, then commits all of its record changes in a single [`WriteBatch`].
//! Events are published only after that commit succeeds. Outbound transfers
//! (withdrawals, refunds, the custody opt-in) are returned to the caller, who
//! must place them in the same atomic group as the call.
//!
//! Group layout: index 0 is always the application call to this DAO and its
//! sender is the acting account. Companion transfers follow at index 1.

use crate::call::DaoCall;
use crate::config::GovernanceConfig;
use crate::deposit::DepositLedger;
use crate::error::GovernanceError;
use crate::events::{EventSink, GovernanceEvent};
use crate::execution::ExecutionGate;
use crate::params::DaoParams;
use crate::proposal::{proposal_id, Proposal, ProposalConfig, ProposalRef};
use crate::records::{RecordStore, StageRecords};
use crate::result::{evaluate, is_active, ProposalResult};
use crate::transfer::{AmountRule, ExpectedTransfer, GroupInspector, TransferVerifier};
use crate::voter::VoterAccount;
use crate::voting::{VoteChoice, VotingLedger};
use civitas_store::{GovernanceStore, MetaStore, WriteBatch};
use civitas_transactions::{basic_checks, AppCall, OnComplete, Transaction, TransactionGroup};
use civitas_types::{Address, AppId, Clock, Timestamp};
use civitas_utils::format_window;

/// Position of the companion deposit transfer.
const DEPOSIT_INDEX: usize = 1;

pub struct GovernanceEngine<S, C> {
    app_id: AppId,
    custody: Address,
    params: DaoParams,
    records: RecordStore<S>,
    clock: C,
    verifier: Box<dyn TransferVerifier>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl<S: GovernanceStore + MetaStore, C: Clock> GovernanceEngine<S, C> {
    /// Create a DAO: validate the parameters and persist them in `store`.
    pub fn initialize(
        config: &GovernanceConfig,
        store: S,
        clock: C,
    ) -> Result<Self, GovernanceError> {
        config.validate()?;
        let records = RecordStore::new(store);
        records.put_params(&config.params)?;
        tracing::info!(
            app = %config.app_id,
            dao = %config.params.dao_name,
            deposit = config.params.deposit,
            min_support = config.params.min_support,
            "DAO initialized"
        );
        Ok(Self::with_parts(
            config.app_id,
            config.custody,
            config.params.clone(),
            records,
            clock,
        ))
    }

    /// Reopen a DAO previously initialized in `store`.
    pub fn open(
        app_id: AppId,
        custody: Address,
        store: S,
        clock: C,
    ) -> Result<Self, GovernanceError> {
        let records = RecordStore::new(store);
        let params = records.params()?.ok_or(GovernanceError::NotInitialized)?;
        params.validate()?;
        tracing::debug!(app = %app_id, dao = %params.dao_name, "DAO reopened");
        Ok(Self::with_parts(app_id, custody, params, records, clock))
    }

    fn with_parts(
        app_id: AppId,
        custody: Address,
        params: DaoParams,
        records: RecordStore<S>,
        clock: C,
    ) -> Self {
        Self {
            app_id,
            custody,
            params,
            records,
            clock,
            verifier: Box::new(GroupInspector),
            sinks: Vec::new(),
        }
    }

    /// Replace the default [`GroupInspector`].
    pub fn with_verifier(mut self, verifier: impl TransferVerifier + 'static) -> Self {
        self.verifier = Box::new(verifier);
        self
    }

    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn app_id(&self) -> AppId {
        self.app_id
    }

    pub fn custody(&self) -> Address {
        self.custody
    }

    pub fn params(&self) -> &DaoParams {
        &self.params
    }

    pub fn store(&self) -> &S {
        self.records.inner()
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn proposal(&self, account: &Address) -> Result<Option<Proposal>, GovernanceError> {
        self.records.proposal(account)
    }

    pub fn voter(&self, voter: &Address) -> Result<VoterAccount, GovernanceError> {
        self.records.voter(voter)
    }

    /// Result of the proposal recorded on `account`, as of now.
    pub fn proposal_result(&self, account: &Address) -> Result<ProposalResult, GovernanceError> {
        let proposal = self.load_proposal(account)?;
        Ok(evaluate(&proposal, self.clock.now(), self.params.min_support))
    }

    /// Accounts whose proposal is active as of now.
    pub fn active_proposals(&self) -> Result<Vec<Address>, GovernanceError> {
        let now = self.clock.now();
        let mut active = Vec::new();
        for account in self.records.proposal_accounts()? {
            if let Some(proposal) = self.records.proposal(&account)? {
                if is_active(&proposal, now, self.params.min_support) {
                    active.push(account);
                }
            }
        }
        Ok(active)
    }

    // ── Dispatch ────────────────────────────────────────────────────────

    /// Route a call submitted with `group`.
    ///
    /// Opt-in and close-out completions are accepted as long as they travel
    /// alone, without running `call`. Update and delete are refused.
    pub fn process(
        &mut self,
        call: DaoCall,
        group: &TransactionGroup,
    ) -> Result<Option<Transaction>, GovernanceError> {
        let app_call = self.app_call(group)?;
        match app_call.on_completion {
            OnComplete::UpdateApplication | OnComplete::DeleteApplication => {
                tracing::debug!(call = call.name(), "refused application update/delete");
                return Err(GovernanceError::UnsupportedCall(format!(
                    "{:?} is not allowed",
                    app_call.on_completion
                )));
            }
            OnComplete::OptIn | OnComplete::CloseOut => {
                require_lone(group)?;
                return Ok(None);
            }
            OnComplete::NoOp => {}
        }

        match call {
            DaoCall::OptInGovToken => self.opt_in_gov_token(group).map(Some),
            DaoCall::AddProposal(config) => self.add_proposal(group, config).map(|_| None),
            DaoCall::DepositVoteToken => self.deposit_vote_token(group).map(|_| None),
            DaoCall::RegisterVote { proposal, choice } => {
                self.register_vote(group, &proposal, choice).map(|_| None)
            }
            DaoCall::Execute { proposal } => self.execute(group, &proposal).map(|_| None),
            DaoCall::WithdrawVoteDeposit { amount } => {
                self.withdraw_vote_deposit(group, amount).map(Some)
            }
            DaoCall::ClearVoteRecord { proposal } => {
                self.clear_vote_record(group, &proposal).map(|_| None)
            }
            DaoCall::CloseProposal => self.close_proposal(group).map(Some),
        }
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Let custody receive the governance token. Yields the zero-amount
    /// self-transfer that opts custody in.
    pub fn opt_in_gov_token(
        &mut self,
        group: &TransactionGroup,
    ) -> Result<Transaction, GovernanceError> {
        let app_call = self.app_call(group)?;
        require_lone(group)?;
        basic_checks(group.first(), 0)?;
        match app_call.foreign_assets.first() {
            Some(asset) if *asset == self.params.gov_token_id => {}
            other => {
                return Err(GovernanceError::InvalidGroup(format!(
                    "first foreign asset must be the governance token {}, got {:?}",
                    self.params.gov_token_id, other
                )))
            }
        }
        tracing::info!(asset = %self.params.gov_token_id, "custody opted in to governance token");
        Ok(Transaction::asset_transfer(
            self.custody,
            self.params.gov_token_id,
            self.custody,
            0,
        ))
    }

    /// Record a proposal on the caller's account against the entry deposit at
    /// group index 1.
    pub fn add_proposal(
        &mut self,
        group: &TransactionGroup,
        config: ProposalConfig,
    ) -> Result<ProposalRef, GovernanceError> {
        let proposer = self.caller(group)?;
        let now = self.clock.now();
        self.try_add_proposal(group, proposer, config, now)
            .inspect_err(|e| tracing::debug!(proposer = %proposer, error = %e, "add_proposal rejected"))
    }

    fn try_add_proposal(
        &self,
        group: &TransactionGroup,
        proposer: Address,
        config: ProposalConfig,
        now: Timestamp,
    ) -> Result<ProposalRef, GovernanceError> {
        if self.records.proposal(&proposer)?.is_some() {
            return Err(GovernanceError::ProposalAlreadyOpen(proposer));
        }
        let expected = ExpectedTransfer::token(
            self.params.gov_token_id,
            self.custody,
            AmountRule::Exactly(self.params.deposit),
        );
        self.verifier
            .verify(group, DEPOSIT_INDEX, &expected)
            .map_err(GovernanceError::DepositMismatch)?;

        let proposal = Proposal::open(config, proposal_id(group, now), now, &self.params)?;
        let proposal_ref = proposal.reference(proposer);

        let mut batch = WriteBatch::new();
        batch.put_proposal(proposer, &proposal)?;
        self.records.commit(batch)?;

        tracing::info!(
            proposal = %proposer,
            name = %proposal.name,
            kind = proposal.kind.name(),
            window = %format_window(proposal.voting_start, proposal.voting_end),
            "proposal added"
        );
        self.publish(GovernanceEvent::ProposalAdded {
            proposal_ref,
            name: proposal.name,
            voting_start: proposal.voting_start,
            voting_end: proposal.voting_end,
            execute_before: proposal.execute_before,
        });
        Ok(proposal_ref)
    }

    /// Credit the governance tokens transferred to custody at group index 1.
    /// Returns the caller's new deposit.
    pub fn deposit_vote_token(&mut self, group: &TransactionGroup) -> Result<u64, GovernanceError> {
        let voter_addr = self.caller(group)?;
        self.try_deposit_vote_token(group, voter_addr)
            .inspect_err(|e| tracing::debug!(voter = %voter_addr, error = %e, "deposit rejected"))
    }

    fn try_deposit_vote_token(
        &self,
        group: &TransactionGroup,
        voter_addr: Address,
    ) -> Result<u64, GovernanceError> {
        let expected =
            ExpectedTransfer::token(self.params.gov_token_id, self.custody, AmountRule::Any);
        let amount = self
            .verifier
            .verify(group, DEPOSIT_INDEX, &expected)
            .map_err(GovernanceError::DepositMismatch)?;

        let mut voter = self.records.voter(&voter_addr)?;
        let total = DepositLedger.credit(&mut voter, amount)?;

        let mut batch = WriteBatch::new();
        batch.put_voter(voter_addr, &voter)?;
        self.records.commit(batch)?;

        tracing::info!(voter = %voter_addr, amount, total, "vote tokens deposited");
        self.publish(GovernanceEvent::VoteDeposited {
            voter: voter_addr,
            amount,
            total,
        });
        Ok(total)
    }

    /// Cast the caller's whole deposit on the proposal recorded on `account`.
    pub fn register_vote(
        &mut self,
        group: &TransactionGroup,
        account: &Address,
        choice: VoteChoice,
    ) -> Result<(), GovernanceError> {
        let voter_addr = self.caller(group)?;
        let now = self.clock.now();
        self.try_register_vote(group, voter_addr, account, choice, now)
            .inspect_err(|e| {
                tracing::debug!(voter = %voter_addr, proposal = %account, error = %e, "vote rejected")
            })
    }

    fn try_register_vote(
        &self,
        group: &TransactionGroup,
        voter_addr: Address,
        account: &Address,
        choice: VoteChoice,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        require_lone(group)?;
        let mut proposal = self.load_proposal(account)?;
        let mut voter = self.records.voter(&voter_addr)?;
        let proposal_ref = proposal.reference(*account);

        let weight = VotingLedger.register_vote(
            &voter_addr,
            &mut voter,
            proposal_ref,
            &mut proposal,
            choice,
            now,
        )?;

        let mut batch = WriteBatch::new();
        batch.put_proposal(*account, &proposal)?;
        batch.put_voter(voter_addr, &voter)?;
        self.records.commit(batch)?;

        tracing::info!(
            voter = %voter_addr,
            proposal = %account,
            %choice,
            weight,
            locked_until = %voter.deposit_lock,
            "vote registered"
        );
        self.publish(GovernanceEvent::VoteRegistered {
            voter: voter_addr,
            proposal_ref,
            choice,
            weight,
        });
        Ok(())
    }

    /// Release `amount` of the caller's deposit once its lock has passed.
    /// Yields the custody transfer back to the caller.
    pub fn withdraw_vote_deposit(
        &mut self,
        group: &TransactionGroup,
        amount: u64,
    ) -> Result<Transaction, GovernanceError> {
        let voter_addr = self.caller(group)?;
        let now = self.clock.now();
        self.try_withdraw(group, voter_addr, amount, now)
            .inspect_err(|e| tracing::debug!(voter = %voter_addr, amount, error = %e, "withdrawal rejected"))
    }

    fn try_withdraw(
        &self,
        group: &TransactionGroup,
        voter_addr: Address,
        amount: u64,
        now: Timestamp,
    ) -> Result<Transaction, GovernanceError> {
        require_lone(group)?;
        basic_checks(group.first(), 0)?;

        let mut voter = self.records.voter(&voter_addr)?;
        let remaining = DepositLedger.withdraw(&mut voter, amount, now)?;

        let mut batch = WriteBatch::new();
        batch.put_voter(voter_addr, &voter)?;
        self.records.commit(batch)?;

        tracing::info!(voter = %voter_addr, amount, remaining, "vote deposit withdrawn");
        self.publish(GovernanceEvent::VoteDepositWithdrawn {
            voter: voter_addr,
            amount,
            remaining,
        });
        Ok(Transaction::asset_transfer(
            self.custody,
            self.params.gov_token_id,
            voter_addr,
            amount,
        ))
    }

    /// Carry out a passed proposal. Anyone may call this; the group must hold
    /// exactly the approved action.
    pub fn execute(
        &mut self,
        group: &TransactionGroup,
        account: &Address,
    ) -> Result<(), GovernanceError> {
        self.caller(group)?;
        let now = self.clock.now();
        self.try_execute(group, account, now)
            .inspect_err(|e| tracing::debug!(proposal = %account, error = %e, "execute rejected"))
    }

    fn try_execute(
        &self,
        group: &TransactionGroup,
        account: &Address,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let mut proposal = self.load_proposal(account)?;
        let result = evaluate(&proposal, now, self.params.min_support);
        if result != ProposalResult::Passed {
            return Err(GovernanceError::NotExecutable(format!("proposal is {result}")));
        }
        if proposal.executed {
            return Err(GovernanceError::NotExecutable("already executed".into()));
        }
        ExecutionGate.check(&proposal.kind, group, self.verifier.as_ref())?;

        proposal.executed = true;
        let mut batch = WriteBatch::new();
        batch.put_proposal(*account, &proposal)?;
        self.records.commit(batch)?;

        tracing::info!(proposal = %account, kind = proposal.kind.name(), "proposal executed");
        self.publish(GovernanceEvent::ProposalExecuted {
            proposal_ref: proposal.reference(*account),
            kind: proposal.kind,
        });
        Ok(())
    }

    /// Delete the caller's inactive proposal. Yields the entry-deposit refund.
    pub fn close_proposal(&mut self, group: &TransactionGroup) -> Result<Transaction, GovernanceError> {
        let proposer = self.caller(group)?;
        let now = self.clock.now();
        self.try_close(group, proposer, now)
            .inspect_err(|e| tracing::debug!(proposal = %proposer, error = %e, "close rejected"))
    }

    fn try_close(
        &self,
        group: &TransactionGroup,
        proposer: Address,
        now: Timestamp,
    ) -> Result<Transaction, GovernanceError> {
        require_lone(group)?;
        basic_checks(group.first(), 0)?;

        let proposal = self.load_proposal(&proposer)?;
        if is_active(&proposal, now, self.params.min_support) {
            return Err(GovernanceError::ProposalStillActive);
        }
        let result = evaluate(&proposal, now, self.params.min_support);

        let mut batch = WriteBatch::new();
        batch.delete_proposal(proposer);
        self.records.commit(batch)?;

        tracing::info!(proposal = %proposer, %result, executed = proposal.executed, "proposal closed");
        self.publish(GovernanceEvent::ProposalClosed {
            proposal_ref: proposal.reference(proposer),
            result,
        });
        Ok(Transaction::asset_transfer(
            self.custody,
            self.params.gov_token_id,
            proposer,
            self.params.deposit,
        ))
    }

    /// Drop the caller's vote bookkeeping for the proposal on `account` once
    /// that proposal can no longer change or be executed.
    pub fn clear_vote_record(
        &mut self,
        group: &TransactionGroup,
        account: &Address,
    ) -> Result<(), GovernanceError> {
        let voter_addr = self.caller(group)?;
        let now = self.clock.now();
        self.try_clear(group, voter_addr, account, now).inspect_err(|e| {
            tracing::debug!(voter = %voter_addr, proposal = %account, error = %e, "clear rejected")
        })
    }

    fn try_clear(
        &self,
        group: &TransactionGroup,
        voter_addr: Address,
        account: &Address,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        require_lone(group)?;
        let mut voter = self.records.voter(&voter_addr)?;
        let current = self.records.proposal(account)?;
        let cleared = VotingLedger.clear_vote_record(
            &mut voter,
            account,
            current.as_ref(),
            now,
            self.params.min_support,
        )?;
        let Some(proposal_ref) = cleared else {
            return Ok(());
        };

        let mut batch = WriteBatch::new();
        batch.put_voter(voter_addr, &voter)?;
        self.records.commit(batch)?;

        tracing::info!(voter = %voter_addr, proposal = %account, "vote record cleared");
        self.publish(GovernanceEvent::VoteRecordCleared {
            voter: voter_addr,
            proposal_ref,
        });
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn load_proposal(&self, account: &Address) -> Result<Proposal, GovernanceError> {
        self.records
            .proposal(account)?
            .ok_or(GovernanceError::ProposalNotFound(*account))
    }

    /// The leading application call, which must target this DAO.
    fn app_call<'g>(&self, group: &'g TransactionGroup) -> Result<&'g AppCall, GovernanceError> {
        let first = group.first();
        let call = first.as_app_call().ok_or_else(|| {
            GovernanceError::InvalidGroup(format!(
                "group must start with an application call, found {}",
                first.type_name()
            ))
        })?;
        if call.app_id != self.app_id {
            return Err(GovernanceError::InvalidGroup(format!(
                "call targets {}, expected {}",
                call.app_id, self.app_id
            )));
        }
        Ok(call)
    }

    /// Sender of the leading no-op call to this DAO.
    fn caller(&self, group: &TransactionGroup) -> Result<Address, GovernanceError> {
        let call = self.app_call(group)?;
        if call.on_completion != OnComplete::NoOp {
            return Err(GovernanceError::UnsupportedCall(format!(
                "{:?} completion carries no DAO operation",
                call.on_completion
            )));
        }
        Ok(group.first().sender)
    }

    fn publish(&self, event: GovernanceEvent) {
        for sink in &self.sinks {
            sink.publish(&event);
        }
    }
}

fn require_lone(group: &TransactionGroup) -> Result<(), GovernanceError> {
    if group.len() != 1 {
        return Err(GovernanceError::InvalidGroup(format!(
            "call must be sent alone, group has {} transactions",
            group.len()
        )));
    }
    Ok(())
}
