//! CreateInvestmentHandler - Command handler for committing funding to a loan.

use std::sync::Arc;

use crate::application::LoanLocks;
use crate::domain::foundation::{DomainError, InvestmentId, InvestorId, LoanId};
use crate::domain::lending::{Investment, LoanState};
use crate::ports::{
    AgreementLetterService, InvestmentRepository, InvestorRepository, LoanRepository,
};

/// Command to commit one investor's funding against a loan.
#[derive(Debug, Clone)]
pub struct CreateInvestmentCommand {
    pub investor_id: InvestorId,
    pub loan_id: LoanId,
    /// Amount in the smallest currency unit.
    pub amount: i64,
}

/// Handler for committing investments.
///
/// The capacity check, the investment insert and the loan-state update form
/// one critical section guarded by the per-loan lock, so the funding
/// invariant (Σ amounts ≤ principal) holds under concurrent commits.
pub struct CreateInvestmentHandler {
    investors: Arc<dyn InvestorRepository>,
    loans: Arc<dyn LoanRepository>,
    investments: Arc<dyn InvestmentRepository>,
    agreement_letters: Arc<dyn AgreementLetterService>,
    loan_locks: Arc<LoanLocks>,
}

impl CreateInvestmentHandler {
    pub fn new(
        investors: Arc<dyn InvestorRepository>,
        loans: Arc<dyn LoanRepository>,
        investments: Arc<dyn InvestmentRepository>,
        agreement_letters: Arc<dyn AgreementLetterService>,
        loan_locks: Arc<LoanLocks>,
    ) -> Self {
        Self {
            investors,
            loans,
            investments,
            agreement_letters,
            loan_locks,
        }
    }

    /// Commits the investment and, on exact full funding, transitions the
    /// loan to Invested.
    ///
    /// An amount exceeding the remaining capacity is rejected outright; there
    /// are no partial fills.
    ///
    /// # Errors
    ///
    /// - `InvestorNotFound` / `LoanNotFound` if either lookup misses
    /// - `LoanNotApproved` if the loan is not open for funding
    /// - `InvestmentInvalidAmount` if the amount is non-positive or exceeds
    ///   the remaining capacity
    /// - `DatabaseError` if a write fails
    pub async fn handle(&self, cmd: CreateInvestmentCommand) -> Result<Investment, DomainError> {
        if cmd.amount <= 0 {
            return Err(DomainError::investment_invalid_amount());
        }

        let investor = self
            .investors
            .find_by_id(&cmd.investor_id)
            .await?
            .ok_or_else(DomainError::investor_not_found)?;

        // Critical section: everything from the capacity read to the loan
        // update runs under the per-loan lock.
        let _guard = self.loan_locks.acquire(cmd.loan_id).await;

        let mut loan = self
            .loans
            .find_by_id(&cmd.loan_id)
            .await?
            .ok_or_else(DomainError::loan_not_found)?;

        if loan.state() != LoanState::Approved {
            return Err(DomainError::loan_not_approved());
        }

        let total_invested: i64 = self
            .investments
            .list_by_loan(&cmd.loan_id)
            .await?
            .iter()
            .map(|i| i.amount())
            .sum();

        if cmd.amount > loan.remaining_capacity(total_invested) {
            return Err(DomainError::investment_invalid_amount());
        }

        let agreement_letter = self
            .agreement_letters
            .generate(&investor.id(), &loan.id())
            .await?;

        let investment = Investment::new(
            InvestmentId::new(),
            investor.id(),
            loan.id(),
            cmd.amount,
            agreement_letter,
        )?;

        self.investments.save(&investment).await?;

        if total_invested + cmd.amount == loan.principal_amount() {
            loan.mark_invested()?;
            self.loans.update(&loan).await?;
            tracing::info!(loan_id = %loan.id(), "loan fully funded");
        }

        Ok(investment)
    }
}
