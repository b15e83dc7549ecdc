//! Remaining investment capacity query.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, LoanId};
use crate::domain::lending::LoanState;
use crate::ports::{InvestmentRepository, LoanRepository};

/// Read-only projection of how much funding a loan can still take.
pub struct CheckAvailabilityHandler {
    loans: Arc<dyn LoanRepository>,
    investments: Arc<dyn InvestmentRepository>,
}

impl CheckAvailabilityHandler {
    pub fn new(loans: Arc<dyn LoanRepository>, investments: Arc<dyn InvestmentRepository>) -> Self {
        Self { loans, investments }
    }

    /// Computes `principal − Σ committed investments`. Never mutates state.
    ///
    /// The result can only be negative if the funding invariant was already
    /// violated; callers treat non-positive results as "no capacity".
    ///
    /// # Errors
    ///
    /// - `LoanNotFound` if the loan lookup misses
    /// - `LoanNotApproved` if the loan is not open for funding
    pub async fn handle(&self, loan_id: LoanId) -> Result<i64, DomainError> {
        let loan = self
            .loans
            .find_by_id(&loan_id)
            .await?
            .ok_or_else(DomainError::loan_not_found)?;

        if loan.state() != LoanState::Approved {
            return Err(DomainError::loan_not_approved());
        }

        let total_invested: i64 = self
            .investments
            .list_by_loan(&loan_id)
            .await?
            .iter()
            .map(|i| i.amount())
            .sum();

        Ok(loan.remaining_capacity(total_invested))
    }
}
