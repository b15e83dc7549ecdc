//! Investment entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, InvestmentId, InvestorId, LoanId, Timestamp};

/// A single investor's committed funding against one loan.
///
/// The agreement letter reference is generated by the system when the
/// investment is committed, never supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    id: InvestmentId,
    /// Committed amount in the smallest currency unit, always positive.
    amount: i64,
    investor_id: InvestorId,
    loan_id: LoanId,
    agreement_letter: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Investment {
    /// Creates a new investment.
    ///
    /// # Errors
    ///
    /// - `InvestmentInvalidAmount` if the amount is not positive
    pub fn new(
        id: InvestmentId,
        investor_id: InvestorId,
        loan_id: LoanId,
        amount: i64,
        agreement_letter: String,
    ) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::investment_invalid_amount());
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            amount,
            investor_id,
            loan_id,
            agreement_letter,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an investment from persistence (no validation).
    pub fn reconstitute(
        id: InvestmentId,
        investor_id: InvestorId,
        loan_id: LoanId,
        amount: i64,
        agreement_letter: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            amount,
            investor_id,
            loan_id,
            agreement_letter,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> InvestmentId {
        self.id
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn investor_id(&self) -> InvestorId {
        self.investor_id
    }

    pub fn loan_id(&self) -> LoanId {
        self.loan_id
    }

    pub fn agreement_letter(&self) -> &str {
        &self.agreement_letter
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
