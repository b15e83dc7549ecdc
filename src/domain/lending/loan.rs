//! Loan aggregate and its lifecycle state machine.
//!
//! A loan is created in `Proposed` state from a loan product template. It is
//! approved by an employee, becomes `Invested` the moment committed funding
//! equals its principal exactly, and is finally disbursed by an employee.
//!
//! # Invariants
//!
//! - State only advances Proposed → Approved → Invested → Disbursed.
//! - Approval metadata (proof, employee, timestamp) is present if and only if
//!   the loan has reached `Approved`; likewise disbursement metadata for
//!   `Disbursed`. Both are modeled as a single `Option` so the all-or-none
//!   rule holds by construction.
//! - `principal_amount` is positive and denominated in the smallest currency
//!   unit; rate and roi use decimal arithmetic, never binary floats.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, EmployeeId, LoanId, StateMachine, Timestamp, UserId,
};

/// Lifecycle state of a loan. `Disbursed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanState {
    Proposed,
    Approved,
    Invested,
    Disbursed,
}

impl LoanState {
    /// Stable string form used by persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanState::Proposed => "proposed",
            LoanState::Approved => "approved",
            LoanState::Invested => "invested",
            LoanState::Disbursed => "disbursed",
        }
    }
}

impl std::str::FromStr for LoanState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proposed" => Ok(LoanState::Proposed),
            "approved" => Ok(LoanState::Approved),
            "invested" => Ok(LoanState::Invested),
            "disbursed" => Ok(LoanState::Disbursed),
            other => Err(DomainError::validation(format!(
                "unknown loan state '{}'",
                other
            ))),
        }
    }
}

impl StateMachine for LoanState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (LoanState::Proposed, LoanState::Approved)
                | (LoanState::Approved, LoanState::Invested)
                | (LoanState::Invested, LoanState::Disbursed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            LoanState::Proposed => vec![LoanState::Approved],
            LoanState::Approved => vec![LoanState::Invested],
            LoanState::Invested => vec![LoanState::Disbursed],
            LoanState::Disbursed => vec![],
        }
    }
}

/// Approval metadata, set atomically on the Proposed → Approved transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    /// Reference to the field-visit proof document.
    pub proof: String,
    /// Employee who approved the loan.
    pub approved_by: EmployeeId,
    /// When the loan was approved.
    pub approved_at: Timestamp,
}

/// Disbursement metadata, set atomically on the Invested → Disbursed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disbursement {
    /// Reference to the signed agreement letter.
    pub agreement_letter: String,
    /// Employee who handed the funds to the borrower.
    pub disbursed_by: EmployeeId,
    /// When the loan was disbursed.
    pub disbursed_at: Timestamp,
}

/// Loan aggregate.
///
/// All mutation goes through [`approve`](Loan::approve),
/// [`mark_invested`](Loan::mark_invested) and [`disburse`](Loan::disburse),
/// each of which checks its state precondition before touching any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    id: LoanId,
    state: LoanState,
    borrower_id: UserId,
    /// Principal in the smallest currency unit.
    principal_amount: i64,
    rate: Decimal,
    roi: Decimal,
    approval: Option<Approval>,
    disbursement: Option<Disbursement>,
    invested_at: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Loan {
    /// Creates a new proposed loan, copying rate and roi from a product.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the principal is not positive
    pub fn new(
        id: LoanId,
        borrower_id: UserId,
        principal_amount: i64,
        rate: Decimal,
        roi: Decimal,
    ) -> Result<Self, DomainError> {
        if principal_amount <= 0 {
            return Err(DomainError::validation(
                "principal amount must be positive",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            state: LoanState::Proposed,
            borrower_id,
            principal_amount,
            rate,
            roi,
            approval: None,
            disbursement: None,
            invested_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a loan from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: LoanId,
        state: LoanState,
        borrower_id: UserId,
        principal_amount: i64,
        rate: Decimal,
        roi: Decimal,
        approval: Option<Approval>,
        disbursement: Option<Disbursement>,
        invested_at: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            state,
            borrower_id,
            principal_amount,
            rate,
            roi,
            approval,
            disbursement,
            invested_at,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> LoanId {
        self.id
    }

    pub fn state(&self) -> LoanState {
        self.state
    }

    pub fn borrower_id(&self) -> UserId {
        self.borrower_id
    }

    pub fn principal_amount(&self) -> i64 {
        self.principal_amount
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn roi(&self) -> Decimal {
        self.roi
    }

    pub fn approval(&self) -> Option<&Approval> {
        self.approval.as_ref()
    }

    pub fn disbursement(&self) -> Option<&Disbursement> {
        self.disbursement.as_ref()
    }

    pub fn invested_at(&self) -> Option<Timestamp> {
        self.invested_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Principal remaining after the given total of committed investments.
    ///
    /// Can only go negative if the funding invariant was already violated;
    /// callers treat non-positive results as "no capacity".
    pub fn remaining_capacity(&self, total_invested: i64) -> i64 {
        self.principal_amount - total_invested
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle transitions
    // ─────────────────────────────────────────────────────────────────────

    /// Approves a proposed loan, stamping the approval metadata.
    ///
    /// # Errors
    ///
    /// - `LoanNotProposed` if the loan already left the Proposed state
    pub fn approve(
        &mut self,
        employee_id: EmployeeId,
        approval_proof: String,
    ) -> Result<(), DomainError> {
        if self.state != LoanState::Proposed {
            return Err(DomainError::loan_not_proposed());
        }

        let now = Timestamp::now();
        self.state = self.state.transition_to(LoanState::Approved)?;
        self.approval = Some(Approval {
            proof: approval_proof,
            approved_by: employee_id,
            approved_at: now,
        });
        self.updated_at = now;
        Ok(())
    }

    /// Marks an approved loan as fully invested.
    ///
    /// Called by the investment commit when total funding reaches the
    /// principal exactly.
    ///
    /// # Errors
    ///
    /// - `LoanNotApproved` if the loan is not in the Approved state
    pub fn mark_invested(&mut self) -> Result<(), DomainError> {
        if self.state != LoanState::Approved {
            return Err(DomainError::loan_not_approved());
        }

        let now = Timestamp::now();
        self.state = self.state.transition_to(LoanState::Invested)?;
        self.invested_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Disburses a fully invested loan, stamping the disbursement metadata.
    ///
    /// # Errors
    ///
    /// - `LoanNotInvested` if the loan is not in the Invested state
    pub fn disburse(
        &mut self,
        employee_id: EmployeeId,
        agreement_letter: String,
    ) -> Result<(), DomainError> {
        if self.state != LoanState::Invested {
            return Err(DomainError::loan_not_invested());
        }

        let now = Timestamp::now();
        self.state = self.state.transition_to(LoanState::Disbursed)?;
        self.disbursement = Some(Disbursement {
            agreement_letter,
            disbursed_by: employee_id,
            disbursed_at: now,
        });
        self.updated_at = now;
        Ok(())
    }
}
