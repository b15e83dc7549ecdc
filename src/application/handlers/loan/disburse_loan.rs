//! DisburseLoanHandler - Command handler for the Invested → Disbursed gate.

use std::sync::Arc;

use crate::application::LoanLocks;
use crate::domain::foundation::{DomainError, EmployeeId, LoanId};
use crate::ports::{EmployeeRepository, LoanRepository};

/// Command to disburse a fully invested loan.
#[derive(Debug, Clone)]
pub struct DisburseLoanCommand {
    pub loan_id: LoanId,
    /// Employee handing the funds to the borrower.
    pub employee_id: EmployeeId,
    /// Reference to the borrower-signed agreement letter.
    pub agreement_letter: String,
}

/// Handler for disbursing loans.
pub struct DisburseLoanHandler {
    loans: Arc<dyn LoanRepository>,
    employees: Arc<dyn EmployeeRepository>,
    loan_locks: Arc<LoanLocks>,
}

impl DisburseLoanHandler {
    pub fn new(
        loans: Arc<dyn LoanRepository>,
        employees: Arc<dyn EmployeeRepository>,
        loan_locks: Arc<LoanLocks>,
    ) -> Self {
        Self {
            loans,
            employees,
            loan_locks,
        }
    }

    /// Disburses the loan, persisting the full record in one update.
    ///
    /// The precondition read and the write run under the per-loan lock;
    /// of two concurrent disbursements exactly one succeeds, the other
    /// fails `LoanNotInvested` against the already-terminal loan.
    ///
    /// # Errors
    ///
    /// - `LoanNotFound` / `EmployeeNotFound` if either lookup misses
    /// - `LoanNotInvested` if the loan is not in the Invested state
    /// - `DatabaseError` if the update fails
    pub async fn handle(&self, cmd: DisburseLoanCommand) -> Result<(), DomainError> {
        let employee = self
            .employees
            .find_by_id(&cmd.employee_id)
            .await?
            .ok_or_else(DomainError::employee_not_found)?;

        let _guard = self.loan_locks.acquire(cmd.loan_id).await;

        let mut loan = self
            .loans
            .find_by_id(&cmd.loan_id)
            .await?
            .ok_or_else(DomainError::loan_not_found)?;

        loan.disburse(employee.id(), cmd.agreement_letter)?;
        self.loans.update(&loan).await?;

        tracing::info!(loan_id = %loan.id(), disbursed_by = %employee.id(), "loan disbursed");

        Ok(())
    }
}
