//! ApproveLoanHandler - Command handler for the Proposed → Approved gate.

use std::sync::Arc;

use crate::application::LoanLocks;
use crate::domain::foundation::{DomainError, EmployeeId, LoanId};
use crate::ports::{EmployeeRepository, LoanRepository};

/// Command to approve a proposed loan.
#[derive(Debug, Clone)]
pub struct ApproveLoanCommand {
    pub loan_id: LoanId,
    /// Employee vouching for the approval.
    pub employee_id: EmployeeId,
    /// Reference to the field-visit proof document.
    pub approval_proof: String,
}

/// Handler for approving loans.
pub struct ApproveLoanHandler {
    loans: Arc<dyn LoanRepository>,
    employees: Arc<dyn EmployeeRepository>,
    loan_locks: Arc<LoanLocks>,
}

impl ApproveLoanHandler {
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

    /// Approves the loan, persisting the full record in one update.
    ///
    /// The precondition read and the write run under the per-loan lock, so
    /// of two concurrent approvals exactly one wins; the loser re-reads an
    /// Approved loan and fails `LoanNotProposed` without touching it.
    ///
    /// # Errors
    ///
    /// - `LoanNotFound` / `EmployeeNotFound` if either lookup misses
    /// - `LoanNotProposed` if the loan is not in the Proposed state
    /// - `DatabaseError` if the update fails
    pub async fn handle(&self, cmd: ApproveLoanCommand) -> Result<(), DomainError> {
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

        loan.approve(employee.id(), cmd.approval_proof)?;
        self.loans.update(&loan).await?;

        tracing::info!(loan_id = %loan.id(), approved_by = %employee.id(), "loan approved");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryLoanRepository, InMemoryPartyDirectory};
    use crate::domain::foundation::{ErrorCode, Page, UserId};
    use crate::domain::lending::{Employee, Loan, LoanState};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn seeded() -> (ApproveLoanHandler, Arc<InMemoryLoanRepository>, LoanId, EmployeeId) {
        let loans = Arc::new(InMemoryLoanRepository::new());
        let directory = Arc::new(InMemoryPartyDirectory::new());

        let loan = Loan::new(LoanId::new(), UserId::new(), 1_000, dec!(8.0), dec!(4.0)).unwrap();
        let loan_id = loan.id();
        loans.seed(loan);

        let employee = Employee::new(EmployeeId::new(), "Sari".to_string());
        let employee_id = employee.id();
        directory.insert_employee(employee);

        let handler =
            ApproveLoanHandler::new(loans.clone(), directory, Arc::new(LoanLocks::new()));
        (handler, loans, loan_id, employee_id)
    }

    #[tokio::test]
    async fn approves_proposed_loan_and_persists_metadata() {
        let (handler, loans, loan_id, employee_id) = seeded();

        handler
            .handle(ApproveLoanCommand {
                loan_id,
                employee_id,
                approval_proof: "https://docs/proof.jpg".to_string(),
            })
            .await
            .unwrap();

        let loan = loans.find_by_id(&loan_id).await.unwrap().unwrap();
        assert_eq!(loan.state(), LoanState::Approved);
        let approval = loan.approval().unwrap();
        assert_eq!(approval.approved_by, employee_id);
        assert_eq!(approval.proof, "https://docs/proof.jpg");
    }

    #[tokio::test]
    async fn approving_twice_fails_loan_not_proposed() {
        let (handler, _, loan_id, employee_id) = seeded();

        let cmd = ApproveLoanCommand {
            loan_id,
            employee_id,
            approval_proof: "proof".to_string(),
        };
        handler.handle(cmd.clone()).await.unwrap();

        let err = handler.handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::LoanNotProposed);
    }

    #[tokio::test]
    async fn unknown_loan_fails_loan_not_found() {
        let (handler, _, _, employee_id) = seeded();

        let err = handler
            .handle(ApproveLoanCommand {
                loan_id: LoanId::new(),
                employee_id,
                approval_proof: "proof".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::LoanNotFound);
    }

    #[tokio::test]
    async fn unknown_employee_fails_employee_not_found_without_mutation() {
        let (handler, loans, loan_id, _) = seeded();

        let err = handler
            .handle(ApproveLoanCommand {
                loan_id,
                employee_id: EmployeeId::new(),
                approval_proof: "proof".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);

        let loan = loans.find_by_id(&loan_id).await.unwrap().unwrap();
        assert_eq!(loan.state(), LoanState::Proposed);
        assert!(loan.approval().is_none());
    }

    /// Loan store whose writes pause, widening the read-to-write window that
    /// an unguarded handler would race through.
    struct SlowWriteLoans {
        inner: Arc<InMemoryLoanRepository>,
    }

    #[async_trait]
    impl LoanRepository for SlowWriteLoans {
        async fn save(&self, loan: &Loan) -> Result<(), DomainError> {
            self.inner.save(loan).await
        }

        async fn update(&self, loan: &Loan) -> Result<(), DomainError> {
            tokio::time::sleep(Duration::from_millis(30)).await;
            self.inner.update(loan).await
        }

        async fn find_by_id(&self, id: &LoanId) -> Result<Option<Loan>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn list(&self, page: Page) -> Result<Vec<Loan>, DomainError> {
            self.inner.list(page).await
        }

        async fn list_by_borrower(
            &self,
            borrower_id: &UserId,
            page: Page,
        ) -> Result<Vec<Loan>, DomainError> {
            self.inner.list_by_borrower(borrower_id, page).await
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_approvals_admit_exactly_one_winner() {
        let store = Arc::new(InMemoryLoanRepository::new());
        let directory = Arc::new(InMemoryPartyDirectory::new());

        let loan = Loan::new(LoanId::new(), UserId::new(), 1_000, dec!(8.0), dec!(4.0)).unwrap();
        let loan_id = loan.id();
        store.seed(loan);

        let first = Employee::new(EmployeeId::new(), "Sari".to_string());
        let second = Employee::new(EmployeeId::new(), "Rudi".to_string());
        let first_id = first.id();
        let second_id = second.id();
        directory.insert_employee(first);
        directory.insert_employee(second);

        let handler = Arc::new(ApproveLoanHandler::new(
            Arc::new(SlowWriteLoans { inner: store.clone() }),
            directory,
            Arc::new(LoanLocks::new()),
        ));

        let mut tasks = Vec::new();
        for employee_id in [first_id, second_id] {
            let handler = handler.clone();
            tasks.push(tokio::spawn(async move {
                handler
                    .handle(ApproveLoanCommand {
                        loan_id,
                        employee_id,
                        approval_proof: "proof".to_string(),
                    })
                    .await
            }));
        }

        let mut successes = 0;
        let mut failures = Vec::new();
        for task in tasks {
            match task.await.unwrap() {
                Ok(()) => successes += 1,
                Err(err) => failures.push(err),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].code, ErrorCode::LoanNotProposed);

        // The winner's metadata is intact, not overwritten by the loser.
        let loan = store.find_by_id(&loan_id).await.unwrap().unwrap();
        assert_eq!(loan.state(), LoanState::Approved);
        let approver = loan.approval().unwrap().approved_by;
        assert!(approver == first_id || approver == second_id);
    }
}
