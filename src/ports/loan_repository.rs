//! Loan repository port.
//!
//! Persistence gateway contract for the Loan aggregate. Implementations only
//! store and retrieve records; the lifecycle engine alone decides state
//! transitions.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LoanId, Page, UserId};
use crate::domain::lending::Loan;

/// Repository port for Loan persistence.
#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// Persist a new loan.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, loan: &Loan) -> Result<(), DomainError>;

    /// Update an existing loan as a full-record write, never a partial patch.
    ///
    /// # Errors
    ///
    /// - `LoanNotFound` if the loan doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, loan: &Loan) -> Result<(), DomainError>;

    /// Find a loan by its ID.
    ///
    /// Returns `None` if not found; a missing record is never reported as a
    /// zero-value loan.
    async fn find_by_id(&self, id: &LoanId) -> Result<Option<Loan>, DomainError>;

    /// List loans ordered by creation time, newest first.
    async fn list(&self, page: Page) -> Result<Vec<Loan>, DomainError>;

    /// List loans for one borrower, newest first.
    async fn list_by_borrower(
        &self,
        borrower_id: &UserId,
        page: Page,
    ) -> Result<Vec<Loan>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn LoanRepository) {}
    }
}
