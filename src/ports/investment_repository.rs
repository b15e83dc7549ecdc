//! Investment repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InvestorId, LoanId, Page};
use crate::domain::lending::Investment;

/// Repository port for Investment persistence.
#[async_trait]
pub trait InvestmentRepository: Send + Sync {
    /// Persist a new investment.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, investment: &Investment) -> Result<(), DomainError>;

    /// List every investment committed against one loan.
    ///
    /// Unpaginated: the funding ledger of a loan is bounded by its principal
    /// and the availability computation needs all of it.
    async fn list_by_loan(&self, loan_id: &LoanId) -> Result<Vec<Investment>, DomainError>;

    /// List investments for one investor, newest first.
    async fn list_by_investor(
        &self,
        investor_id: &InvestorId,
        page: Page,
    ) -> Result<Vec<Investment>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn investment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn InvestmentRepository) {}
    }
}
