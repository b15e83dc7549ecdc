//! Loan list queries.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, UserId};
use crate::domain::lending::Loan;
use crate::ports::LoanRepository;

/// Read-only queries over the loan book.
pub struct ListLoansHandler {
    loans: Arc<dyn LoanRepository>,
}

impl ListLoansHandler {
    pub fn new(loans: Arc<dyn LoanRepository>) -> Self {
        Self { loans }
    }

    /// Lists loans across all borrowers, newest first.
    pub async fn list(&self, page: Page) -> Result<Vec<Loan>, DomainError> {
        self.loans.list(page).await
    }

    /// Lists the calling borrower's loans, newest first.
    pub async fn list_by_borrower(
        &self,
        borrower_id: UserId,
        page: Page,
    ) -> Result<Vec<Loan>, DomainError> {
        self.loans.list_by_borrower(&borrower_id, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLoanRepository;
    use crate::domain::foundation::LoanId;
    use crate::domain::lending::Loan;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn list_by_borrower_only_returns_that_borrowers_loans() {
        let loans = Arc::new(InMemoryLoanRepository::new());
        let borrower = UserId::new();
        let other = UserId::new();

        for owner in [borrower, other, borrower] {
            loans.seed(Loan::new(LoanId::new(), owner, 1_000, dec!(9.0), dec!(4.5)).unwrap());
        }

        let handler = ListLoansHandler::new(loans);
        let mine = handler
            .list_by_borrower(borrower, Page::default())
            .await
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|l| l.borrower_id() == borrower));

        let all = handler.list(Page::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn list_respects_limit_and_offset() {
        let loans = Arc::new(InMemoryLoanRepository::new());
        for _ in 0..15 {
            loans.seed(Loan::new(LoanId::new(), UserId::new(), 1_000, dec!(9.0), dec!(4.5)).unwrap());
        }

        let handler = ListLoansHandler::new(loans);

        // Default page caps at 10.
        assert_eq!(handler.list(Page::default()).await.unwrap().len(), 10);
        assert_eq!(handler.list(Page::new(5, 0)).await.unwrap().len(), 5);
        assert_eq!(handler.list(Page::new(10, 10)).await.unwrap().len(), 5);
    }
}
