//! CreateLoanHandler - Command handler for proposing new loans.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, LoanId, LoanProductId, UserId};
use crate::domain::lending::Loan;
use crate::ports::{LoanProductRepository, LoanRepository, UserRepository};

/// Command to create a new loan proposal.
#[derive(Debug, Clone)]
pub struct CreateLoanCommand {
    /// Borrowing user requesting the loan.
    pub user_id: UserId,
    /// Product template supplying rate and roi.
    pub loan_product_id: LoanProductId,
    /// Requested principal in the smallest currency unit.
    pub principal_amount: i64,
}

/// Handler for creating loans.
pub struct CreateLoanHandler {
    users: Arc<dyn UserRepository>,
    loan_products: Arc<dyn LoanProductRepository>,
    loans: Arc<dyn LoanRepository>,
}

impl CreateLoanHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        loan_products: Arc<dyn LoanProductRepository>,
        loans: Arc<dyn LoanRepository>,
    ) -> Self {
        Self {
            users,
            loan_products,
            loans,
        }
    }

    /// Creates a loan in Proposed state, copying rate/roi from the product.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` / `LoanProductNotFound` if either lookup misses
    /// - `ValidationFailed` if the principal is not positive
    /// - `DatabaseError` if persistence fails
    pub async fn handle(&self, cmd: CreateLoanCommand) -> Result<Loan, DomainError> {
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(DomainError::user_not_found)?;

        let product = self
            .loan_products
            .find_by_id(&cmd.loan_product_id)
            .await?
            .ok_or_else(DomainError::loan_product_not_found)?;

        let loan = Loan::new(
            LoanId::new(),
            user.id(),
            cmd.principal_amount,
            product.rate(),
            product.roi(),
        )?;

        self.loans.save(&loan).await?;

        tracing::info!(loan_id = %loan.id(), borrower_id = %loan.borrower_id(), "loan proposed");

        Ok(loan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryLoanProductRepository, InMemoryLoanRepository, InMemoryPartyDirectory,
    };
    use crate::domain::foundation::{ErrorCode, LoanProductId};
    use crate::domain::lending::{LoanProduct, LoanState, User};
    use rust_decimal_macros::dec;

    fn handler_with_fixtures() -> (CreateLoanHandler, UserId, LoanProductId, Arc<InMemoryLoanRepository>) {
        let directory = Arc::new(InMemoryPartyDirectory::new());
        let products = Arc::new(InMemoryLoanProductRepository::new());
        let loans = Arc::new(InMemoryLoanRepository::new());

        let user = User::new(UserId::new(), "Budi".to_string());
        let user_id = user.id();
        directory.insert_user(user);

        let product = LoanProduct::new(
            LoanProductId::new(),
            "Working capital".to_string(),
            dec!(10.0),
            dec!(5.5),
        );
        let product_id = product.id();
        products.insert(product);

        let handler = CreateLoanHandler::new(directory, products, loans.clone());
        (handler, user_id, product_id, loans)
    }

    #[tokio::test]
    async fn creates_proposed_loan_from_product_template() {
        let (handler, user_id, product_id, loans) = handler_with_fixtures();

        let loan = handler
            .handle(CreateLoanCommand {
                user_id,
                loan_product_id: product_id,
                principal_amount: 1_000_000,
            })
            .await
            .unwrap();

        assert_eq!(loan.state(), LoanState::Proposed);
        assert_eq!(loan.borrower_id(), user_id);
        assert_eq!(loan.principal_amount(), 1_000_000);
        assert_eq!(loan.rate(), dec!(10.0));
        assert_eq!(loan.roi(), dec!(5.5));

        let persisted = loans.find_by_id(&loan.id()).await.unwrap();
        assert_eq!(persisted, Some(loan));
    }

    #[tokio::test]
    async fn unknown_user_fails_user_not_found() {
        let (handler, _, product_id, loans) = handler_with_fixtures();

        let err = handler
            .handle(CreateLoanCommand {
                user_id: UserId::new(),
                loan_product_id: product_id,
                principal_amount: 1_000,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UserNotFound);
        assert!(loans.list(Default::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_product_fails_loan_product_not_found() {
        let (handler, user_id, _, _) = handler_with_fixtures();

        let err = handler
            .handle(CreateLoanCommand {
                user_id,
                loan_product_id: LoanProductId::new(),
                principal_amount: 1_000,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::LoanProductNotFound);
    }

    #[tokio::test]
    async fn non_positive_principal_is_rejected_before_persisting() {
        let (handler, user_id, product_id, loans) = handler_with_fixtures();

        let err = handler
            .handle(CreateLoanCommand {
                user_id,
                loan_product_id: product_id,
                principal_amount: 0,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(loans.list(Default::default()).await.unwrap().is_empty());
    }
}
