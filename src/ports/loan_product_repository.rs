//! Loan product repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LoanProductId};
use crate::domain::lending::LoanProduct;

/// Read-only port for loan product templates.
#[async_trait]
pub trait LoanProductRepository: Send + Sync {
    /// Find a product by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &LoanProductId) -> Result<Option<LoanProduct>, DomainError>;
}
