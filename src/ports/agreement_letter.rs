//! Agreement letter generation port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InvestorId, LoanId};

/// Port for the document collaborator that produces investor agreement
/// letters.
///
/// The engine only stores the returned reference; generation, storage and
/// delivery of the document itself live behind this seam.
#[async_trait]
pub trait AgreementLetterService: Send + Sync {
    /// Generate the agreement letter for one investor's commitment against a
    /// loan, returning a reference (URL) to the document.
    async fn generate(
        &self,
        investor_id: &InvestorId,
        loan_id: &LoanId,
    ) -> Result<String, DomainError>;
}
