//! Placeholder agreement letter adapter.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InvestorId, LoanId};
use crate::ports::AgreementLetterService;

/// Deterministic stand-in for the real document generation service.
///
/// Produces a stable URL per (loan, investor) pair without rendering or
/// storing any document. Replace with an adapter for the actual document
/// collaborator once one exists.
pub struct StaticAgreementLetterService {
    base_url: String,
}

impl StaticAgreementLetterService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for StaticAgreementLetterService {
    fn default() -> Self {
        Self::new("https://documents.loanbook.local")
    }
}

#[async_trait]
impl AgreementLetterService for StaticAgreementLetterService {
    async fn generate(
        &self,
        investor_id: &InvestorId,
        loan_id: &LoanId,
    ) -> Result<String, DomainError> {
        Ok(format!(
            "{}/loans/{}/agreements/{}.pdf",
            self.base_url, loan_id, investor_id
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reference_is_stable_per_loan_and_investor() {
        let service = StaticAgreementLetterService::default();
        let investor = InvestorId::new();
        let loan = LoanId::new();

        let first = service.generate(&investor, &loan).await.unwrap();
        let second = service.generate(&investor, &loan).await.unwrap();

        assert_eq!(first, second);
        assert!(first.contains(&loan.to_string()));
        assert!(first.contains(&investor.to_string()));
    }
}
