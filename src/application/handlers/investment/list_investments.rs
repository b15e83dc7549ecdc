//! Investment list queries.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, InvestorId, Page};
use crate::domain::lending::Investment;
use crate::ports::InvestmentRepository;

/// Read-only queries over committed investments.
pub struct ListInvestmentsHandler {
    investments: Arc<dyn InvestmentRepository>,
}

impl ListInvestmentsHandler {
    pub fn new(investments: Arc<dyn InvestmentRepository>) -> Self {
        Self { investments }
    }

    /// Lists the calling investor's investments, newest first.
    pub async fn list_by_investor(
        &self,
        investor_id: InvestorId,
        page: Page,
    ) -> Result<Vec<Investment>, DomainError> {
        self.investments.list_by_investor(&investor_id, page).await
    }
}
