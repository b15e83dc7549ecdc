//! HTTP DTOs (Data Transfer Objects) for the lending endpoints.
//!
//! These types define the JSON request/response structure of the API and
//! form the boundary between HTTP and the application layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Page;
use crate::domain::lending::{Investment, Loan, LoanState};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Limit/offset query parameters for list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListQuery {
    /// Converts to a page window, defaulting the limit to 10.
    pub fn page(&self) -> Page {
        Page::new(self.limit.unwrap_or(0), self.offset.unwrap_or(0))
    }
}

/// Request to create a loan proposal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLoanRequest {
    /// Product template to copy rate/roi from.
    pub loan_product_id: String,
    /// Principal in the smallest currency unit.
    pub amount: i64,
}

/// Request to approve a proposed loan.
#[derive(Debug, Clone, Deserialize)]
pub struct ApproveLoanRequest {
    /// Reference to the field-visit proof document.
    pub approval_proof: String,
}

/// Request to disburse an invested loan.
#[derive(Debug, Clone, Deserialize)]
pub struct DisburseLoanRequest {
    /// Reference to the borrower-signed agreement letter.
    pub agreement_letter: String,
}

/// Request to commit an investment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvestmentRequest {
    pub loan_id: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Full loan record.
#[derive(Debug, Clone, Serialize)]
pub struct LoanResponse {
    pub id: String,
    pub state: LoanState,
    pub borrower_id: String,
    pub principal_amount: i64,
    pub rate: Decimal,
    pub roi: Decimal,
    pub approval_proof: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub agreement_letter: Option<String>,
    pub disbursed_by: Option<String>,
    pub disbursed_at: Option<String>,
    pub invested_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Loan> for LoanResponse {
    fn from(loan: &Loan) -> Self {
        Self {
            id: loan.id().to_string(),
            state: loan.state(),
            borrower_id: loan.borrower_id().to_string(),
            principal_amount: loan.principal_amount(),
            rate: loan.rate(),
            roi: loan.roi(),
            approval_proof: loan.approval().map(|a| a.proof.clone()),
            approved_by: loan.approval().map(|a| a.approved_by.to_string()),
            approved_at: loan.approval().map(|a| a.approved_at.to_string()),
            agreement_letter: loan.disbursement().map(|d| d.agreement_letter.clone()),
            disbursed_by: loan.disbursement().map(|d| d.disbursed_by.to_string()),
            disbursed_at: loan.disbursement().map(|d| d.disbursed_at.to_string()),
            invested_at: loan.invested_at().map(|t| t.to_string()),
            created_at: loan.created_at().to_string(),
            updated_at: loan.updated_at().to_string(),
        }
    }
}

/// Committed investment record.
#[derive(Debug, Clone, Serialize)]
pub struct InvestmentResponse {
    pub id: String,
    pub loan_id: String,
    pub investor_id: String,
    pub amount: i64,
    pub agreement_letter: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Investment> for InvestmentResponse {
    fn from(investment: &Investment) -> Self {
        Self {
            id: investment.id().to_string(),
            loan_id: investment.loan_id().to_string(),
            investor_id: investment.investor_id().to_string(),
            amount: investment.amount(),
            agreement_letter: investment.agreement_letter().to_string(),
            created_at: investment.created_at().to_string(),
            updated_at: investment.updated_at().to_string(),
        }
    }
}

/// Remaining funding capacity of a loan.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub loan_id: String,
    pub available_amount: i64,
}

/// Confirmation message for state-changing endpoints with no body to return.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
