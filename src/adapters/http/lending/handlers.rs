//! HTTP handlers for the lending endpoints.
//!
//! These handlers connect axum routes to the application layer command and
//! query handlers. Caller identity arrives out-of-band in the trusted
//! `X-User-Id` header and is interpreted per endpoint: borrower for loan
//! creation and listing, employee for approval/disbursement, investor for
//! investment endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::handlers::investment::{
    CheckAvailabilityHandler, CreateInvestmentCommand, CreateInvestmentHandler,
    ListInvestmentsHandler,
};
use crate::application::handlers::loan::{
    ApproveLoanCommand, ApproveLoanHandler, CreateLoanCommand, CreateLoanHandler,
    DisburseLoanCommand, DisburseLoanHandler, ListLoansHandler,
};
use crate::application::LoanLocks;
use crate::domain::foundation::{
    DomainError, EmployeeId, InvestorId, LoanId, LoanProductId, UserId,
};
use crate::ports::{
    AgreementLetterService, EmployeeRepository, InvestmentRepository, InvestorRepository,
    LoanProductRepository, LoanRepository, UserRepository,
};

use super::dto::{
    ApproveLoanRequest, AvailabilityResponse, CreateInvestmentRequest, CreateLoanRequest,
    DisburseLoanRequest, ErrorResponse, InvestmentResponse, ListQuery, LoanResponse,
    MessageResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct LendingAppState {
    pub loans: Arc<dyn LoanRepository>,
    pub investments: Arc<dyn InvestmentRepository>,
    pub loan_products: Arc<dyn LoanProductRepository>,
    pub users: Arc<dyn UserRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub investors: Arc<dyn InvestorRepository>,
    pub agreement_letters: Arc<dyn AgreementLetterService>,
    pub loan_locks: Arc<LoanLocks>,
}

impl LendingAppState {
    pub fn create_loan_handler(&self) -> CreateLoanHandler {
        CreateLoanHandler::new(
            self.users.clone(),
            self.loan_products.clone(),
            self.loans.clone(),
        )
    }

    pub fn approve_loan_handler(&self) -> ApproveLoanHandler {
        ApproveLoanHandler::new(
            self.loans.clone(),
            self.employees.clone(),
            self.loan_locks.clone(),
        )
    }

    pub fn disburse_loan_handler(&self) -> DisburseLoanHandler {
        DisburseLoanHandler::new(
            self.loans.clone(),
            self.employees.clone(),
            self.loan_locks.clone(),
        )
    }

    pub fn list_loans_handler(&self) -> ListLoansHandler {
        ListLoansHandler::new(self.loans.clone())
    }

    pub fn create_investment_handler(&self) -> CreateInvestmentHandler {
        CreateInvestmentHandler::new(
            self.investors.clone(),
            self.loans.clone(),
            self.investments.clone(),
            self.agreement_letters.clone(),
            self.loan_locks.clone(),
        )
    }

    pub fn check_availability_handler(&self) -> CheckAvailabilityHandler {
        CheckAvailabilityHandler::new(self.loans.clone(), self.investments.clone())
    }

    pub fn list_investments_handler(&self) -> ListInvestmentsHandler {
        ListInvestmentsHandler::new(self.investments.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Caller Identity
// ════════════════════════════════════════════════════════════════════════════════

/// Caller identity extracted from the trusted `X-User-Id` header.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub id: Uuid,
}

/// Rejection type for Caller extraction.
pub struct IdentityRequired;

impl IntoResponse for IdentityRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::unauthorized("X-User-Id header is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = IdentityRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let id = parts
                .headers
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| Uuid::parse_str(s).ok())
                .ok_or(IdentityRequired)?;

            Ok(Caller { id })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Loan endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/loans/all - List loans across all borrowers.
pub async fn list_all_loans(
    State(state): State<LendingAppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, LendingApiError> {
    let loans = state.list_loans_handler().list(query.page()).await?;
    let response: Vec<LoanResponse> = loans.iter().map(LoanResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/loans - List the calling borrower's loans.
pub async fn list_borrower_loans(
    State(state): State<LendingAppState>,
    caller: Caller,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, LendingApiError> {
    let loans = state
        .list_loans_handler()
        .list_by_borrower(UserId::from_uuid(caller.id), query.page())
        .await?;
    let response: Vec<LoanResponse> = loans.iter().map(LoanResponse::from).collect();
    Ok(Json(response))
}

/// POST /api/loans - Create a loan proposal for the calling borrower.
pub async fn create_loan(
    State(state): State<LendingAppState>,
    caller: Caller,
    Json(request): Json<CreateLoanRequest>,
) -> Result<impl IntoResponse, LendingApiError> {
    let loan_product_id: LoanProductId = request
        .loan_product_id
        .parse()
        .map_err(|_| LendingApiError::BadRequest("Invalid loan product ID format".to_string()))?;

    let loan = state
        .create_loan_handler()
        .handle(CreateLoanCommand {
            user_id: UserId::from_uuid(caller.id),
            loan_product_id,
            principal_amount: request.amount,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(LoanResponse::from(&loan))))
}

/// PATCH /api/loans/:id/approval - Approve a proposed loan.
pub async fn approve_loan(
    State(state): State<LendingAppState>,
    Path(loan_id): Path<String>,
    caller: Caller,
    Json(request): Json<ApproveLoanRequest>,
) -> Result<impl IntoResponse, LendingApiError> {
    let loan_id = parse_loan_id(&loan_id)?;

    state
        .approve_loan_handler()
        .handle(ApproveLoanCommand {
            loan_id,
            employee_id: EmployeeId::from_uuid(caller.id),
            approval_proof: request.approval_proof,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Loan approved".to_string(),
    }))
}

/// PATCH /api/loans/:id/disbursement - Disburse an invested loan.
pub async fn disburse_loan(
    State(state): State<LendingAppState>,
    Path(loan_id): Path<String>,
    caller: Caller,
    Json(request): Json<DisburseLoanRequest>,
) -> Result<impl IntoResponse, LendingApiError> {
    let loan_id = parse_loan_id(&loan_id)?;

    state
        .disburse_loan_handler()
        .handle(DisburseLoanCommand {
            loan_id,
            employee_id: EmployeeId::from_uuid(caller.id),
            agreement_letter: request.agreement_letter,
        })
        .await?;

    Ok(Json(MessageResponse {
        message: "Loan disbursed".to_string(),
    }))
}

/// GET /api/loans/:id/availability - Remaining funding capacity.
pub async fn loan_availability(
    State(state): State<LendingAppState>,
    Path(loan_id): Path<String>,
) -> Result<impl IntoResponse, LendingApiError> {
    let loan_id = parse_loan_id(&loan_id)?;

    let available = state.check_availability_handler().handle(loan_id).await?;

    Ok(Json(AvailabilityResponse {
        loan_id: loan_id.to_string(),
        available_amount: available,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Investment endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/investments - List the calling investor's investments.
pub async fn list_investor_investments(
    State(state): State<LendingAppState>,
    caller: Caller,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, LendingApiError> {
    let investments = state
        .list_investments_handler()
        .list_by_investor(InvestorId::from_uuid(caller.id), query.page())
        .await?;
    let response: Vec<InvestmentResponse> =
        investments.iter().map(InvestmentResponse::from).collect();
    Ok(Json(response))
}

/// POST /api/investments - Commit funding from the calling investor.
pub async fn create_investment(
    State(state): State<LendingAppState>,
    caller: Caller,
    Json(request): Json<CreateInvestmentRequest>,
) -> Result<impl IntoResponse, LendingApiError> {
    let loan_id = parse_loan_id(&request.loan_id)?;

    let investment = state
        .create_investment_handler()
        .handle(CreateInvestmentCommand {
            investor_id: InvestorId::from_uuid(caller.id),
            loan_id,
            amount: request.amount,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(InvestmentResponse::from(&investment))))
}

fn parse_loan_id(raw: &str) -> Result<LoanId, LendingApiError> {
    raw.parse()
        .map_err(|_| LendingApiError::BadRequest("Invalid loan ID format".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
///
/// Domain-rule violations surface as 400 with the fixed domain message
/// verbatim; infrastructure failures surface as 500.
#[derive(Debug)]
pub enum LendingApiError {
    BadRequest(String),
    Domain(DomainError),
    Internal(String),
}

impl From<DomainError> for LendingApiError {
    fn from(err: DomainError) -> Self {
        if err.is_domain_rule() {
            LendingApiError::Domain(err)
        } else {
            LendingApiError::Internal(err.message)
        }
    }
}

impl IntoResponse for LendingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            LendingApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            LendingApiError::Domain(err) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    code: err.code.to_string(),
                    message: err.message,
                },
            ),
            LendingApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use axum::response::IntoResponse;

    #[test]
    fn domain_rule_errors_map_to_bad_request() {
        let api_err: LendingApiError = DomainError::loan_not_approved().into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_errors_map_to_internal_server_error() {
        let api_err: LendingApiError = DomainError::database("connection refused").into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_conditions_are_client_faults() {
        for err in [
            DomainError::loan_not_found(),
            DomainError::user_not_found(),
            DomainError::new(ErrorCode::InvestmentInvalidAmount, "investment amount is invalid"),
        ] {
            let api_err: LendingApiError = err.into();
            assert!(matches!(api_err, LendingApiError::Domain(_)));
        }
    }
}
