//! Route configuration for the lending endpoints.

use axum::routing::{get, patch};
use axum::Router;

use super::handlers::{
    approve_loan, create_investment, create_loan, disburse_loan, list_all_loans,
    list_borrower_loans, list_investor_investments, loan_availability, LendingAppState,
};

/// Creates the lending router with all endpoints.
///
/// Routes:
/// - `GET /api/loans/all` - List loans across all borrowers
/// - `GET /api/loans` - List the calling borrower's loans
/// - `POST /api/loans` - Create a loan proposal
/// - `PATCH /api/loans/:id/approval` - Approve a proposed loan
/// - `PATCH /api/loans/:id/disbursement` - Disburse an invested loan
/// - `GET /api/loans/:id/availability` - Remaining funding capacity
/// - `GET /api/investments` - List the calling investor's investments
/// - `POST /api/investments` - Commit an investment
pub fn lending_router() -> Router<LendingAppState> {
    Router::new()
        .route("/api/loans/all", get(list_all_loans))
        .route("/api/loans", get(list_borrower_loans).post(create_loan))
        .route("/api/loans/:id/approval", patch(approve_loan))
        .route("/api/loans/:id/disbursement", patch(disburse_loan))
        .route("/api/loans/:id/availability", get(loan_availability))
        .route(
            "/api/investments",
            get(list_investor_investments).post(create_investment),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::StaticAgreementLetterService;
    use crate::adapters::memory::{
        InMemoryInvestmentRepository, InMemoryLoanProductRepository, InMemoryLoanRepository,
        InMemoryPartyDirectory,
    };
    use crate::application::LoanLocks;
    use crate::domain::foundation::{EmployeeId, InvestorId, LoanProductId, UserId};
    use crate::domain::lending::{Employee, Investor, LoanProduct, User};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct TestWorld {
        app: Router,
        user_id: UserId,
        employee_id: EmployeeId,
        investor_id: InvestorId,
        product_id: LoanProductId,
    }

    fn test_world() -> TestWorld {
        let loans = Arc::new(InMemoryLoanRepository::new());
        let investments = Arc::new(InMemoryInvestmentRepository::new());
        let products = Arc::new(InMemoryLoanProductRepository::new());
        let directory = Arc::new(InMemoryPartyDirectory::new());

        let user = User::new(UserId::new(), "Budi".to_string());
        let user_id = user.id();
        directory.insert_user(user);

        let employee = Employee::new(EmployeeId::new(), "Sari".to_string());
        let employee_id = employee.id();
        directory.insert_employee(employee);

        let investor = Investor::new(InvestorId::new(), "Ina".to_string());
        let investor_id = investor.id();
        directory.insert_investor(investor);

        let product = LoanProduct::new(
            LoanProductId::new(),
            "Working capital".to_string(),
            dec!(10.0),
            dec!(5.5),
        );
        let product_id = product.id();
        products.insert(product);

        let state = LendingAppState {
            loans,
            investments,
            loan_products: products,
            users: directory.clone(),
            employees: directory.clone(),
            investors: directory,
            agreement_letters: Arc::new(StaticAgreementLetterService::default()),
            loan_locks: Arc::new(LoanLocks::new()),
        };

        TestWorld {
            app: lending_router().with_state(state),
            user_id,
            employee_id,
            investor_id,
            product_id,
        }
    }

    fn request(method: Method, uri: &str, caller: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("X-User-Id", caller)
            .header(header::CONTENT_TYPE, "application/json");
        match body {
            Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_loan_returns_201_with_full_record() {
        let world = test_world();

        let response = world
            .app
            .oneshot(request(
                Method::POST,
                "/api/loans",
                &world.user_id.to_string(),
                Some(json!({
                    "loan_product_id": world.product_id.to_string(),
                    "amount": 1_000_000,
                })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["state"], "proposed");
        assert_eq!(body["principal_amount"], 1_000_000);
        assert_eq!(body["borrower_id"], world.user_id.to_string());
        assert!(body["id"].as_str().is_some());
    }

    #[tokio::test]
    async fn full_lifecycle_over_http() {
        let world = test_world();

        // Propose
        let response = world
            .app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/loans",
                &world.user_id.to_string(),
                Some(json!({
                    "loan_product_id": world.product_id.to_string(),
                    "amount": 1_000,
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let loan_id = body_json(response).await["id"].as_str().unwrap().to_string();

        // Approve
        let response = world
            .app
            .clone()
            .oneshot(request(
                Method::PATCH,
                &format!("/api/loans/{}/approval", loan_id),
                &world.employee_id.to_string(),
                Some(json!({ "approval_proof": "https://docs/proof.jpg" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Availability shows the full principal
        let response = world
            .app
            .clone()
            .oneshot(request(
                Method::GET,
                &format!("/api/loans/{}/availability", loan_id),
                &world.user_id.to_string(),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["available_amount"], 1_000);

        // Fully fund
        let response = world
            .app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/investments",
                &world.investor_id.to_string(),
                Some(json!({ "loan_id": loan_id, "amount": 1_000 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // Disburse
        let response = world
            .app
            .clone()
            .oneshot(request(
                Method::PATCH,
                &format!("/api/loans/{}/disbursement", loan_id),
                &world.employee_id.to_string(),
                Some(json!({ "agreement_letter": "https://docs/signed.pdf" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Loan listing reflects the terminal state
        let response = world
            .app
            .oneshot(request(
                Method::GET,
                "/api/loans",
                &world.user_id.to_string(),
                None,
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body[0]["state"], "disbursed");
    }

    #[tokio::test]
    async fn approving_twice_returns_400_with_verbatim_message() {
        let world = test_world();

        let response = world
            .app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/loans",
                &world.user_id.to_string(),
                Some(json!({
                    "loan_product_id": world.product_id.to_string(),
                    "amount": 1_000,
                })),
            ))
            .await
            .unwrap();
        let loan_id = body_json(response).await["id"].as_str().unwrap().to_string();

        for _ in 0..2 {
            let response = world
                .app
                .clone()
                .oneshot(request(
                    Method::PATCH,
                    &format!("/api/loans/{}/approval", loan_id),
                    &world.employee_id.to_string(),
                    Some(json!({ "approval_proof": "proof" })),
                ))
                .await
                .unwrap();
            if response.status() == StatusCode::OK {
                continue;
            }
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_json(response).await;
            assert_eq!(body["code"], "LOAN_NOT_PROPOSED");
            assert_eq!(body["message"], "loan not proposed");
        }
    }

    #[tokio::test]
    async fn missing_identity_header_returns_401() {
        let world = test_world();

        let response = world
            .app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/loans")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_loan_id_returns_400() {
        let world = test_world();

        let response = world
            .app
            .oneshot(request(
                Method::GET,
                "/api/loans/not-a-uuid/availability",
                &world.user_id.to_string(),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
