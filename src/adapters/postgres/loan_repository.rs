//! PostgreSQL implementation of LoanRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, EmployeeId, LoanId, Page, Timestamp, UserId};
use crate::domain::lending::{Approval, Disbursement, Loan, LoanState};
use crate::ports::LoanRepository;

/// PostgreSQL implementation of LoanRepository.
#[derive(Clone)]
pub struct PostgresLoanRepository {
    pool: PgPool,
}

impl PostgresLoanRepository {
    /// Creates a new PostgresLoanRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const LOAN_COLUMNS: &str = r#"
    id, state, borrower_id, principal_amount, rate, roi,
    approval_proof, approved_by, approved_at,
    agreement_letter, disbursed_by, disbursed_at,
    invested_at, created_at, last_updated_at
"#;

#[async_trait]
impl LoanRepository for PostgresLoanRepository {
    async fn save(&self, loan: &Loan) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO loans (
                id, state, borrower_id, principal_amount, rate, roi,
                approval_proof, approved_by, approved_at,
                agreement_letter, disbursed_by, disbursed_at,
                invested_at, created_at, last_updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(loan.id().as_uuid())
        .bind(loan.state().as_str())
        .bind(loan.borrower_id().as_uuid())
        .bind(loan.principal_amount())
        .bind(loan.rate())
        .bind(loan.roi())
        .bind(loan.approval().map(|a| a.proof.clone()))
        .bind(loan.approval().map(|a| *a.approved_by.as_uuid()))
        .bind(loan.approval().map(|a| *a.approved_at.as_datetime()))
        .bind(loan.disbursement().map(|d| d.agreement_letter.clone()))
        .bind(loan.disbursement().map(|d| *d.disbursed_by.as_uuid()))
        .bind(loan.disbursement().map(|d| *d.disbursed_at.as_datetime()))
        .bind(loan.invested_at().map(|t| *t.as_datetime()))
        .bind(loan.created_at().as_datetime())
        .bind(loan.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to insert loan: {}", e)))?;

        Ok(())
    }

    async fn update(&self, loan: &Loan) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE loans SET
                state = $2,
                borrower_id = $3,
                principal_amount = $4,
                rate = $5,
                roi = $6,
                approval_proof = $7,
                approved_by = $8,
                approved_at = $9,
                agreement_letter = $10,
                disbursed_by = $11,
                disbursed_at = $12,
                invested_at = $13,
                last_updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(loan.id().as_uuid())
        .bind(loan.state().as_str())
        .bind(loan.borrower_id().as_uuid())
        .bind(loan.principal_amount())
        .bind(loan.rate())
        .bind(loan.roi())
        .bind(loan.approval().map(|a| a.proof.clone()))
        .bind(loan.approval().map(|a| *a.approved_by.as_uuid()))
        .bind(loan.approval().map(|a| *a.approved_at.as_datetime()))
        .bind(loan.disbursement().map(|d| d.agreement_letter.clone()))
        .bind(loan.disbursement().map(|d| *d.disbursed_by.as_uuid()))
        .bind(loan.disbursement().map(|d| *d.disbursed_at.as_datetime()))
        .bind(loan.invested_at().map(|t| *t.as_datetime()))
        .bind(loan.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to update loan: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::loan_not_found());
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &LoanId) -> Result<Option<Loan>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM loans WHERE id = $1", LOAN_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to fetch loan: {}", e)))?;

        row.map(row_to_loan).transpose()
    }

    async fn list(&self, page: Page) -> Result<Vec<Loan>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM loans ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            LOAN_COLUMNS
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to list loans: {}", e)))?;

        rows.into_iter().map(row_to_loan).collect()
    }

    async fn list_by_borrower(
        &self,
        borrower_id: &UserId,
        page: Page,
    ) -> Result<Vec<Loan>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM loans WHERE borrower_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            LOAN_COLUMNS
        ))
        .bind(borrower_id.as_uuid())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to list loans: {}", e)))?;

        rows.into_iter().map(row_to_loan).collect()
    }
}

fn row_to_loan(row: PgRow) -> Result<Loan, DomainError> {
    let id: Uuid = get(&row, "id")?;
    let state: String = get(&row, "state")?;
    let borrower_id: Uuid = get(&row, "borrower_id")?;
    let principal_amount: i64 = get(&row, "principal_amount")?;
    let rate: Decimal = get(&row, "rate")?;
    let roi: Decimal = get(&row, "roi")?;

    let approval_proof: Option<String> = get(&row, "approval_proof")?;
    let approved_by: Option<Uuid> = get(&row, "approved_by")?;
    let approved_at: Option<DateTime<Utc>> = get(&row, "approved_at")?;
    let agreement_letter: Option<String> = get(&row, "agreement_letter")?;
    let disbursed_by: Option<Uuid> = get(&row, "disbursed_by")?;
    let disbursed_at: Option<DateTime<Utc>> = get(&row, "disbursed_at")?;
    let invested_at: Option<DateTime<Utc>> = get(&row, "invested_at")?;
    let created_at: DateTime<Utc> = get(&row, "created_at")?;
    let last_updated_at: DateTime<Utc> = get(&row, "last_updated_at")?;

    // Approval and disbursement metadata are written all-or-none; a row with
    // only some of the columns set is corrupt.
    let approval = match (approval_proof, approved_by, approved_at) {
        (Some(proof), Some(by), Some(at)) => Some(Approval {
            proof,
            approved_by: EmployeeId::from_uuid(by),
            approved_at: Timestamp::from_datetime(at),
        }),
        (None, None, None) => None,
        _ => {
            return Err(DomainError::database(format!(
                "loan {} has partial approval metadata",
                id
            )))
        }
    };

    let disbursement = match (agreement_letter, disbursed_by, disbursed_at) {
        (Some(letter), Some(by), Some(at)) => Some(Disbursement {
            agreement_letter: letter,
            disbursed_by: EmployeeId::from_uuid(by),
            disbursed_at: Timestamp::from_datetime(at),
        }),
        (None, None, None) => None,
        _ => {
            return Err(DomainError::database(format!(
                "loan {} has partial disbursement metadata",
                id
            )))
        }
    };

    Ok(Loan::reconstitute(
        LoanId::from_uuid(id),
        state.parse::<LoanState>()?,
        UserId::from_uuid(borrower_id),
        principal_amount,
        rate,
        roi,
        approval,
        disbursement,
        invested_at.map(Timestamp::from_datetime),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(last_updated_at),
    ))
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::database(format!("bad loan row column '{}': {}", column, e)))
}
