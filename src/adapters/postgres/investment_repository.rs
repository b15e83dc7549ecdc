//! PostgreSQL implementation of InvestmentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, InvestmentId, InvestorId, LoanId, Page, Timestamp,
};
use crate::domain::lending::Investment;
use crate::ports::InvestmentRepository;

/// PostgreSQL implementation of InvestmentRepository.
#[derive(Clone)]
pub struct PostgresInvestmentRepository {
    pool: PgPool,
}

impl PostgresInvestmentRepository {
    /// Creates a new PostgresInvestmentRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvestmentRepository for PostgresInvestmentRepository {
    async fn save(&self, investment: &Investment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO investments (
                id, loan_id, investor_id, amount, agreement_letter,
                created_at, last_updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(investment.id().as_uuid())
        .bind(investment.loan_id().as_uuid())
        .bind(investment.investor_id().as_uuid())
        .bind(investment.amount())
        .bind(investment.agreement_letter())
        .bind(investment.created_at().as_datetime())
        .bind(investment.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to insert investment: {}", e)))?;

        Ok(())
    }

    async fn list_by_loan(&self, loan_id: &LoanId) -> Result<Vec<Investment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, loan_id, investor_id, amount, agreement_letter,
                   created_at, last_updated_at
            FROM investments
            WHERE loan_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(loan_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to list investments: {}", e)))?;

        rows.into_iter().map(row_to_investment).collect()
    }

    async fn list_by_investor(
        &self,
        investor_id: &InvestorId,
        page: Page,
    ) -> Result<Vec<Investment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, loan_id, investor_id, amount, agreement_letter,
                   created_at, last_updated_at
            FROM investments
            WHERE investor_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(investor_id.as_uuid())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to list investments: {}", e)))?;

        rows.into_iter().map(row_to_investment).collect()
    }
}

fn row_to_investment(row: PgRow) -> Result<Investment, DomainError> {
    let id: Uuid = get(&row, "id")?;
    let loan_id: Uuid = get(&row, "loan_id")?;
    let investor_id: Uuid = get(&row, "investor_id")?;
    let amount: i64 = get(&row, "amount")?;
    let agreement_letter: String = get(&row, "agreement_letter")?;
    let created_at: DateTime<Utc> = get(&row, "created_at")?;
    let last_updated_at: DateTime<Utc> = get(&row, "last_updated_at")?;

    Ok(Investment::reconstitute(
        InvestmentId::from_uuid(id),
        InvestorId::from_uuid(investor_id),
        LoanId::from_uuid(loan_id),
        amount,
        agreement_letter,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(last_updated_at),
    ))
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column).map_err(|e| {
        DomainError::database(format!("bad investment row column '{}': {}", column, e))
    })
}
