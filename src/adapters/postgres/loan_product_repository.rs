//! PostgreSQL implementation of LoanProductRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, LoanProductId, Timestamp};
use crate::domain::lending::LoanProduct;
use crate::ports::LoanProductRepository;

/// PostgreSQL implementation of LoanProductRepository.
#[derive(Clone)]
pub struct PostgresLoanProductRepository {
    pool: PgPool,
}

impl PostgresLoanProductRepository {
    /// Creates a new PostgresLoanProductRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanProductRepository for PostgresLoanProductRepository {
    async fn find_by_id(&self, id: &LoanProductId) -> Result<Option<LoanProduct>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, rate, roi, created_at, last_updated_at
            FROM loan_products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch loan product: {}", e)))?;

        match row {
            Some(row) => {
                let id: Uuid = try_column(row.try_get("id"))?;
                let name: String = try_column(row.try_get("name"))?;
                let rate: Decimal = try_column(row.try_get("rate"))?;
                let roi: Decimal = try_column(row.try_get("roi"))?;
                let created_at: DateTime<Utc> = try_column(row.try_get("created_at"))?;
                let updated_at: DateTime<Utc> = try_column(row.try_get("last_updated_at"))?;

                Ok(Some(LoanProduct::reconstitute(
                    LoanProductId::from_uuid(id),
                    name,
                    rate,
                    roi,
                    Timestamp::from_datetime(created_at),
                    Timestamp::from_datetime(updated_at),
                )))
            }
            None => Ok(None),
        }
    }
}

fn try_column<T>(result: Result<T, sqlx::Error>) -> Result<T, DomainError> {
    result.map_err(|e| DomainError::database(format!("bad loan product row: {}", e)))
}
