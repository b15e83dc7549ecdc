//! PostgreSQL implementations of the party lookup ports.
//!
//! Users, employees and investors share one table shape (id, name,
//! timestamps); each port reads its own table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, EmployeeId, InvestorId, Timestamp, UserId};
use crate::domain::lending::{Employee, Investor, User};
use crate::ports::{EmployeeRepository, InvestorRepository, UserRepository};

/// PostgreSQL implementation of the party lookup ports.
#[derive(Clone)]
pub struct PostgresPartyRepository {
    pool: PgPool,
}

impl PostgresPartyRepository {
    /// Creates a new PostgresPartyRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, table: &str, id: &Uuid) -> Result<Option<PgRow>, DomainError> {
        // Table name comes from a fixed internal set, never caller input.
        sqlx::query(&format!(
            "SELECT id, name, created_at, last_updated_at FROM {} WHERE id = $1",
            table
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("failed to fetch from {}: {}", table, e)))
    }
}

struct PartyRow {
    id: Uuid,
    name: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

fn row_to_party(row: PgRow) -> Result<PartyRow, DomainError> {
    let id: Uuid = try_column(row.try_get("id"))?;
    let name: String = try_column(row.try_get("name"))?;
    let created_at: DateTime<Utc> = try_column(row.try_get("created_at"))?;
    let updated_at: DateTime<Utc> = try_column(row.try_get("last_updated_at"))?;
    Ok(PartyRow {
        id,
        name,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

fn try_column<T>(result: Result<T, sqlx::Error>) -> Result<T, DomainError> {
    result.map_err(|e| DomainError::database(format!("bad party row: {}", e)))
}

#[async_trait]
impl UserRepository for PostgresPartyRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        match self.fetch("users", id.as_uuid()).await? {
            Some(row) => {
                let party = row_to_party(row)?;
                Ok(Some(User::reconstitute(
                    UserId::from_uuid(party.id),
                    party.name,
                    party.created_at,
                    party.updated_at,
                )))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl EmployeeRepository for PostgresPartyRepository {
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        match self.fetch("employees", id.as_uuid()).await? {
            Some(row) => {
                let party = row_to_party(row)?;
                Ok(Some(Employee::reconstitute(
                    EmployeeId::from_uuid(party.id),
                    party.name,
                    party.created_at,
                    party.updated_at,
                )))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl InvestorRepository for PostgresPartyRepository {
    async fn find_by_id(&self, id: &InvestorId) -> Result<Option<Investor>, DomainError> {
        match self.fetch("investors", id.as_uuid()).await? {
            Some(row) => {
                let party = row_to_party(row)?;
                Ok(Some(Investor::reconstitute(
                    InvestorId::from_uuid(party.id),
                    party.name,
                    party.created_at,
                    party.updated_at,
                )))
            }
            None => Ok(None),
        }
    }
}
