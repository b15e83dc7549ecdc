//! Identity records for the parties involved in a loan.
//!
//! Users (borrowers), employees and investors are opaque records owned by an
//! upstream identity system. The lifecycle engine only resolves them by id
//! and never mutates them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmployeeId, InvestorId, Timestamp, UserId};

/// A borrowing user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl User {
    pub fn new(id: UserId, name: String) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn reconstitute(
        id: UserId,
        name: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

/// A back-office employee who gates approval and disbursement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Employee {
    pub fn new(id: EmployeeId, name: String) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn reconstitute(
        id: EmployeeId,
        name: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

/// An investor funding loans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investor {
    id: InvestorId,
    name: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Investor {
    pub fn new(id: InvestorId, name: String) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn reconstitute(
        id: InvestorId,
        name: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> InvestorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
