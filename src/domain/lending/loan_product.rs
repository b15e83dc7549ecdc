//! Loan product template.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{LoanProductId, Timestamp};

/// Immutable template whose rate and roi are copied onto a loan at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProduct {
    id: LoanProductId,
    name: String,
    rate: Decimal,
    roi: Decimal,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl LoanProduct {
    pub fn new(id: LoanProductId, name: String, rate: Decimal, roi: Decimal) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            name,
            rate,
            roi,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a product from persistence.
    pub fn reconstitute(
        id: LoanProductId,
        name: String,
        rate: Decimal,
        roi: Decimal,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            rate,
            roi,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> LoanProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn roi(&self) -> Decimal {
        self.roi
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
