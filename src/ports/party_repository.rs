//! Lookup ports for the identity records referenced by loans.
//!
//! The engine resolves users, employees and investors by id before acting on
//! their behalf, and never writes them.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EmployeeId, InvestorId, UserId};
use crate::domain::lending::{Employee, Investor, User};

/// Read-only port for borrowing users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}

/// Read-only port for back-office employees.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find an employee by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError>;
}

/// Read-only port for investors.
#[async_trait]
pub trait InvestorRepository: Send + Sync {
    /// Find an investor by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &InvestorId) -> Result<Option<Investor>, DomainError>;
}
