//! Foundation value objects shared across the domain.

mod errors;
mod ids;
mod pagination;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{EmployeeId, InvestmentId, InvestorId, LoanId, LoanProductId, UserId};
pub use pagination::{Page, DEFAULT_PAGE_LIMIT};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
