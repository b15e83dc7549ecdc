//! Loan lifecycle command and query handlers.

mod approve_loan;
mod create_loan;
mod disburse_loan;
mod list_loans;

pub use approve_loan::{ApproveLoanCommand, ApproveLoanHandler};
pub use create_loan::{CreateLoanCommand, CreateLoanHandler};
pub use disburse_loan::{DisburseLoanCommand, DisburseLoanHandler};
pub use list_loans::ListLoansHandler;
