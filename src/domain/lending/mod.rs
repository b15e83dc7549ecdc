//! Lending domain: the loan lifecycle and its funding ledger.

mod investment;
mod loan;
mod loan_product;
mod party;

pub use investment::Investment;
pub use loan::{Approval, Disbursement, Loan, LoanState};
pub use loan_product::LoanProduct;
pub use party::{Employee, Investor, User};
