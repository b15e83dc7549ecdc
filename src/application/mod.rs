//! Application layer - orchestration of domain operations over the ports.

pub mod handlers;
mod loan_locks;

pub use loan_locks::LoanLocks;
