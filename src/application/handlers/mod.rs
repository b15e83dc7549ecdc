//! Application layer command and query handlers.

pub mod investment;
pub mod loan;
