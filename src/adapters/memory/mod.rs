//! In-memory adapters for tests and local runs.

mod repositories;

pub use repositories::{
    InMemoryInvestmentRepository, InMemoryLoanProductRepository, InMemoryLoanRepository,
    InMemoryPartyDirectory,
};
