//! PostgreSQL adapters for the persistence gateway ports.

mod investment_repository;
mod loan_product_repository;
mod loan_repository;
mod party_repository;

pub use investment_repository::PostgresInvestmentRepository;
pub use loan_product_repository::PostgresLoanProductRepository;
pub use loan_repository::PostgresLoanRepository;
pub use party_repository::PostgresPartyRepository;
