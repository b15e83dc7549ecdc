//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! lifecycle engine and the outside world. Adapters implement these ports.
//!
//! The persistence gateway is split per entity kind: loans, investments,
//! loan products and the three identity record kinds. The agreement letter
//! generator is the one non-storage collaborator.

mod agreement_letter;
mod investment_repository;
mod loan_product_repository;
mod loan_repository;
mod party_repository;

pub use agreement_letter::AgreementLetterService;
pub use investment_repository::InvestmentRepository;
pub use loan_product_repository::LoanProductRepository;
pub use loan_repository::LoanRepository;
pub use party_repository::{EmployeeRepository, InvestorRepository, UserRepository};
