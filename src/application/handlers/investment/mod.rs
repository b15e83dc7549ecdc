//! Investment command and query handlers.

mod check_availability;
mod create_investment;
mod list_investments;

pub use check_availability::CheckAvailabilityHandler;
pub use create_investment::{CreateInvestmentCommand, CreateInvestmentHandler};
pub use list_investments::ListInvestmentsHandler;
