//! HTTP adapter for the lending API.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{Caller, LendingApiError, LendingAppState};
pub use routes::lending_router;
