//! Document adapters.

mod static_letter_service;

pub use static_letter_service::StaticAgreementLetterService;
