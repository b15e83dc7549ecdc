//! Error types for the domain layer.

use std::error::Error;
use std::fmt;

/// Error codes for the closed set of lending domain conditions, plus the
/// infrastructure codes the adapters translate storage failures into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    LoanNotFound,
    LoanProductNotFound,
    InvestmentNotFound,
    UserNotFound,
    EmployeeNotFound,
    InvestorNotFound,

    // Lifecycle precondition errors
    LoanNotProposed,
    LoanNotApproved,
    LoanNotInvested,

    // Funding errors
    InvestmentInvalidAmount,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Whether this code names a domain-rule violation (client fault).
    ///
    /// Domain-rule failures are terminal for the current call and not
    /// retryable without changed input. Infrastructure failures may be
    /// retried by resubmission. The HTTP boundary uses this to pick a
    /// status code instead of inspecting concrete error types.
    pub fn is_domain_rule(&self) -> bool {
        !matches!(self, ErrorCode::DatabaseError | ErrorCode::InternalError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::LoanNotFound => "LOAN_NOT_FOUND",
            ErrorCode::LoanProductNotFound => "LOAN_PRODUCT_NOT_FOUND",
            ErrorCode::InvestmentNotFound => "INVESTMENT_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            ErrorCode::InvestorNotFound => "INVESTOR_NOT_FOUND",
            ErrorCode::LoanNotProposed => "LOAN_NOT_PROPOSED",
            ErrorCode::LoanNotApproved => "LOAN_NOT_APPROVED",
            ErrorCode::LoanNotInvested => "LOAN_NOT_INVESTED",
            ErrorCode::InvestmentInvalidAmount => "INVESTMENT_INVALID_AMOUNT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code and message.
///
/// The named domain conditions carry fixed messages which must reach the
/// caller verbatim; use the dedicated constructors for those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn loan_not_found() -> Self {
        Self::new(ErrorCode::LoanNotFound, "loan not found")
    }

    pub fn loan_product_not_found() -> Self {
        Self::new(ErrorCode::LoanProductNotFound, "loan product not found")
    }

    pub fn investment_not_found() -> Self {
        Self::new(ErrorCode::InvestmentNotFound, "investment not found")
    }

    pub fn user_not_found() -> Self {
        Self::new(ErrorCode::UserNotFound, "user not found")
    }

    pub fn employee_not_found() -> Self {
        Self::new(ErrorCode::EmployeeNotFound, "employee not found")
    }

    pub fn investor_not_found() -> Self {
        Self::new(ErrorCode::InvestorNotFound, "investor not found")
    }

    pub fn loan_not_proposed() -> Self {
        Self::new(ErrorCode::LoanNotProposed, "loan not proposed")
    }

    pub fn loan_not_approved() -> Self {
        Self::new(ErrorCode::LoanNotApproved, "loan not approved")
    }

    pub fn loan_not_invested() -> Self {
        Self::new(ErrorCode::LoanNotInvested, "loan not invested")
    }

    pub fn investment_invalid_amount() -> Self {
        Self::new(
            ErrorCode::InvestmentInvalidAmount,
            "investment amount is invalid",
        )
    }

    /// Creates an infrastructure error for a failed storage call.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Whether this error is a domain-rule violation rather than an
    /// infrastructure failure.
    pub fn is_domain_rule(&self) -> bool {
        self.code.is_domain_rule()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_conditions_carry_fixed_messages() {
        assert_eq!(DomainError::loan_not_proposed().message, "loan not proposed");
        assert_eq!(DomainError::loan_not_approved().message, "loan not approved");
        assert_eq!(DomainError::loan_not_invested().message, "loan not invested");
        assert_eq!(DomainError::loan_not_found().message, "loan not found");
        assert_eq!(
            DomainError::loan_product_not_found().message,
            "loan product not found"
        );
        assert_eq!(
            DomainError::investment_not_found().message,
            "investment not found"
        );
        assert_eq!(
            DomainError::investment_invalid_amount().message,
            "investment amount is invalid"
        );
        assert_eq!(DomainError::user_not_found().message, "user not found");
        assert_eq!(DomainError::employee_not_found().message, "employee not found");
        assert_eq!(DomainError::investor_not_found().message, "investor not found");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::loan_not_found();
        assert_eq!(format!("{}", err), "[LOAN_NOT_FOUND] loan not found");
    }

    #[test]
    fn domain_rule_codes_are_client_faults() {
        assert!(DomainError::loan_not_proposed().is_domain_rule());
        assert!(DomainError::investment_invalid_amount().is_domain_rule());
        assert!(DomainError::user_not_found().is_domain_rule());
        assert!(!DomainError::database("connection reset").is_domain_rule());
        assert!(!DomainError::new(ErrorCode::InternalError, "boom").is_domain_rule());
    }
}
