//! In-memory repository implementations.
//!
//! Deterministic, lock-based stores for unit and integration tests (and
//! local runs without PostgreSQL). Methods panic if the internal locks are
//! poisoned, which is acceptable for test code; production deployments use
//! the postgres adapters.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{
    DomainError, EmployeeId, InvestorId, LoanId, LoanProductId, Page, UserId,
};
use crate::domain::lending::{Employee, Investment, Investor, Loan, LoanProduct, User};
use crate::ports::{
    EmployeeRepository, InvestmentRepository, InvestorRepository, LoanProductRepository,
    LoanRepository, UserRepository,
};

fn paginate<T: Clone>(items: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    items
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

/// In-memory loan store. Listing order is newest first (reverse insertion).
pub struct InMemoryLoanRepository {
    loans: RwLock<Vec<Loan>>,
}

impl InMemoryLoanRepository {
    pub fn new() -> Self {
        Self {
            loans: RwLock::new(Vec::new()),
        }
    }

    /// Inserts a loan directly, bypassing the engine (test seeding).
    pub fn seed(&self, loan: Loan) {
        self.loans
            .write()
            .expect("InMemoryLoanRepository: lock poisoned")
            .push(loan);
    }
}

impl Default for InMemoryLoanRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoanRepository for InMemoryLoanRepository {
    async fn save(&self, loan: &Loan) -> Result<(), DomainError> {
        self.loans
            .write()
            .expect("InMemoryLoanRepository: lock poisoned")
            .push(loan.clone());
        Ok(())
    }

    async fn update(&self, loan: &Loan) -> Result<(), DomainError> {
        let mut loans = self
            .loans
            .write()
            .expect("InMemoryLoanRepository: lock poisoned");
        match loans.iter_mut().find(|l| l.id() == loan.id()) {
            Some(existing) => {
                *existing = loan.clone();
                Ok(())
            }
            None => Err(DomainError::loan_not_found()),
        }
    }

    async fn find_by_id(&self, id: &LoanId) -> Result<Option<Loan>, DomainError> {
        Ok(self
            .loans
            .read()
            .expect("InMemoryLoanRepository: lock poisoned")
            .iter()
            .find(|l| l.id() == *id)
            .cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<Loan>, DomainError> {
        let loans = self
            .loans
            .read()
            .expect("InMemoryLoanRepository: lock poisoned");
        Ok(paginate(loans.iter().rev().cloned(), page))
    }

    async fn list_by_borrower(
        &self,
        borrower_id: &UserId,
        page: Page,
    ) -> Result<Vec<Loan>, DomainError> {
        let loans = self
            .loans
            .read()
            .expect("InMemoryLoanRepository: lock poisoned");
        Ok(paginate(
            loans
                .iter()
                .rev()
                .filter(|l| l.borrower_id() == *borrower_id)
                .cloned(),
            page,
        ))
    }
}

/// In-memory investment store.
pub struct InMemoryInvestmentRepository {
    investments: RwLock<Vec<Investment>>,
}

impl InMemoryInvestmentRepository {
    pub fn new() -> Self {
        Self {
            investments: RwLock::new(Vec::new()),
        }
    }

    /// Inserts an investment directly, bypassing the engine (test seeding).
    pub fn seed(&self, investment: Investment) {
        self.investments
            .write()
            .expect("InMemoryInvestmentRepository: lock poisoned")
            .push(investment);
    }
}

impl Default for InMemoryInvestmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InvestmentRepository for InMemoryInvestmentRepository {
    async fn save(&self, investment: &Investment) -> Result<(), DomainError> {
        self.investments
            .write()
            .expect("InMemoryInvestmentRepository: lock poisoned")
            .push(investment.clone());
        Ok(())
    }

    async fn list_by_loan(&self, loan_id: &LoanId) -> Result<Vec<Investment>, DomainError> {
        Ok(self
            .investments
            .read()
            .expect("InMemoryInvestmentRepository: lock poisoned")
            .iter()
            .filter(|i| i.loan_id() == *loan_id)
            .cloned()
            .collect())
    }

    async fn list_by_investor(
        &self,
        investor_id: &InvestorId,
        page: Page,
    ) -> Result<Vec<Investment>, DomainError> {
        let investments = self
            .investments
            .read()
            .expect("InMemoryInvestmentRepository: lock poisoned");
        Ok(paginate(
            investments
                .iter()
                .rev()
                .filter(|i| i.investor_id() == *investor_id)
                .cloned(),
            page,
        ))
    }
}

/// In-memory loan product catalogue.
pub struct InMemoryLoanProductRepository {
    products: RwLock<HashMap<LoanProductId, LoanProduct>>,
}

impl InMemoryLoanProductRepository {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, product: LoanProduct) {
        self.products
            .write()
            .expect("InMemoryLoanProductRepository: lock poisoned")
            .insert(product.id(), product);
    }
}

impl Default for InMemoryLoanProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoanProductRepository for InMemoryLoanProductRepository {
    async fn find_by_id(&self, id: &LoanProductId) -> Result<Option<LoanProduct>, DomainError> {
        Ok(self
            .products
            .read()
            .expect("InMemoryLoanProductRepository: lock poisoned")
            .get(id)
            .cloned())
    }
}

/// In-memory directory of users, employees and investors.
pub struct InMemoryPartyDirectory {
    users: RwLock<HashMap<UserId, User>>,
    employees: RwLock<HashMap<EmployeeId, Employee>>,
    investors: RwLock<HashMap<InvestorId, Investor>>,
}

impl InMemoryPartyDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            employees: RwLock::new(HashMap::new()),
            investors: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert_user(&self, user: User) {
        self.users
            .write()
            .expect("InMemoryPartyDirectory: lock poisoned")
            .insert(user.id(), user);
    }

    pub fn insert_employee(&self, employee: Employee) {
        self.employees
            .write()
            .expect("InMemoryPartyDirectory: lock poisoned")
            .insert(employee.id(), employee);
    }

    pub fn insert_investor(&self, investor: Investor) {
        self.investors
            .write()
            .expect("InMemoryPartyDirectory: lock poisoned")
            .insert(investor.id(), investor);
    }
}

impl Default for InMemoryPartyDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryPartyDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .expect("InMemoryPartyDirectory: lock poisoned")
            .get(id)
            .cloned())
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryPartyDirectory {
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        Ok(self
            .employees
            .read()
            .expect("InMemoryPartyDirectory: lock poisoned")
            .get(id)
            .cloned())
    }
}

#[async_trait]
impl InvestorRepository for InMemoryPartyDirectory {
    async fn find_by_id(&self, id: &InvestorId) -> Result<Option<Investor>, DomainError> {
        Ok(self
            .investors
            .read()
            .expect("InMemoryPartyDirectory: lock poisoned")
            .get(id)
            .cloned())
    }
}
