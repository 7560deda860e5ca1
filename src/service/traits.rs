//! Trait abstraction for the record service to enable mocking in tests

use super::client::ServiceError;
use crate::state::Employee;
use async_trait::async_trait;

/// Operations the form needs from the employee backend.
///
/// Every call is single-shot: one success or one failure, no retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Fetch one employee by id
    async fn get_employee(&self, id: u64) -> Result<Employee, ServiceError>;

    /// Fetch every employee
    async fn get_employees(&self) -> Result<Vec<Employee>, ServiceError>;

    /// Create a new employee, returning the stored record (with its id)
    async fn add_employee(&self, employee: &Employee) -> Result<Employee, ServiceError>;

    /// Overwrite an existing employee
    async fn update_employee(&self, employee: &Employee) -> Result<(), ServiceError>;
}
