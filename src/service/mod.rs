//! Employee record service: trait seam and HTTP implementation

mod client;
mod traits;

pub use client::{HttpEmployeeService, ServiceError, DEFAULT_SERVICE_URL};
pub use traits::EmployeeService;

#[cfg(test)]
pub use traits::MockEmployeeService;
