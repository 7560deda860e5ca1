//! Form rendering module
//!
//! - `field_renderer`: single field boxes with inline messages
//! - `employee_form`: the employee create/edit form

mod employee_form;
mod field_renderer;

pub use employee_form::draw as draw_employee_form;
