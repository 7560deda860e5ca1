//! Form domain layer
//!
//! A form is a tree of [`node::FormNode`]s: leaves hold a single value and their
//! own rules, groups hold named children plus rules spanning them, lists
//! hold sibling groups. The employee form is declared in
//! [`employee_form`], and [`messages`] turns a tree into display messages.

mod contact;
mod employee_form;
mod field;
mod messages;
mod node;
mod validators;

pub use employee_form::{
    cycle_option, error_slot, fields, is_numeric_field, paths, selector_options, EmployeeForm,
    FormError, FormSettings,
};
pub use messages::{FormErrors, MessageTable};

#[cfg(test)]
pub use contact::PhoneRequirement;
