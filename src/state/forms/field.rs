//! Form field value objects

use super::validators::{ErrorKind, Validator};

/// A single scalar form control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormControl {
    value: String,
    validators: Vec<Validator>,
    touched: bool,
    dirty: bool,
}

impl FormControl {
    /// Create a pristine, untouched control
    pub fn new(value: impl Into<String>, validators: Vec<Validator>) -> Self {
        Self {
            value: value.into(),
            validators,
            touched: false,
            dirty: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value as user input (marks the control dirty)
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    /// Set the value programmatically (dirty flag is left alone)
    pub fn patch_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
        self.dirty = true;
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if self.value.pop().is_some() {
            self.dirty = true;
        }
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// A control is pristine until it receives user input
    pub fn is_pristine(&self) -> bool {
        !self.dirty
    }

    /// Replace the whole rule list
    pub fn set_validators(&mut self, validators: Vec<Validator>) {
        self.validators = validators;
    }

    /// Failed rules, in the order the rules were declared
    pub fn errors(&self) -> Vec<ErrorKind> {
        self.validators
            .iter()
            .filter_map(|v| v.validate(&self.value))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validators.iter().all(|v| v.validate(&self.value).is_none())
    }

    /// Clear the value and interaction flags
    pub fn reset(&mut self) {
        self.value.clear();
        self.touched = false;
        self.dirty = false;
    }
}
