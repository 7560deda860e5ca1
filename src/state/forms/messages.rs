//! Display messages for validation failures
//!
//! [`aggregate`] walks a form tree and returns a fresh [`FormErrors`] map,
//! one slot per named child. Nothing is cached between calls.

use super::employee_form::{fields, FormSettings};
use super::node::{walk_group, FormGroup, FormNode, FormVisitor};
use super::validators::ErrorKind;
use std::collections::{BTreeMap, HashMap};

/// Human messages keyed by field name and error kind
#[derive(Debug, Clone, Default)]
pub struct MessageTable {
    messages: HashMap<String, HashMap<ErrorKind, String>>,
}

impl MessageTable {
    /// Messages for the employee form built with `settings`
    pub fn new(settings: &FormSettings) -> Self {
        Self::default()
            .with(fields::FULL_NAME, ErrorKind::Required, "Full Name is required.")
            .with(
                fields::FULL_NAME,
                ErrorKind::MinLength,
                format!(
                    "Full Name must be greater than {} characters.",
                    settings.name_min_length.saturating_sub(1)
                ),
            )
            .with(
                fields::FULL_NAME,
                ErrorKind::MaxLength,
                format!(
                    "Full Name must be less than {} characters.",
                    settings.name_max_length.saturating_add(1)
                ),
            )
            .with(fields::EMAIL, ErrorKind::Required, "email is required.")
            .with(
                fields::EMAIL,
                ErrorKind::EmailDomain,
                format!("email domain should only be {}", settings.email_domain),
            )
            .with(
                fields::EMAIL_GROUP,
                ErrorKind::EmailMismatch,
                "email and Confirm email should be same",
            )
            .with(
                fields::CONFIRM_EMAIL,
                ErrorKind::Required,
                "Confirm email is required.",
            )
            .with(fields::PHONE, ErrorKind::Required, "phone is required.")
            .with(fields::SKILL_NAME, ErrorKind::Required, "Skill Name is required.")
            .with(fields::EXPERIENCE, ErrorKind::Required, "Experience is required.")
            .with(fields::PROFICIENCY, ErrorKind::Required, "proficiency is required.")
    }

    /// Add or replace a message (builder style)
    pub fn with(mut self, field: &str, kind: ErrorKind, message: impl Into<String>) -> Self {
        self.messages
            .entry(field.to_string())
            .or_default()
            .insert(kind, message.into());
        self
    }

    pub fn message(&self, field: &str, kind: ErrorKind) -> Option<&str> {
        self.messages
            .get(field)
            .and_then(|by_kind| by_kind.get(&kind))
            .map(String::as_str)
    }
}

/// Display-ready messages, one slot per named child of the tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    slots: BTreeMap<String, String>,
}

impl FormErrors {
    /// Message for a slot, empty when the slot is clean or unknown
    pub fn get(&self, key: &str) -> &str {
        self.slots.get(key).map(String::as_str).unwrap_or("")
    }

    /// Slots that currently show a message
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots
            .iter()
            .filter(|(_, msg)| !msg.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
impl FormErrors {
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn has_messages(&self) -> bool {
        self.active().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

struct ErrorCollector<'a> {
    table: &'a MessageTable,
    errors: FormErrors,
}

impl FormVisitor for ErrorCollector<'_> {
    fn visit(&mut self, key: &str, name: &str, node: &FormNode) {
        let mut message = String::new();

        let shown = node.is_touched() || node.is_dirty() || !node.has_empty_value();
        if !node.is_valid() && shown {
            let parts: Vec<&str> = node
                .own_errors()
                .into_iter()
                .filter_map(|kind| self.table.message(name, kind))
                .collect();
            message = parts.join(" ");
        }

        self.errors.slots.insert(key.to_string(), message);
    }
}

/// Build the error map for the whole tree under `root`
pub fn aggregate(root: &FormGroup, table: &MessageTable) -> FormErrors {
    let mut collector = ErrorCollector {
        table,
        errors: FormErrors::default(),
    };
    walk_group(&mut collector, root, "");
    collector.errors
}
