//! Validation rules for leaves and groups

use super::field::FormControl;
use super::node::FormGroup;
use std::fmt;

/// Kind of validation failure reported by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    Required,
    MinLength,
    MaxLength,
    EmailDomain,
    EmailMismatch,
}

impl ErrorKind {
    /// Stable key used in message tables
    pub fn key(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minlength",
            Self::MaxLength => "maxlength",
            Self::EmailDomain => "EmailDomain",
            Self::EmailMismatch => "EmailMismatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Rule attached to a single leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// Email must belong to the given domain (empty values pass)
    EmailDomain(String),
}

impl Validator {
    /// Run the rule against a leaf value
    pub fn validate(&self, value: &str) -> Option<ErrorKind> {
        let passed = match self {
            Self::Required => !value.is_empty(),
            // Length rules leave empty values to `Required`
            Self::MinLength(min) => value.is_empty() || value.chars().count() >= *min,
            Self::MaxLength(max) => value.chars().count() <= *max,
            Self::EmailDomain(domain) => email_domain_matches(value, domain),
        };

        if passed {
            None
        } else {
            Some(self.kind())
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Required => ErrorKind::Required,
            Self::MinLength(_) => ErrorKind::MinLength,
            Self::MaxLength(_) => ErrorKind::MaxLength,
            Self::EmailDomain(_) => ErrorKind::EmailDomain,
        }
    }
}

/// Rule spanning several children of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupValidator {
    /// The two named leaves must hold the same value
    EmailsEqual {
        email: &'static str,
        confirm: &'static str,
    },
}

impl GroupValidator {
    pub fn validate(&self, group: &FormGroup) -> Option<ErrorKind> {
        match self {
            Self::EmailsEqual { email, confirm } => {
                let (Some(email), Some(confirm)) = (group.leaf(email), group.leaf(confirm)) else {
                    return None;
                };
                if emails_equal(email, confirm) {
                    None
                } else {
                    Some(ErrorKind::EmailMismatch)
                }
            }
        }
    }
}

/// Domain check on an email value.
///
/// Compares everything after the first `@` (or the whole value when there is
/// none) against `domain`, ignoring case. Empty values always pass.
pub fn email_domain_matches(value: &str, domain: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let suffix = value.split_once('@').map_or(value, |(_, rest)| rest);
    suffix.to_lowercase() == domain.to_lowercase()
}

/// Equality check between an email leaf and its confirmation.
///
/// An untouched, empty confirmation never blocks.
pub fn emails_equal(email: &FormControl, confirm: &FormControl) -> bool {
    email.value() == confirm.value() || (confirm.is_pristine() && confirm.value().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod leaf_rules {
        use super::*;

        #[test]
        fn test_required_rejects_empty() {
            assert_eq!(Validator::Required.validate(""), Some(ErrorKind::Required));
            assert_eq!(Validator::Required.validate("x"), None);
        }

        #[test]
        fn test_min_length_skips_empty() {
            let rule = Validator::MinLength(3);
            assert_eq!(rule.validate(""), None);
            assert_eq!(rule.validate("ab"), Some(ErrorKind::MinLength));
            assert_eq!(rule.validate("abc"), None);
        }

        #[test]
        fn test_max_length() {
            let rule = Validator::MaxLength(12);
            assert_eq!(rule.validate("abcdefghijkl"), None);
            assert_eq!(rule.validate("abcdefghijklm"), Some(ErrorKind::MaxLength));
        }

        #[test]
        fn test_lengths_count_chars_not_bytes() {
            // 3 chars, 6 bytes
            assert_eq!(Validator::MinLength(3).validate("äöü"), None);
            assert_eq!(Validator::MaxLength(3).validate("äöü"), None);
        }

        #[test]
        fn test_error_kind_keys() {
            assert_eq!(ErrorKind::Required.key(), "required");
            assert_eq!(ErrorKind::MinLength.key(), "minlength");
            assert_eq!(ErrorKind::MaxLength.key(), "maxlength");
            assert_eq!(ErrorKind::EmailDomain.to_string(), "EmailDomain");
            assert_eq!(ErrorKind::EmailMismatch.to_string(), "EmailMismatch");
        }
    }

    mod email_domain {
        use super::*;

        #[test]
        fn test_empty_passes() {
            assert!(email_domain_matches("", "gmail.com"));
        }

        #[test]
        fn test_matching_domain_passes() {
            assert!(email_domain_matches("jane@gmail.com", "gmail.com"));
        }

        #[test]
        fn test_case_insensitive() {
            assert!(email_domain_matches("Jane@GMail.COM", "gmail.com"));
            assert!(email_domain_matches("jane@gmail.com", "Gmail.com"));
        }

        #[test]
        fn test_other_domain_fails() {
            assert!(!email_domain_matches("x@yahoo.com", "gmail.com"));
            assert_eq!(
                Validator::EmailDomain("gmail.com".into()).validate("x@yahoo.com"),
                Some(ErrorKind::EmailDomain)
            );
        }

        #[test]
        fn test_subdomain_is_not_a_match() {
            assert!(!email_domain_matches("x@mail.gmail.com", "gmail.com"));
        }

        #[test]
        fn test_only_first_at_splits() {
            assert!(!email_domain_matches("a@b@gmail.com", "gmail.com"));
            assert!(email_domain_matches("a@gmail.com@", "gmail.com@"));
        }

        #[test]
        fn test_missing_at_compares_whole_value() {
            assert!(email_domain_matches("gmail.com", "gmail.com"));
            assert!(!email_domain_matches("jane", "gmail.com"));
        }
    }

    mod emails_equal {
        use super::*;

        fn confirm(value: &str, dirty: bool) -> FormControl {
            let mut control = FormControl::new("", vec![Validator::Required]);
            if dirty {
                control.set_value(value);
            } else {
                control.patch_value(value);
            }
            control
        }

        #[test]
        fn test_equal_values_pass() {
            let email = FormControl::new("a@gmail.com", vec![]);
            assert!(emails_equal(&email, &confirm("a@gmail.com", true)));
        }

        #[test]
        fn test_pristine_empty_confirm_passes() {
            let email = FormControl::new("a@gmail.com", vec![]);
            assert!(emails_equal(&email, &confirm("", false)));
        }

        #[test]
        fn test_dirty_empty_confirm_fails() {
            let email = FormControl::new("a@gmail.com", vec![]);
            assert!(!emails_equal(&email, &confirm("", true)));
        }

        #[test]
        fn test_pristine_non_empty_mismatch_fails() {
            let email = FormControl::new("a@gmail.com", vec![]);
            assert!(!emails_equal(&email, &confirm("b@gmail.com", false)));
        }

        #[test]
        fn test_group_validator_reports_mismatch() {
            let group = FormGroup::new(vec![GroupValidator::EmailsEqual {
                email: "email",
                confirm: "confirmEmail",
            }])
            .with_leaf("email", FormControl::new("a@gmail.com", vec![]))
            .with_leaf("confirmEmail", confirm("b@gmail.com", true));

            assert_eq!(group.own_errors(), vec![ErrorKind::EmailMismatch]);
        }

        #[test]
        fn test_group_validator_passes_when_children_missing() {
            let group = FormGroup::new(vec![GroupValidator::EmailsEqual {
                email: "email",
                confirm: "confirmEmail",
            }]);
            assert!(group.own_errors().is_empty());
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Text after the first `@`, or everything when there is none
        fn domain_part(value: &str) -> &str {
            match value.find('@') {
                Some(at) => &value[at + 1..],
                None => value,
            }
        }

        fn control(value: &str, dirty: bool) -> FormControl {
            let mut control = FormControl::default();
            if dirty {
                control.set_value(value);
            } else {
                control.patch_value(value);
            }
            control
        }

        proptest! {
            #[test]
            fn test_domain_check_matches_reference(value in ".*", domain in ".*") {
                let expected = value.is_empty()
                    || domain_part(&value).to_lowercase() == domain.to_lowercase();
                prop_assert_eq!(email_domain_matches(&value, &domain), expected);
            }

            #[test]
            fn test_any_local_part_at_domain_passes(
                local in "[^@]*",
                domain in "[a-z0-9.-]{1,20}",
                upper in any::<bool>(),
            ) {
                let shown = if upper { domain.to_uppercase() } else { domain.clone() };
                let email = format!("{local}@{shown}");
                prop_assert!(email_domain_matches(&email, &domain));
            }

            #[test]
            fn test_other_domains_fail(
                local in "[^@]*",
                domain in "[a-z]{1,10}\\.com",
                other in "[a-z]{1,10}\\.org",
            ) {
                let email = format!("{local}@{other}");
                prop_assert!(!email_domain_matches(&email, &domain));
            }

            #[test]
            fn test_emails_equal_matches_reference(
                email in ".*",
                confirm in prop_oneof![Just(String::new()), ".*"],
                email_dirty in any::<bool>(),
                confirm_dirty in any::<bool>(),
            ) {
                let expected = email == confirm || (!confirm_dirty && confirm.is_empty());
                let passed = emails_equal(
                    &control(&email, email_dirty),
                    &control(&confirm, confirm_dirty),
                );
                prop_assert_eq!(passed, expected);
            }

            #[test]
            fn test_identical_values_always_pass(value in ".*", dirty in any::<bool>()) {
                prop_assert!(emails_equal(&control(&value, true), &control(&value, dirty)));
            }
        }
    }
}
