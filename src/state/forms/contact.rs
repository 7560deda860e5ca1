//! Contact preference driven phone requirement

use super::validators::Validator;

/// Contact preference value that makes the phone number mandatory
pub const PHONE_PREFERENCE: &str = "phone";

/// Whether the phone leaf must be filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneRequirement {
    #[default]
    Optional,
    Required,
}

impl PhoneRequirement {
    /// State for a given contact preference value. Depends only on the
    /// current value, never on the previous state.
    pub fn from_preference(preference: &str) -> Self {
        if required_flag(preference) {
            Self::Required
        } else {
            Self::Optional
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Self::Required)
    }

    /// Rules the phone leaf carries in this state
    pub fn validators(self) -> Vec<Validator> {
        match self {
            Self::Required => vec![Validator::Required],
            Self::Optional => Vec::new(),
        }
    }
}

/// True when `preference` requires a phone number
pub fn required_flag(preference: &str) -> bool {
    preference == PHONE_PREFERENCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_preference_requires_phone() {
        assert!(required_flag("phone"));
        assert_eq!(
            PhoneRequirement::from_preference("phone"),
            PhoneRequirement::Required
        );
    }

    #[test]
    fn test_other_preferences_are_optional() {
        for pref in ["email", "", "Phone", "PHONE", " phone"] {
            assert!(!required_flag(pref), "{pref:?} should not require a phone");
            assert_eq!(
                PhoneRequirement::from_preference(pref),
                PhoneRequirement::Optional
            );
        }
    }

    #[test]
    fn test_no_hysteresis() {
        let sequence = ["phone", "email", "phone", "phone", ""];
        let states: Vec<_> = sequence
            .iter()
            .map(|p| PhoneRequirement::from_preference(p).is_required())
            .collect();
        assert_eq!(states, vec![true, false, true, true, false]);
    }

    #[test]
    fn test_validators_per_state() {
        assert_eq!(
            PhoneRequirement::Required.validators(),
            vec![Validator::Required]
        );
        assert!(PhoneRequirement::Optional.validators().is_empty());
        assert_eq!(PhoneRequirement::default(), PhoneRequirement::Optional);
    }
}
