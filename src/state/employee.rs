//! Employee records as exchanged with the record service

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the employee prefers to be contacted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPreference {
    Email,
    Phone,
}

impl ContactPreference {
    #[cfg(test)]
    pub const ALL: [ContactPreference; 2] = [Self::Email, Self::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }
}

impl fmt::Display for ContactPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            other => Err(format!("unknown contact preference: {other}")),
        }
    }
}

/// A single skill entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default)]
    pub skill_name: String,
    #[serde(default)]
    pub experience_in_years: Option<u32>,
    #[serde(default)]
    pub proficiency: String,
}

#[cfg(test)]
impl Skill {
    pub fn new(name: &str, years: u32, proficiency: &str) -> Self {
        Self {
            skill_name: name.to_string(),
            experience_in_years: Some(years),
            proficiency: proficiency.to_string(),
        }
    }
}

/// Employee record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "phone_from_number_or_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_preference",
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_preference: Option<ContactPreference>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Employee {
    pub fn contact_label(&self) -> &'static str {
        self.contact_preference
            .as_ref()
            .map(ContactPreference::label)
            .unwrap_or("-")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PhoneRepr {
    Number(u64),
    Text(String),
}

/// Phones arrive either as JSON numbers or strings
fn phone_from_number_or_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<PhoneRepr> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(PhoneRepr::Number(n)) => Some(n.to_string()),
        Some(PhoneRepr::Text(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

/// Unknown preference strings are treated as "no preference"
fn lenient_preference<'de, D>(deserializer: D) -> Result<Option<ContactPreference>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = r#"{
            "id": 2,
            "fullName": "Mary Smith",
            "email": "mary@gmail.com",
            "phone": 5551234567,
            "contactPreference": "phone",
            "skills": [
                {"skillName": "C#", "experienceInYears": 4, "proficiency": "advanced"}
            ]
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, 2);
        assert_eq!(employee.full_name, "Mary Smith");
        assert_eq!(employee.phone.as_deref(), Some("5551234567"));
        assert_eq!(employee.contact_preference, Some(ContactPreference::Phone));
        assert_eq!(employee.skills, vec![Skill::new("C#", 4, "advanced")]);
    }

    #[test]
    fn test_phone_as_string_and_empty() {
        let employee: Employee =
            serde_json::from_str(r#"{"fullName": "a", "phone": "555-0100"}"#).unwrap();
        assert_eq!(employee.phone.as_deref(), Some("555-0100"));

        let employee: Employee = serde_json::from_str(r#"{"phone": ""}"#).unwrap();
        assert!(employee.phone.is_none());

        let employee: Employee = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        assert!(employee.phone.is_none());
    }

    #[test]
    fn test_unknown_preference_is_none() {
        let employee: Employee =
            serde_json::from_str(r#"{"contactPreference": "pigeon"}"#).unwrap();
        assert!(employee.contact_preference.is_none());
        assert_eq!(employee.contact_label(), "-");
    }

    #[test]
    fn test_serialize_uses_camel_case_and_skips_none() {
        let employee = Employee {
            id: 1,
            full_name: "Jo".into(),
            email: "jo@gmail.com".into(),
            phone: None,
            contact_preference: Some(ContactPreference::Email),
            skills: vec![],
        };
        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["fullName"], "Jo");
        assert_eq!(value["contactPreference"], "email");
        assert!(value.get("phone").is_none());
    }

    #[test]
    fn test_preference_from_str() {
        assert_eq!(
            "email".parse::<ContactPreference>(),
            Ok(ContactPreference::Email)
        );
        assert_eq!(
            "phone".parse::<ContactPreference>(),
            Ok(ContactPreference::Phone)
        );
        assert!("Phone".parse::<ContactPreference>().is_err());
    }
}
