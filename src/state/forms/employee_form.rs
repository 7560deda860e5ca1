//! Employee form schema and the operations the UI drives it with

use super::contact::PhoneRequirement;
use super::field::FormControl;
use super::messages::{aggregate, FormErrors, MessageTable};
use super::node::{FormArray, FormGroup, FormNode};
use super::validators::{GroupValidator, Validator};
use crate::state::{ContactPreference, Employee, Skill};

/// Child names used in the employee form tree
pub mod fields {
    pub const FULL_NAME: &str = "fullName";
    pub const EMAIL_GROUP: &str = "emailGroup";
    pub const EMAIL: &str = "email";
    pub const CONFIRM_EMAIL: &str = "confirmEmail";
    pub const CONTACT_PREFERENCE: &str = "contactPreference";
    pub const PHONE: &str = "phone";
    pub const SKILLS: &str = "skills";
    pub const SKILL_NAME: &str = "skillName";
    pub const EXPERIENCE: &str = "experienceInYears";
    pub const PROFICIENCY: &str = "proficiency";
}

/// Full paths to the leaves nested in the email group
pub mod paths {
    pub const EMAIL: &str = "emailGroup.email";
    pub const CONFIRM_EMAIL: &str = "emailGroup.confirmEmail";

    /// Path to one field of the skill at `index`
    pub fn skill(index: usize, field: &str) -> String {
        format!("{}.{index}.{field}", super::fields::SKILLS)
    }
}

/// Proficiency choices offered by the skill selector
pub const PROFICIENCY_LEVELS: [&str; 3] = ["beginner", "intermediate", "advanced"];

/// Contact preference choices offered by the selector
pub const CONTACT_OPTIONS: [&str; 2] = ["email", "phone"];

/// Tunable parts of the form schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    /// Domain every employee email must belong to
    pub email_domain: String,
    pub name_min_length: usize,
    pub name_max_length: usize,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            email_domain: "gmail.com".to_string(),
            name_min_length: 3,
            name_max_length: 12,
        }
    }
}

/// Errors from form operations addressed by path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("no form control at `{0}`")]
    UnknownPath(String),
    #[error("`{0}` is not an editable field")]
    NotALeaf(String),
    #[error("skill {index} does not exist (form has {len})")]
    SkillIndexOutOfRange { index: usize, len: usize },
}

/// The employee create/edit form for one session
#[derive(Debug, Clone)]
pub struct EmployeeForm {
    root: FormGroup,
    phone_requirement: PhoneRequirement,
}

impl EmployeeForm {
    /// Build the form tree with default values (create mode)
    pub fn new(settings: &FormSettings) -> Self {
        let email_group = FormGroup::new(vec![GroupValidator::EmailsEqual {
            email: fields::EMAIL,
            confirm: fields::CONFIRM_EMAIL,
        }])
        .with_leaf(
            fields::EMAIL,
            FormControl::new(
                "",
                vec![
                    Validator::Required,
                    Validator::EmailDomain(settings.email_domain.clone()),
                ],
            ),
        )
        .with_leaf(
            fields::CONFIRM_EMAIL,
            FormControl::new("", vec![Validator::Required]),
        );

        let mut skills = FormArray::new();
        skills.push(skill_group(None));

        let root = FormGroup::new(vec![])
            .with_leaf(
                fields::FULL_NAME,
                FormControl::new(
                    "",
                    vec![
                        Validator::Required,
                        Validator::MinLength(settings.name_min_length),
                        Validator::MaxLength(settings.name_max_length),
                    ],
                ),
            )
            .with_leaf(fields::CONTACT_PREFERENCE, FormControl::default())
            .with_leaf(fields::PHONE, FormControl::default())
            .with(fields::EMAIL_GROUP, FormNode::Group(email_group))
            .with(fields::SKILLS, FormNode::List(skills));

        Self {
            root,
            phone_requirement: PhoneRequirement::Optional,
        }
    }

    #[cfg(test)]
    pub fn root(&self) -> &FormGroup {
        &self.root
    }

    pub fn phone_requirement(&self) -> PhoneRequirement {
        self.phone_requirement
    }

    pub fn control(&self, path: &str) -> Option<&FormControl> {
        self.root.find(path).and_then(FormNode::as_leaf)
    }

    /// Current value of a leaf, `None` for unknown paths and containers
    pub fn value(&self, path: &str) -> Option<&str> {
        self.control(path).map(FormControl::value)
    }

    fn leaf_mut(&mut self, path: &str) -> Result<&mut FormControl, FormError> {
        let node = self
            .root
            .find_mut(path)
            .ok_or_else(|| FormError::UnknownPath(path.to_string()))?;
        node.as_leaf_mut()
            .ok_or_else(|| FormError::NotALeaf(path.to_string()))
    }

    /// Replace a leaf value as user input
    pub fn set_value(&mut self, path: &str, value: &str) -> Result<(), FormError> {
        self.leaf_mut(path)?.set_value(value);
        self.after_change(path);
        Ok(())
    }

    /// Type one character into a leaf
    pub fn input_char(&mut self, path: &str, c: char) -> Result<(), FormError> {
        self.leaf_mut(path)?.push_char(c);
        self.after_change(path);
        Ok(())
    }

    /// Delete the last character of a leaf
    pub fn backspace(&mut self, path: &str) -> Result<(), FormError> {
        self.leaf_mut(path)?.pop_char();
        self.after_change(path);
        Ok(())
    }

    /// Record that the user left a field
    pub fn mark_touched(&mut self, path: &str) -> Result<(), FormError> {
        self.leaf_mut(path)?.mark_touched();
        Ok(())
    }

    pub fn mark_all_touched(&mut self) {
        self.root.mark_all_touched();
    }

    pub fn is_valid(&self) -> bool {
        self.root.is_valid()
    }

    /// Display messages for the current tree
    pub fn errors(&self, table: &MessageTable) -> FormErrors {
        aggregate(&self.root, table)
    }

    fn skills(&self) -> Option<&FormArray> {
        self.root.get(fields::SKILLS).and_then(FormNode::as_list)
    }

    fn skills_mut(&mut self) -> Option<&mut FormArray> {
        self.root.get_mut(fields::SKILLS).and_then(FormNode::as_list_mut)
    }

    pub fn skill_count(&self) -> usize {
        self.skills().map_or(0, FormArray::len)
    }

    /// Append an empty skill entry, or one filled from `skill`
    pub fn add_skill(&mut self, skill: Option<&Skill>) {
        if let Some(skills) = self.skills_mut() {
            skills.push(skill_group(skill));
        }
    }

    /// Remove the skill entry at `index`
    pub fn remove_skill(&mut self, index: usize) -> Result<(), FormError> {
        let len = self.skill_count();
        self.skills_mut()
            .and_then(|skills| skills.remove(index))
            .map(|_| ())
            .ok_or(FormError::SkillIndexOutOfRange { index, len })
    }

    /// Replace every skill entry with one per incoming skill
    pub fn set_existing_skills(&mut self, skills: &[Skill]) {
        if let Some(list) = self.skills_mut() {
            list.clear();
            for skill in skills {
                list.push(skill_group(Some(skill)));
            }
        }
    }

    /// Load an existing record (edit mode). Patched leaves stay pristine.
    pub fn patch_employee(&mut self, employee: &Employee) {
        let preference = employee
            .contact_preference
            .as_ref()
            .map(ContactPreference::as_str)
            .unwrap_or("");
        let phone = employee.phone.as_deref().unwrap_or("");

        let patches = [
            (fields::FULL_NAME, employee.full_name.as_str()),
            (fields::CONTACT_PREFERENCE, preference),
            (paths::EMAIL, employee.email.as_str()),
            (paths::CONFIRM_EMAIL, employee.email.as_str()),
            (fields::PHONE, phone),
        ];
        for (path, value) in patches {
            if let Some(control) = self.root.find_mut(path).and_then(FormNode::as_leaf_mut) {
                control.patch_value(value);
            }
        }

        self.set_existing_skills(&employee.skills);
        self.sync_phone_requirement();
        tracing::debug!(
            employee_id = employee.id,
            skills = employee.skills.len(),
            "Patched employee into form"
        );
    }

    /// Clear every value and interaction flag; skill entries are kept
    pub fn reset(&mut self) {
        self.root.reset();
        self.sync_phone_requirement();
    }

    /// Read the form back into a record
    pub fn to_employee(&self, id: u64) -> Employee {
        let text = |path: &str| self.value(path).unwrap_or("").to_string();
        let phone = text(fields::PHONE);

        let skills = self
            .skills()
            .map(|list| {
                list.iter()
                    .filter_map(FormNode::as_group)
                    .map(|group| {
                        let leaf = |name| group.leaf(name).map(FormControl::value).unwrap_or("");
                        Skill {
                            skill_name: leaf(fields::SKILL_NAME).to_string(),
                            experience_in_years: leaf(fields::EXPERIENCE).trim().parse().ok(),
                            proficiency: leaf(fields::PROFICIENCY).to_string(),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Employee {
            id,
            full_name: text(fields::FULL_NAME),
            email: text(paths::EMAIL),
            phone: (!phone.is_empty()).then_some(phone),
            contact_preference: text(fields::CONTACT_PREFERENCE).parse().ok(),
            skills,
        }
    }

    /// Editable leaves in display order
    pub fn editable_paths(&self) -> Vec<String> {
        let mut paths = vec![
            fields::FULL_NAME.to_string(),
            paths::EMAIL.to_string(),
            paths::CONFIRM_EMAIL.to_string(),
            fields::CONTACT_PREFERENCE.to_string(),
            fields::PHONE.to_string(),
        ];
        for index in 0..self.skill_count() {
            for field in [fields::SKILL_NAME, fields::EXPERIENCE, fields::PROFICIENCY] {
                paths.push(paths::skill(index, field));
            }
        }
        paths
    }

    fn after_change(&mut self, path: &str) {
        if path == fields::CONTACT_PREFERENCE {
            self.sync_phone_requirement();
        }
    }

    /// Derive the phone rules from the current contact preference
    fn sync_phone_requirement(&mut self) {
        let preference = self.value(fields::CONTACT_PREFERENCE).unwrap_or("");
        let next = PhoneRequirement::from_preference(preference);
        if next != self.phone_requirement {
            tracing::debug!(?next, preference, "Phone requirement changed");
        }
        self.phone_requirement = next;
        if let Some(phone) = self.root.leaf_mut(fields::PHONE) {
            phone.set_validators(next.validators());
        }
    }
}

/// Error slot a leaf path reports under in [`FormErrors`]
pub fn error_slot(path: &str) -> &str {
    if path.starts_with(fields::SKILLS) {
        path
    } else {
        path.rsplit('.').next().unwrap_or(path)
    }
}

/// Choices for leaves edited with a selector instead of free text
pub fn selector_options(path: &str) -> Option<&'static [&'static str]> {
    if path == fields::CONTACT_PREFERENCE {
        Some(&CONTACT_OPTIONS)
    } else if path.starts_with(fields::SKILLS) && path.ends_with(fields::PROFICIENCY) {
        Some(&PROFICIENCY_LEVELS)
    } else {
        None
    }
}

/// Leaves that only accept digits
pub fn is_numeric_field(path: &str) -> bool {
    path.ends_with(fields::EXPERIENCE)
}

/// Cycle a selector value through `options`, with `""` as the unset state
pub fn cycle_option(current: &str, options: &[&str], forward: bool) -> String {
    let position = options.iter().position(|o| *o == current);
    let next = match (position, forward) {
        (None, true) => options.first(),
        (None, false) => options.last(),
        (Some(i), true) => options.get(i + 1),
        (Some(i), false) if i > 0 => options.get(i - 1),
        (Some(_), false) => None,
    };
    next.map(|s| s.to_string()).unwrap_or_default()
}

fn skill_group(skill: Option<&Skill>) -> FormNode {
    let (name, years, proficiency) = match skill {
        Some(s) => (
            s.skill_name.clone(),
            s.experience_in_years.map(|y| y.to_string()).unwrap_or_default(),
            s.proficiency.clone(),
        ),
        None => Default::default(),
    };

    FormNode::Group(
        FormGroup::new(vec![])
            .with_leaf(
                fields::SKILL_NAME,
                FormControl::new(name, vec![Validator::Required]),
            )
            .with_leaf(
                fields::EXPERIENCE,
                FormControl::new(years, vec![Validator::Required]),
            )
            .with_leaf(
                fields::PROFICIENCY,
                FormControl::new(proficiency, vec![Validator::Required]),
            ),
    )
}
