//! Personal-data form: three-step wizard and the collected fields.

use std::collections::BTreeMap;

use crate::wizard::WizardStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonalStep {
    Identity,
    Contact,
    Review,
}

impl WizardStep for PersonalStep {
    const SEQUENCE: &'static [Self] = &[
        PersonalStep::Identity,
        PersonalStep::Contact,
        PersonalStep::Review,
    ];

    fn key(self) -> u8 {
        match self {
            PersonalStep::Identity => 1,
            PersonalStep::Contact => 2,
            PersonalStep::Review => 3,
        }
    }

    fn title(self) -> &'static str {
        match self {
            PersonalStep::Identity => "Basic Information",
            PersonalStep::Contact => "Contact Details",
            PersonalStep::Review => "Review",
        }
    }
}

/// A named input on the personal-data form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub step: PersonalStep,
}

pub const FORM_FIELDS: [FormField; 8] = [
    FormField {
        name: "full_name",
        label: "Full name",
        step: PersonalStep::Identity,
    },
    FormField {
        name: "date_of_birth",
        label: "Date of birth",
        step: PersonalStep::Identity,
    },
    FormField {
        name: "gender",
        label: "Gender",
        step: PersonalStep::Identity,
    },
    FormField {
        name: "national_id",
        label: "National ID",
        step: PersonalStep::Identity,
    },
    FormField {
        name: "phone",
        label: "Phone",
        step: PersonalStep::Contact,
    },
    FormField {
        name: "email",
        label: "Email",
        step: PersonalStep::Contact,
    },
    FormField {
        name: "address",
        label: "Address",
        step: PersonalStep::Contact,
    },
    FormField {
        name: "emergency_contact",
        label: "Emergency contact",
        step: PersonalStep::Contact,
    },
];

/// Fields shown on a given step, in form order.
pub fn fields_for(step: PersonalStep) -> impl Iterator<Item = &'static FormField> {
    FORM_FIELDS.iter().filter(move |f| f.step == step)
}

/// Field values collected so far, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalData {
    values: BTreeMap<String, String>,
}

impl PersonalData {
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Fields holding a non-blank value.
    pub fn filled_count(&self) -> usize {
        self.values.values().filter(|v| !v.trim().is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_fields_split_across_two_steps() {
        assert_eq!(fields_for(PersonalStep::Identity).count(), 4);
        assert_eq!(fields_for(PersonalStep::Contact).count(), 4);
        assert_eq!(fields_for(PersonalStep::Review).count(), 0);
    }

    #[test]
    fn blank_values_are_not_filled() {
        let mut data = PersonalData::default();
        data.set("full_name", "Amina Otieno");
        data.set("email", "   ");
        assert_eq!(data.filled_count(), 1);
        assert_eq!(data.get("email"), Some("   "));

        data.set("full_name", "");
        assert_eq!(data.filled_count(), 0);
    }
}
