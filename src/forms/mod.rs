//! Form state, reducers and submit-time validation for the back-office forms.
//!
//! A form is an immutable [`FormState`] snapshot: the entered data plus an
//! [`ErrorMap`] of per-field messages. Every input event produces a new
//! snapshot through [`FormState::apply`]; the field touched by the event is
//! validated on the spot and its entry in the error map is set or removed.
//! [`FormState::submit`] re-runs every rule, including cross-field ones, and
//! refuses the data while any error remains.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::validation::FieldResult;

pub mod admin_end_customer;
pub mod client;
pub mod end_customer;
pub mod payment;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(ErrorMap),

    #[error("חייב להיות לפחות איש קשר אחד")]
    LastPerson,

    #[error("חייב להיות לפחות איש קשר אחד לכל אדם")]
    LastContact,

    #[error("no person at index {0}")]
    UnknownPerson(usize),

    #[error("no contact at index {contact} for person {person}")]
    UnknownContact { person: usize, contact: usize },

    #[error("form already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),
}

/// Field key to error message, ordered by key.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<String, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry for `key` from a validator result, removing it when valid.
    pub fn record(&mut self, key: impl Into<String>, result: FieldResult) {
        let key = key.into();
        match result {
            Ok(()) => {
                self.0.remove(&key);
            }
            Err(err) => {
                self.0.insert(key, err.to_string());
            }
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Rewrites every key with `rekey`, dropping entries it maps to `None`.
    pub(crate) fn rekeyed(self, rekey: impl Fn(&str) -> Option<String>) -> Self {
        Self(
            self.0
                .into_iter()
                .filter_map(|(key, message)| rekey(&key).map(|key| (key, message)))
                .collect(),
        )
    }

    /// Converts a finished submit pass into a result.
    pub fn into_result(self) -> Result<(), FormError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FormError::Validation(self))
        }
    }
}

impl Display for ErrorMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, (key, message)) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{key}: {message}")?;
        }
        Ok(())
    }
}

/// Behaviour shared by every form: an event reducer and a submit pass.
pub trait Form: Clone + Sized {
    type Event;

    /// Produces the snapshot following `state` after `event`.
    fn reduce(state: &FormState<Self>, event: Self::Event) -> Result<FormState<Self>, FormError>;

    /// Runs every rule of the form, returning the complete error map.
    fn validate(&self) -> ErrorMap;
}

/// Immutable snapshot of a form: entered data and current errors.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct FormState<F> {
    pub(crate) data: F,
    pub(crate) errors: ErrorMap,
}

impl<F: Form> FormState<F> {
    pub fn new(data: F) -> Self {
        Self {
            data,
            errors: ErrorMap::new(),
        }
    }

    pub fn data(&self) -> &F {
        &self.data
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Returns the snapshot following this one, leaving this one untouched.
    pub fn apply(&self, event: F::Event) -> Result<Self, FormError> {
        F::reduce(self, event)
    }

    /// Snapshot whose errors are replaced by the full submit pass.
    pub fn revalidate(&self) -> Self {
        Self {
            data: self.data.clone(),
            errors: self.data.validate(),
        }
    }

    /// Returns the data when the submit pass finds no errors.
    pub fn submit(&self) -> Result<&F, FormError> {
        let errors = self.data.validate();
        if !errors.is_empty() {
            log::debug!("Form submission blocked by {} error(s)", errors.len());
        }
        errors.into_result()?;
        Ok(&self.data)
    }
}

/// Key of a field belonging to person `person`.
pub fn person_key(person: usize, field: &str) -> String {
    format!("person_{person}_{field}")
}

/// Key of the live error of a contact field.
pub fn contact_key(person: usize, contact: usize, field: &str) -> String {
    format!("contact_{person}_{contact}_{field}")
}

/// Key of the submit-time error of a contact.
pub fn person_contact_key(person: usize, contact: usize) -> String {
    format!("person_{person}_contact_{contact}")
}

fn shift_index(index: usize, removed: usize) -> Option<usize> {
    match index.cmp(&removed) {
        std::cmp::Ordering::Less => Some(index),
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some(index - 1),
    }
}

fn split_index(rest: &str) -> Option<(usize, &str)> {
    let (index, tail) = rest.split_once('_')?;
    Some((index.parse().ok()?, tail))
}

/// Re-keys an error after person `removed` was deleted.
///
/// Keys of the removed person are dropped and later persons move down by one.
pub(crate) fn rekey_after_person_removal(key: &str, removed: usize) -> Option<String> {
    for prefix in ["person_", "contact_"] {
        if let Some((index, tail)) = key.strip_prefix(prefix).and_then(split_index) {
            return shift_index(index, removed).map(|index| format!("{prefix}{index}_{tail}"));
        }
    }
    Some(key.to_string())
}

/// Re-keys an error after contact `removed` of `person` was deleted.
pub(crate) fn rekey_after_contact_removal(key: &str, person: usize, removed: usize) -> Option<String> {
    if let Some((p, tail)) = key.strip_prefix("contact_").and_then(split_index)
        && p == person
        && let Some((c, field)) = split_index(tail)
    {
        return shift_index(c, removed).map(|c| contact_key(p, c, field));
    }

    if let Some((p, tail)) = key.strip_prefix("person_").and_then(split_index)
        && p == person
        && let Some(c) = tail.strip_prefix("contact_").and_then(|c| c.parse::<usize>().ok())
    {
        return shift_index(c, removed).map(|c| person_contact_key(p, c));
    }

    Some(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;

    #[test]
    fn record_sets_and_clears_entries() {
        let mut errors = ErrorMap::new();
        errors.record("name", Err(FieldError::NameTooShort));
        assert_eq!(errors.get("name"), Some("שם חייב להכיל לפחות 2 תווים"));

        errors.record("name", Ok(()));
        assert!(errors.is_empty());
    }

    #[test]
    fn error_map_serializes_as_plain_object() {
        let mut errors = ErrorMap::new();
        errors.insert("person_0_firstName", "שם פרטי חובה");

        let json = serde_json::to_value(&errors).unwrap();

        assert_eq!(json, serde_json::json!({"person_0_firstName": "שם פרטי חובה"}));
    }

    #[test]
    fn person_removal_drops_and_shifts_keys() {
        assert_eq!(rekey_after_person_removal("person_1_firstName", 1), None);
        assert_eq!(
            rekey_after_person_removal("person_2_contact_0", 1),
            Some("person_1_contact_0".to_string())
        );
        assert_eq!(
            rekey_after_person_removal("contact_3_1_value", 1),
            Some("contact_2_1_value".to_string())
        );
        assert_eq!(
            rekey_after_person_removal("person_0_email", 1),
            Some("person_0_email".to_string())
        );
        assert_eq!(
            rekey_after_person_removal("totalDebt", 0),
            Some("totalDebt".to_string())
        );
    }

    #[test]
    fn contact_removal_only_touches_that_person() {
        assert_eq!(rekey_after_contact_removal("contact_0_1_value", 0, 1), None);
        assert_eq!(
            rekey_after_contact_removal("contact_0_2_value", 0, 1),
            Some("contact_0_1_value".to_string())
        );
        assert_eq!(
            rekey_after_contact_removal("contact_1_2_value", 0, 1),
            Some("contact_1_2_value".to_string())
        );
        assert_eq!(
            rekey_after_contact_removal("person_0_contact_3", 0, 1),
            Some("person_0_contact_2".to_string())
        );
        assert_eq!(
            rekey_after_contact_removal("person_0_firstName", 0, 0),
            Some("person_0_firstName".to_string())
        );
    }

    #[test]
    fn into_result_wraps_non_empty_maps() {
        assert!(ErrorMap::new().into_result().is_ok());

        let mut errors = ErrorMap::new();
        errors.insert("name", "x");
        assert!(matches!(errors.into_result(), Err(FormError::Validation(map)) if map.len() == 1));
    }
}
