//! Outbound payloads created from the end-customer intake form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ChargeType, ContactType, IntervalUnit, PaymentMethod};

/// A single non-blank contact detail of a person.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewContact {
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub value: String,
}

impl NewContact {
    /// Trims the value and drops blank contacts.
    #[must_use]
    pub fn new(contact_type: ContactType, value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            contact_type,
            value: value.to_string(),
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub identification_number: String,
    pub contacts: Vec<NewContact>,
}

impl NewPerson {
    /// First phone-like contact of the person.
    pub fn phone(&self) -> Option<&str> {
        self.contacts
            .iter()
            .find(|contact| contact.contact_type.is_phone())
            .map(|contact| contact.value.as_str())
    }

    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.contacts
            .iter()
            .filter(|contact| contact.contact_type == ContactType::Email)
            .map(|contact| contact.value.as_str())
    }
}

/// Login account created for an end customer, one per distinct email.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewEndClientUser {
    pub user_name: String,
    pub email: String,
    pub identification_number: String,
    pub phone: String,
}

/// Builds the user accounts for the given persons.
///
/// Each distinct email becomes one user carrying the identification number
/// and first phone of the person it was listed under. Later duplicates of an
/// email are ignored.
pub fn users_from_persons(persons: &[NewPerson]) -> Vec<NewEndClientUser> {
    let mut users: Vec<NewEndClientUser> = Vec::new();

    for person in persons {
        let phone = person.phone().unwrap_or_default();
        for email in person.emails() {
            if users.iter().any(|user| user.email == email) {
                continue;
            }
            users.push(NewEndClientUser {
                user_name: email.to_string(),
                email: email.to_string(),
                identification_number: person.identification_number.clone(),
                phone: phone.to_string(),
            });
        }
    }

    users
}

/// Request body creating an end client together with its first charge.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEndClient {
    pub client_id: i64,
    pub name: String,
    pub total_debt: String,
    pub persons: Vec<NewPerson>,
    pub users: Vec<NewEndClientUser>,
    pub initial_prepaid_balance: Option<String>,
    pub initial_charge_amount: String,
    pub initial_charge_due_date: NaiveDate,
    pub initial_charge_type: ChargeType,
    pub interval_value: Option<u32>,
    pub interval_unit: Option<IntervalUnit>,
    pub recurring_end_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
}

/// Debt record created once the backend has assigned the end client id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewDebt {
    pub end_client_id: i64,
    pub amount: String,
    pub due_date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(rename = "type")]
    pub charge_type: ChargeType,
}
