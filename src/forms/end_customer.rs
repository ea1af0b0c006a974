//! End-customer intake form used by business clients.
//!
//! One end customer can have several persons, each with several contact
//! details, so errors of repeated records use composite keys (see
//! [`person_key`], [`contact_key`] and [`person_contact_key`]).

use serde::{Deserialize, Serialize};

use crate::domain::end_client::{NewContact, NewDebt, NewEndClient, NewPerson, users_from_persons};
use crate::domain::types::{
    ChargeType, ContactType, IntervalUnit, PaymentMethod, parse_form_date,
};
use crate::forms::{
    ErrorMap, Form, FormError, FormState, contact_key, person_contact_key, person_key,
    rekey_after_contact_removal, rekey_after_person_removal,
};
use crate::validation::{is_email_shape, validate_amount, validate_id_number, validate_name};

pub const NAME_REQUIRED: &str = "שם לקוח קצה חובה";
pub const TOTAL_DEBT_INVALID: &str = "סכום חוב חייב להיות גדול מ-0";
pub const DUE_DATE_REQUIRED: &str = "תאריך פירעון חובה";
pub const DATE_INVALID: &str = "תאריך לא תקין";
pub const FIRST_NAME_REQUIRED: &str = "שם פרטי חובה";
pub const LAST_NAME_REQUIRED: &str = "שם משפחה חובה";
pub const EMAIL_CONTACT_REQUIRED: &str = "נדרש לפחות אימייל אחד";
pub const EMAIL_INVALID: &str = "אימייל לא תקין";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactForm {
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub value: String,
}

impl ContactForm {
    pub fn empty(contact_type: ContactType) -> Self {
        Self {
            contact_type,
            value: String::new(),
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::empty(ContactType::Phone)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonForm {
    pub first_name: String,
    pub last_name: String,
    pub identification_number: String,
    pub contacts: Vec<ContactForm>,
}

impl Default for PersonForm {
    /// A blank person with an email and a phone slot.
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            identification_number: String::new(),
            contacts: vec![
                ContactForm::empty(ContactType::Email),
                ContactForm::empty(ContactType::Phone),
            ],
        }
    }
}

impl PersonForm {
    fn has_email(&self) -> bool {
        self.contacts
            .iter()
            .any(|c| c.contact_type == ContactType::Email && !c.value.trim().is_empty())
    }

    fn to_new_person(&self) -> NewPerson {
        NewPerson {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            identification_number: self.identification_number.clone(),
            contacts: self
                .contacts
                .iter()
                .filter_map(|c| NewContact::new(c.contact_type, &c.value))
                .collect(),
        }
    }
}

/// Data entered in the end-customer intake form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AddEndCustomerForm {
    pub name: String,
    pub total_debt: String,
    pub due_date: String,
    pub payment_method: PaymentMethod,
    pub charge_type: ChargeType,
    pub initial_balance: String,
    pub recurring_start_date: String,
    pub recurring_interval_value: String,
    pub recurring_interval_unit: IntervalUnit,
    pub recurring_end_date: String,
    pub persons: Vec<PersonForm>,
}

impl Default for AddEndCustomerForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            total_debt: String::new(),
            due_date: String::new(),
            payment_method: PaymentMethod::default(),
            charge_type: ChargeType::default(),
            initial_balance: String::new(),
            recurring_start_date: String::new(),
            recurring_interval_value: "1".to_string(),
            recurring_interval_unit: IntervalUnit::default(),
            recurring_end_date: String::new(),
            persons: vec![PersonForm::default()],
        }
    }
}

/// Free-text top-level fields of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndCustomerField {
    Name,
    TotalDebt,
    DueDate,
    InitialBalance,
    RecurringStartDate,
    RecurringIntervalValue,
    RecurringEndDate,
}

impl EndCustomerField {
    pub const fn key(self) -> &'static str {
        match self {
            EndCustomerField::Name => "name",
            EndCustomerField::TotalDebt => "totalDebt",
            EndCustomerField::DueDate => "dueDate",
            EndCustomerField::InitialBalance => "initialBalance",
            EndCustomerField::RecurringStartDate => "recurringStartDate",
            EndCustomerField::RecurringIntervalValue => "recurringIntervalValue",
            EndCustomerField::RecurringEndDate => "recurringEndDate",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonField {
    FirstName,
    LastName,
    IdentificationNumber,
}

impl PersonField {
    pub const fn key(self) -> &'static str {
        match self {
            PersonField::FirstName => "firstName",
            PersonField::LastName => "lastName",
            PersonField::IdentificationNumber => "identificationNumber",
        }
    }
}

/// Input events of the end-customer intake form.
#[derive(Clone, Debug, PartialEq)]
pub enum EndCustomerEvent {
    FieldChanged(EndCustomerField, String),
    PaymentMethodChanged(PaymentMethod),
    ChargeTypeChanged(ChargeType),
    IntervalUnitChanged(IntervalUnit),
    PersonChanged {
        person: usize,
        field: PersonField,
        value: String,
    },
    ContactTypeChanged {
        person: usize,
        contact: usize,
        contact_type: ContactType,
    },
    ContactValueChanged {
        person: usize,
        contact: usize,
        value: String,
    },
    PersonAdded,
    PersonRemoved(usize),
    ContactAdded(usize),
    ContactRemoved {
        person: usize,
        contact: usize,
    },
}

impl AddEndCustomerForm {
    fn field_mut(&mut self, field: EndCustomerField) -> &mut String {
        match field {
            EndCustomerField::Name => &mut self.name,
            EndCustomerField::TotalDebt => &mut self.total_debt,
            EndCustomerField::DueDate => &mut self.due_date,
            EndCustomerField::InitialBalance => &mut self.initial_balance,
            EndCustomerField::RecurringStartDate => &mut self.recurring_start_date,
            EndCustomerField::RecurringIntervalValue => &mut self.recurring_interval_value,
            EndCustomerField::RecurringEndDate => &mut self.recurring_end_date,
        }
    }

    fn person_mut(&mut self, person: usize) -> Result<&mut PersonForm, FormError> {
        self.persons
            .get_mut(person)
            .ok_or(FormError::UnknownPerson(person))
    }

    fn contact_mut(&mut self, person: usize, contact: usize) -> Result<&mut ContactForm, FormError> {
        self.person_mut(person)?
            .contacts
            .get_mut(contact)
            .ok_or(FormError::UnknownContact { person, contact })
    }

    fn is_recurring(&self) -> bool {
        self.charge_type == ChargeType::Recurring
    }

    /// Builds the end client payload from a form that passed validation.
    pub fn to_new_end_client(&self, client_id: i64) -> Result<NewEndClient, FormError> {
        let due_date = parse_form_date(&self.due_date)?;
        let persons: Vec<NewPerson> = self.persons.iter().map(PersonForm::to_new_person).collect();
        let users = users_from_persons(&persons);

        let (interval_value, interval_unit, recurring_end_date, start_date) = if self.is_recurring()
        {
            let interval_value = self
                .recurring_interval_value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|value| *value > 0);
            let end_date = optional_date(&self.recurring_end_date)?;
            let start_date = optional_date(&self.recurring_start_date)?.unwrap_or(due_date);
            (
                interval_value,
                Some(self.recurring_interval_unit),
                end_date,
                Some(start_date),
            )
        } else {
            (None, None, None, None)
        };

        Ok(NewEndClient {
            client_id,
            name: self.name.clone(),
            total_debt: self.total_debt.clone(),
            persons,
            users,
            initial_prepaid_balance: Some(self.initial_balance.clone())
                .filter(|balance| !balance.is_empty()),
            initial_charge_amount: self.total_debt.clone(),
            initial_charge_due_date: due_date,
            initial_charge_type: self.charge_type,
            interval_value,
            interval_unit,
            recurring_end_date,
            start_date,
        })
    }

    /// Builds the debt record for the end client created from this form.
    pub fn to_new_debt(&self, end_client_id: i64) -> Result<NewDebt, FormError> {
        Ok(NewDebt {
            end_client_id,
            amount: self.total_debt.clone(),
            due_date: parse_form_date(&self.due_date)?,
            payment_method: self.payment_method,
            charge_type: self.charge_type,
        })
    }
}

fn optional_date(value: &str) -> Result<Option<chrono::NaiveDate>, FormError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(parse_form_date(value)?))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl Form for AddEndCustomerForm {
    type Event = EndCustomerEvent;

    fn reduce(state: &FormState<Self>, event: Self::Event) -> Result<FormState<Self>, FormError> {
        let mut data = state.data.clone();
        let mut errors = state.errors.clone();

        match event {
            EndCustomerEvent::FieldChanged(field, value) => {
                let result = match field {
                    EndCustomerField::Name => validate_name(&value),
                    EndCustomerField::TotalDebt => validate_amount(&value),
                    _ => Ok(()),
                };
                errors.record(field.key(), result);
                *data.field_mut(field) = value;
            }
            EndCustomerEvent::PaymentMethodChanged(method) => {
                data.payment_method = method;
                errors.remove("paymentMethod");
            }
            EndCustomerEvent::ChargeTypeChanged(charge_type) => {
                data.charge_type = charge_type;
                errors.remove("chargeType");
            }
            EndCustomerEvent::IntervalUnitChanged(unit) => {
                data.recurring_interval_unit = unit;
                errors.remove("recurringIntervalUnit");
            }
            EndCustomerEvent::PersonChanged {
                person,
                field,
                value,
            } => {
                let target = data.person_mut(person)?;
                let result = match field {
                    PersonField::FirstName | PersonField::LastName => validate_name(&value),
                    PersonField::IdentificationNumber => validate_id_number(&value),
                };
                match field {
                    PersonField::FirstName => target.first_name = value,
                    PersonField::LastName => target.last_name = value,
                    PersonField::IdentificationNumber => target.identification_number = value,
                }
                errors.record(person_key(person, field.key()), result);
            }
            EndCustomerEvent::ContactTypeChanged {
                person,
                contact,
                contact_type,
            } => {
                data.contact_mut(person, contact)?.contact_type = contact_type;
                errors.remove(&contact_key(person, contact, "type"));
            }
            EndCustomerEvent::ContactValueChanged {
                person,
                contact,
                value,
            } => {
                let target = data.contact_mut(person, contact)?;
                let result = match target.contact_type.field_kind() {
                    Some(kind) => kind.validate(&value),
                    None => Ok(()),
                };
                target.value = value;
                errors.record(contact_key(person, contact, "value"), result);
            }
            EndCustomerEvent::PersonAdded => {
                data.persons.push(PersonForm::default());
            }
            EndCustomerEvent::PersonRemoved(person) => {
                if person >= data.persons.len() {
                    return Err(FormError::UnknownPerson(person));
                }
                if data.persons.len() == 1 {
                    return Err(FormError::LastPerson);
                }
                data.persons.remove(person);
                errors = errors.rekeyed(|key| rekey_after_person_removal(key, person));
            }
            EndCustomerEvent::ContactAdded(person) => {
                data.person_mut(person)?
                    .contacts
                    .push(ContactForm::empty(ContactType::Phone));
            }
            EndCustomerEvent::ContactRemoved { person, contact } => {
                let contacts = &mut data.person_mut(person)?.contacts;
                if contact >= contacts.len() {
                    return Err(FormError::UnknownContact { person, contact });
                }
                if contacts.len() == 1 {
                    return Err(FormError::LastContact);
                }
                contacts.remove(contact);
                errors = errors.rekeyed(|key| rekey_after_contact_removal(key, person, contact));
            }
        }

        Ok(FormState { data, errors })
    }

    fn validate(&self) -> ErrorMap {
        let mut errors = ErrorMap::new();

        if is_blank(&self.name) {
            errors.insert("name", NAME_REQUIRED);
        }
        if validate_amount(&self.total_debt).is_err() {
            errors.insert("totalDebt", TOTAL_DEBT_INVALID);
        }
        if self.due_date.is_empty() {
            errors.insert("dueDate", DUE_DATE_REQUIRED);
        } else if parse_form_date(&self.due_date).is_err() {
            errors.insert("dueDate", DATE_INVALID);
        }

        if self.is_recurring() {
            for (key, value) in [
                ("recurringStartDate", &self.recurring_start_date),
                ("recurringEndDate", &self.recurring_end_date),
            ] {
                if !is_blank(value) && parse_form_date(value).is_err() {
                    errors.insert(key, DATE_INVALID);
                }
            }
        }

        if self.persons.is_empty() {
            errors.insert("persons", FormError::LastPerson.to_string());
        }

        for (p, person) in self.persons.iter().enumerate() {
            if is_blank(&person.first_name) {
                errors.insert(person_key(p, "firstName"), FIRST_NAME_REQUIRED);
            }
            if is_blank(&person.last_name) {
                errors.insert(person_key(p, "lastName"), LAST_NAME_REQUIRED);
            }
            errors.record(
                person_key(p, "identificationNumber"),
                validate_id_number(&person.identification_number),
            );

            if !person.has_email() {
                errors.insert(person_key(p, "email"), EMAIL_CONTACT_REQUIRED);
            }

            for (c, contact) in person.contacts.iter().enumerate() {
                if contact.contact_type == ContactType::Email
                    && !is_blank(&contact.value)
                    && !is_email_shape(&contact.value)
                {
                    errors.insert(person_contact_key(p, c), EMAIL_INVALID);
                }
            }
        }

        errors
    }
}
