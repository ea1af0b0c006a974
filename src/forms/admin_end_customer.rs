//! Forms for administrators adding an end customer directly.

use serde::{Deserialize, Serialize};

use crate::domain::end_customer::AdminNewEndCustomer;
use crate::domain::types::EndCustomerStatus;
use crate::forms::end_customer::{EMAIL_INVALID, FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED};
use crate::forms::{ErrorMap, Form, FormError, FormState};
use crate::validation::is_email_shape;

pub const ID_NUMBER_REQUIRED: &str = "מספר זיהוי חובה";
pub const PHONE_REQUIRED: &str = "טלפון חובה";
pub const EMAIL_REQUIRED: &str = "אימייל חובה";

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminEndCustomerForm {
    pub first_name: String,
    pub last_name: String,
    pub identification_number: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
    pub status: EndCustomerStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminEndCustomerField {
    FirstName,
    LastName,
    IdentificationNumber,
    Address,
    Phone,
    Email,
    Notes,
}

impl AdminEndCustomerField {
    pub const fn key(self) -> &'static str {
        match self {
            AdminEndCustomerField::FirstName => "firstName",
            AdminEndCustomerField::LastName => "lastName",
            AdminEndCustomerField::IdentificationNumber => "identificationNumber",
            AdminEndCustomerField::Address => "address",
            AdminEndCustomerField::Phone => "phone",
            AdminEndCustomerField::Email => "email",
            AdminEndCustomerField::Notes => "notes",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AdminEndCustomerEvent {
    FieldChanged(AdminEndCustomerField, String),
    StatusChanged(EndCustomerStatus),
}

impl AdminEndCustomerForm {
    fn field_mut(&mut self, field: AdminEndCustomerField) -> &mut String {
        match field {
            AdminEndCustomerField::FirstName => &mut self.first_name,
            AdminEndCustomerField::LastName => &mut self.last_name,
            AdminEndCustomerField::IdentificationNumber => &mut self.identification_number,
            AdminEndCustomerField::Address => &mut self.address,
            AdminEndCustomerField::Phone => &mut self.phone,
            AdminEndCustomerField::Email => &mut self.email,
            AdminEndCustomerField::Notes => &mut self.notes,
        }
    }
}

impl Form for AdminEndCustomerForm {
    type Event = AdminEndCustomerEvent;

    /// Any change clears the error of the changed field; checks run on submit.
    fn reduce(state: &FormState<Self>, event: Self::Event) -> Result<FormState<Self>, FormError> {
        let mut data = state.data.clone();
        let mut errors = state.errors.clone();

        match event {
            AdminEndCustomerEvent::FieldChanged(field, value) => {
                *data.field_mut(field) = value;
                errors.remove(field.key());
            }
            AdminEndCustomerEvent::StatusChanged(status) => {
                data.status = status;
                errors.remove("status");
            }
        }

        Ok(FormState { data, errors })
    }

    fn validate(&self) -> ErrorMap {
        let mut errors = ErrorMap::new();

        let required = [
            ("firstName", &self.first_name, FIRST_NAME_REQUIRED),
            ("lastName", &self.last_name, LAST_NAME_REQUIRED),
            ("identificationNumber", &self.identification_number, ID_NUMBER_REQUIRED),
            ("phone", &self.phone, PHONE_REQUIRED),
        ];
        for (key, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(key, message);
            }
        }

        if self.email.trim().is_empty() {
            errors.insert("email", EMAIL_REQUIRED);
        } else if !is_email_shape(&self.email) {
            errors.insert("email", EMAIL_INVALID);
        }

        errors
    }
}

impl From<&AdminEndCustomerForm> for AdminNewEndCustomer {
    fn from(form: &AdminEndCustomerForm) -> Self {
        AdminNewEndCustomer::new(
            form.first_name.clone(),
            form.last_name.clone(),
            form.identification_number.clone(),
            Some(form.address.clone()),
            form.phone.clone(),
            form.email.clone(),
            Some(form.notes.clone()),
            form.status,
        )
    }
}
