//! Business client intake form used by administrators.

use serde::{Deserialize, Serialize};

use crate::domain::client::{BankAccount, NewClient};
use crate::domain::types::{EntityType, PaymentTerms, optional_text};
use crate::forms::end_customer::{FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED};
use crate::forms::{ErrorMap, Form, FormError, FormState};
use crate::validation::{FieldKind, FieldResult};

pub const COMPANY_NAME_REQUIRED: &str = "שם החברה חובה";
pub const VAT_NUMBER_REQUIRED: &str = "מספר עוסק חובה";

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct AddClientForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub id_number: String,
    pub company_name: String,
    pub entity_type: EntityType,
    pub vat_number: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub credit_limit: String,
    pub payment_terms: PaymentTerms,
    pub bank_name: String,
    pub branch_number: String,
    pub account_number: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientField {
    FirstName,
    LastName,
    Email,
    Phone,
    IdNumber,
    CompanyName,
    VatNumber,
    Address,
    City,
    ZipCode,
    CreditLimit,
    BankName,
    BranchNumber,
    AccountNumber,
}

impl ClientField {
    pub const fn key(self) -> &'static str {
        match self {
            ClientField::FirstName => "firstName",
            ClientField::LastName => "lastName",
            ClientField::Email => "email",
            ClientField::Phone => "phone",
            ClientField::IdNumber => "idNumber",
            ClientField::CompanyName => "companyName",
            ClientField::VatNumber => "vatNumber",
            ClientField::Address => "address",
            ClientField::City => "city",
            ClientField::ZipCode => "zipCode",
            ClientField::CreditLimit => "creditLimit",
            ClientField::BankName => "bankName",
            ClientField::BranchNumber => "branchNumber",
            ClientField::AccountNumber => "accountNumber",
        }
    }

    const fn field_kind(self) -> Option<FieldKind> {
        match self {
            ClientField::FirstName | ClientField::LastName => Some(FieldKind::Name),
            ClientField::Email => Some(FieldKind::Email),
            ClientField::Phone => Some(FieldKind::Phone),
            ClientField::IdNumber => Some(FieldKind::IdNumber),
            ClientField::Address => Some(FieldKind::Address),
            ClientField::City => Some(FieldKind::City),
            ClientField::ZipCode => Some(FieldKind::ZipCode),
            ClientField::CreditLimit => Some(FieldKind::Amount),
            _ => None,
        }
    }

    /// Runs the field's validator; an empty credit limit is accepted.
    fn check(self, value: &str) -> FieldResult {
        match self.field_kind() {
            Some(FieldKind::Amount) if value.is_empty() => Ok(()),
            Some(kind) => kind.validate(value),
            None => Ok(()),
        }
    }

    const VALIDATED: [ClientField; 9] = [
        ClientField::FirstName,
        ClientField::LastName,
        ClientField::Email,
        ClientField::Phone,
        ClientField::IdNumber,
        ClientField::Address,
        ClientField::City,
        ClientField::ZipCode,
        ClientField::CreditLimit,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClientEvent {
    FieldChanged(ClientField, String),
    EntityTypeChanged(EntityType),
    PaymentTermsChanged(PaymentTerms),
}

impl AddClientForm {
    fn field(&self, field: ClientField) -> &str {
        match field {
            ClientField::FirstName => &self.first_name,
            ClientField::LastName => &self.last_name,
            ClientField::Email => &self.email,
            ClientField::Phone => &self.phone,
            ClientField::IdNumber => &self.id_number,
            ClientField::CompanyName => &self.company_name,
            ClientField::VatNumber => &self.vat_number,
            ClientField::Address => &self.address,
            ClientField::City => &self.city,
            ClientField::ZipCode => &self.zip_code,
            ClientField::CreditLimit => &self.credit_limit,
            ClientField::BankName => &self.bank_name,
            ClientField::BranchNumber => &self.branch_number,
            ClientField::AccountNumber => &self.account_number,
        }
    }

    fn field_mut(&mut self, field: ClientField) -> &mut String {
        match field {
            ClientField::FirstName => &mut self.first_name,
            ClientField::LastName => &mut self.last_name,
            ClientField::Email => &mut self.email,
            ClientField::Phone => &mut self.phone,
            ClientField::IdNumber => &mut self.id_number,
            ClientField::CompanyName => &mut self.company_name,
            ClientField::VatNumber => &mut self.vat_number,
            ClientField::Address => &mut self.address,
            ClientField::City => &mut self.city,
            ClientField::ZipCode => &mut self.zip_code,
            ClientField::CreditLimit => &mut self.credit_limit,
            ClientField::BankName => &mut self.bank_name,
            ClientField::BranchNumber => &mut self.branch_number,
            ClientField::AccountNumber => &mut self.account_number,
        }
    }

    /// Builds the client payload from a form that passed validation.
    pub fn to_new_client(&self) -> NewClient {
        NewClient {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.trim().to_string(),
            id_number: optional_text(&self.id_number),
            company_name: self.company_name.trim().to_string(),
            entity_type: self.entity_type,
            vat_number: optional_text(&self.vat_number),
            address: optional_text(&self.address),
            city: optional_text(&self.city),
            zip_code: optional_text(&self.zip_code),
            credit_limit: optional_text(&self.credit_limit),
            payment_terms: self.payment_terms,
            bank_account: BankAccount::new(
                &self.bank_name,
                &self.branch_number,
                &self.account_number,
            ),
        }
    }
}

impl Form for AddClientForm {
    type Event = ClientEvent;

    fn reduce(state: &FormState<Self>, event: Self::Event) -> Result<FormState<Self>, FormError> {
        let mut data = state.data.clone();
        let mut errors = state.errors.clone();

        match event {
            ClientEvent::FieldChanged(field, value) => {
                errors.record(field.key(), field.check(&value));
                *data.field_mut(field) = value;
            }
            ClientEvent::EntityTypeChanged(entity_type) => {
                data.entity_type = entity_type;
                errors.remove("entityType");
                if !entity_type.requires_vat() {
                    errors.remove("vatNumber");
                }
            }
            ClientEvent::PaymentTermsChanged(terms) => {
                data.payment_terms = terms;
                errors.remove("paymentTerms");
            }
        }

        Ok(FormState { data, errors })
    }

    fn validate(&self) -> ErrorMap {
        let mut errors = ErrorMap::new();

        for field in ClientField::VALIDATED {
            errors.record(field.key(), field.check(self.field(field)));
        }

        if self.first_name.trim().is_empty() {
            errors.insert("firstName", FIRST_NAME_REQUIRED);
        }
        if self.last_name.trim().is_empty() {
            errors.insert("lastName", LAST_NAME_REQUIRED);
        }
        if self.company_name.trim().is_empty() {
            errors.insert("companyName", COMPANY_NAME_REQUIRED);
        }
        if self.entity_type.requires_vat() && self.vat_number.trim().is_empty() {
            errors.insert("vatNumber", VAT_NUMBER_REQUIRED);
        }

        errors
    }
}
