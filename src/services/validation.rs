//! Server-side validation of single fields and whole forms.
//!
//! Each form endpoint runs the same submit pass the browser runs and, when it
//! succeeds, returns the payload the backend would receive.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::domain::client::NewClient;
use crate::domain::end_client::NewEndClient;
use crate::domain::end_customer::AdminNewEndCustomer;
use crate::domain::payment::PaymentConfirmation;
use crate::domain::types::{SelectOption, option_catalogue};
use crate::dto::api::PaymentOptionsResponse;
use crate::forms::admin_end_customer::AdminEndCustomerForm;
use crate::forms::client::AddClientForm;
use crate::forms::end_customer::AddEndCustomerForm;
use crate::forms::payment::{PaymentForm, month_options, year_options};
use crate::forms::{Form, FormError, FormState};
use crate::services::{ServiceError, ServiceResult};
use crate::validation::FieldKind;

/// Returns every option catalogue keyed by name.
pub fn list_options() -> BTreeMap<&'static str, Vec<SelectOption>> {
    option_catalogue()
}

/// Expiry months and years selectable as of `today`.
pub fn payment_options(today: NaiveDate) -> PaymentOptionsResponse {
    PaymentOptionsResponse {
        months: month_options(),
        years: year_options(today.year()),
    }
}

/// Runs the validator named `kind` on `value`.
///
/// Returns the Hebrew message when the value is rejected, `None` otherwise.
pub fn validate_field(kind: &str, value: &str) -> ServiceResult<Option<String>> {
    let kind: FieldKind = kind.parse().map_err(|e| {
        log::warn!("Rejected field validation request: {e}");
        ServiceError::from(e)
    })?;
    Ok(kind.validate(value).err().map(|e| e.to_string()))
}

fn submit<F: Form>(form: F, name: &str) -> Result<F, FormError> {
    let state = FormState::new(form);
    match state.submit() {
        Ok(data) => Ok(data.clone()),
        Err(e) => {
            log::info!("Rejected {name} form: {e}");
            Err(e)
        }
    }
}

/// Validates the end-customer intake form and builds the end client payload.
pub fn validate_end_client(client_id: i64, form: AddEndCustomerForm) -> ServiceResult<NewEndClient> {
    let form = submit(form, "end client")?;
    Ok(form.to_new_end_client(client_id)?)
}

/// Validates the administrator end-customer form.
pub fn validate_admin_end_customer(form: AdminEndCustomerForm) -> ServiceResult<AdminNewEndCustomer> {
    let form = submit(form, "end customer")?;
    Ok(AdminNewEndCustomer::from(&form))
}

/// Validates the business client intake form.
pub fn validate_client(form: AddClientForm) -> ServiceResult<NewClient> {
    let form = submit(form, "client")?;
    Ok(form.to_new_client())
}

/// Runs the card step checks of the payment form as of `today`.
pub fn validate_payment(form: PaymentForm, today: NaiveDate) -> ServiceResult<PaymentConfirmation> {
    let errors = form.validate_card_step(today);
    if !errors.is_empty() {
        log::info!("Rejected payment with {} error(s)", errors.len());
    }
    errors.into_result()?;
    Ok(form.confirmation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EntityType;

    #[test]
    fn field_validation_by_kind_name() {
        assert_eq!(validate_field("zip_code", "12345").unwrap(), None);
        assert_eq!(
            validate_field("email", "דנה@example.com").unwrap().as_deref(),
            Some("לא ניתן להשתמש בתווים בעברית בשדה מייל")
        );
        assert!(matches!(
            validate_field("iban", "x"),
            Err(ServiceError::UnknownField(kind)) if kind == "iban"
        ));
    }

    #[test]
    fn rejected_form_keeps_error_map() {
        let result = validate_client(AddClientForm {
            entity_type: EntityType::Company,
            ..AddClientForm::default()
        });

        match result {
            Err(ServiceError::Form(FormError::Validation(errors))) => {
                assert!(errors.contains_key("companyName"));
                assert!(errors.contains_key("vatNumber"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn payment_options_start_at_current_year() {
        let options = payment_options(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(options.months.len(), 12);
        assert_eq!(options.years.first(), Some(&2026));
        assert_eq!(options.years.last(), Some(&2035));
    }

    #[test]
    fn options_cover_every_catalogue() {
        let options = list_options();
        assert_eq!(options.len(), 7);
        assert_eq!(options["paymentTerms"][0].value, "0");
    }
}
