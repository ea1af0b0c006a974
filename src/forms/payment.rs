//! Card payment form walked through by end customers.
//!
//! The screen has three steps. Leaving the card step and confirming both run
//! the card checks; a failed check lands back on the card step.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::payment::PaymentConfirmation;
use crate::forms::{ErrorMap, Form, FormError, FormState};
use crate::validation::checksum::ISRAELI_ID_LENGTH;
use crate::validation::{
    CARD_NUMBER_LENGTH, FieldError, validate_address, validate_card_number, validate_city,
    validate_cvv, validate_id_number, validate_name, validate_zip_code,
};

pub const CARD_NUMBER_REQUIRED: &str = "מספר כרטיס חובה";
pub const CARD_HOLDER_REQUIRED: &str = "שם בעל הכרטיס חובה";
pub const EXPIRY_REQUIRED: &str = "תוקף חובה";
pub const CARD_EXPIRED: &str = "הכרטיס פג תוקף";
pub const CVV_REQUIRED: &str = "CVV חובה";
pub const ID_NUMBER_REQUIRED: &str = "תעודת זהות חובה";
pub const CITY_REQUIRED: &str = "עיר חובה";

/// Maximum number of CVV characters the input keeps.
const CVV_INPUT_LENGTH: usize = 3;
/// Number of selectable expiry years, starting with the current one.
const EXPIRY_YEARS: i32 = 10;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStep {
    #[default]
    Details,
    Card,
    Confirm,
    Submitted,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentForm {
    pub step: PaymentStep,
    pub selected_invoices: Vec<String>,
    pub payment_amount: f64,
    pub card_number: String,
    pub card_holder: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: String,
    pub id_number: String,
    pub city: String,
    pub address: String,
    pub zip_code: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentField {
    CardNumber,
    CardHolder,
    ExpiryMonth,
    ExpiryYear,
    Cvv,
    IdNumber,
    City,
    Address,
    ZipCode,
}

impl PaymentField {
    pub const fn key(self) -> &'static str {
        match self {
            PaymentField::CardNumber => "cardNumber",
            PaymentField::CardHolder => "cardHolder",
            PaymentField::ExpiryMonth => "expiryMonth",
            PaymentField::ExpiryYear => "expiryYear",
            PaymentField::Cvv => "cvv",
            PaymentField::IdNumber => "idNumber",
            PaymentField::City => "city",
            PaymentField::Address => "address",
            PaymentField::ZipCode => "zipCode",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PaymentEvent {
    FieldChanged(PaymentField, String),
    /// Moves to the next step; `today` decides card expiry.
    Advance { today: NaiveDate },
    Back,
}

/// Removes whitespace from a typed card number and caps it at 16 characters.
pub fn sanitize_card_number(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(CARD_NUMBER_LENGTH)
        .collect()
}

/// Groups a card number in blocks of four for display.
pub fn format_card_number(value: &str) -> String {
    let cleaned: Vec<char> = value.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shows only the last four characters of a card number.
pub fn masked_card_number(value: &str) -> String {
    let chars: Vec<char> = value.chars().filter(|c| !c.is_whitespace()).collect();
    let last_four: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format_card_number(&format!("{}{last_four}", "•".repeat(CARD_NUMBER_LENGTH - 4)))
}

/// Expiry month options, `01` to `12`.
pub fn month_options() -> Vec<String> {
    (1..=12).map(|month| format!("{month:02}")).collect()
}

/// Expiry year options starting with `current_year`.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (current_year..current_year.saturating_add(EXPIRY_YEARS)).collect()
}

impl PaymentForm {
    fn field_mut(&mut self, field: PaymentField) -> &mut String {
        match field {
            PaymentField::CardNumber => &mut self.card_number,
            PaymentField::CardHolder => &mut self.card_holder,
            PaymentField::ExpiryMonth => &mut self.expiry_month,
            PaymentField::ExpiryYear => &mut self.expiry_year,
            PaymentField::Cvv => &mut self.cvv,
            PaymentField::IdNumber => &mut self.id_number,
            PaymentField::City => &mut self.city,
            PaymentField::Address => &mut self.address,
            PaymentField::ZipCode => &mut self.zip_code,
        }
    }

    fn expiry(&self) -> Option<(i32, u32)> {
        let month = self.expiry_month.trim().parse::<u32>().ok()?;
        let year = self.expiry_year.trim().parse::<i32>().ok()?;
        (1..=12).contains(&month).then_some((year, month))
    }

    /// Runs every check of the card step against the given date.
    pub fn validate_card_step(&self, today: NaiveDate) -> ErrorMap {
        let mut errors = ErrorMap::new();

        let card_number: String = self.card_number.chars().filter(|c| !c.is_whitespace()).collect();
        if card_number.is_empty() {
            errors.insert("cardNumber", CARD_NUMBER_REQUIRED);
        } else if card_number.chars().count() < CARD_NUMBER_LENGTH {
            errors.record("cardNumber", Err(FieldError::CardLength));
        } else {
            errors.record("cardNumber", validate_card_number(&card_number));
        }

        if self.card_holder.trim().is_empty() {
            errors.insert("cardHolder", CARD_HOLDER_REQUIRED);
        } else {
            errors.record("cardHolder", validate_name(&self.card_holder));
        }

        match self.expiry() {
            None => errors.insert("expiry", EXPIRY_REQUIRED),
            Some(expiry) if expiry < (today.year(), today.month()) => {
                errors.insert("expiry", CARD_EXPIRED)
            }
            Some(_) => {}
        }

        if self.cvv.is_empty() {
            errors.insert("cvv", CVV_REQUIRED);
        } else {
            errors.record("cvv", validate_cvv(&self.cvv));
        }

        let id_digits = self
            .id_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .count();
        if self.id_number.trim().is_empty() {
            errors.insert("idNumber", ID_NUMBER_REQUIRED);
        } else if id_digits < ISRAELI_ID_LENGTH {
            errors.record("idNumber", Err(FieldError::IdLength));
        } else {
            errors.record("idNumber", validate_id_number(&self.id_number));
        }

        if self.city.trim().is_empty() {
            errors.insert("city", CITY_REQUIRED);
        } else {
            errors.record("city", validate_city(&self.city));
        }
        errors.record("address", validate_address(&self.address));
        errors.record("zipCode", validate_zip_code(&self.zip_code));

        errors
    }

    /// Confirmation summary; meaningful once the card step passed.
    pub fn confirmation(&self) -> PaymentConfirmation {
        PaymentConfirmation {
            selected_invoices: self.selected_invoices.clone(),
            payment_amount: self.payment_amount,
            masked_card_number: masked_card_number(&self.card_number),
            card_holder: self.card_holder.trim().to_string(),
        }
    }
}

impl Form for PaymentForm {
    type Event = PaymentEvent;

    fn reduce(state: &FormState<Self>, event: Self::Event) -> Result<FormState<Self>, FormError> {
        if state.data.step == PaymentStep::Submitted {
            return Err(FormError::AlreadySubmitted);
        }

        let mut data = state.data.clone();
        let mut errors = state.errors.clone();

        match event {
            PaymentEvent::FieldChanged(field, value) => {
                let value = match field {
                    PaymentField::CardNumber => sanitize_card_number(&value),
                    PaymentField::Cvv => value.chars().take(CVV_INPUT_LENGTH).collect(),
                    _ => value,
                };
                let result = match field {
                    PaymentField::CardNumber => validate_card_number(&value),
                    PaymentField::CardHolder => validate_name(&value),
                    PaymentField::Cvv => validate_cvv(&value),
                    PaymentField::IdNumber => validate_id_number(&value),
                    PaymentField::City => validate_city(&value),
                    PaymentField::Address => validate_address(&value),
                    PaymentField::ZipCode => validate_zip_code(&value),
                    PaymentField::ExpiryMonth | PaymentField::ExpiryYear => {
                        errors.remove("expiry");
                        Ok(())
                    }
                };
                errors.record(field.key(), result);
                *data.field_mut(field) = value;
            }
            PaymentEvent::Advance { today } => match data.step {
                PaymentStep::Details => data.step = PaymentStep::Card,
                PaymentStep::Card | PaymentStep::Confirm | PaymentStep::Submitted => {
                    errors = data.validate_card_step(today);
                    if errors.is_empty() {
                        data.step = match data.step {
                            PaymentStep::Card => PaymentStep::Confirm,
                            _ => PaymentStep::Submitted,
                        };
                    } else {
                        log::debug!("Card step blocked by {} error(s)", errors.len());
                        data.step = PaymentStep::Card;
                    }
                }
            },
            PaymentEvent::Back => {
                data.step = match data.step {
                    PaymentStep::Confirm => PaymentStep::Card,
                    _ => PaymentStep::Details,
                };
            }
        }

        Ok(FormState { data, errors })
    }

    fn validate(&self) -> ErrorMap {
        self.validate_card_step(Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn card_form() -> PaymentForm {
        PaymentForm {
            step: PaymentStep::Card,
            selected_invoices: vec!["INV-001".to_string(), "INV-002".to_string()],
            payment_amount: 8500.0,
            card_number: "4532015112830366".to_string(),
            card_holder: "Dana Cohen".to_string(),
            expiry_month: "10".to_string(),
            expiry_year: "2026".to_string(),
            cvv: "123".to_string(),
            id_number: "123456782".to_string(),
            city: "חיפה".to_string(),
            address: String::new(),
            zip_code: String::new(),
        }
    }

    #[test]
    fn card_helpers() {
        assert_eq!(sanitize_card_number("4532 0151 1283 0366 99"), "4532015112830366");
        assert_eq!(format_card_number("4532015112830366"), "4532 0151 1283 0366");
        assert_eq!(format_card_number("45320"), "4532 0");
        assert_eq!(masked_card_number("4532015112830366"), "•••• •••• •••• 0366");
        assert_eq!(masked_card_number("12"), "•••• •••• •••• 12");
    }

    #[test]
    fn select_options() {
        let months = month_options();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], "01");
        assert_eq!(months[11], "12");
        assert_eq!(year_options(2026), (2026..=2035).collect::<Vec<_>>());
    }

    #[test]
    fn input_is_sanitized_before_validation() {
        let state = FormState::new(PaymentForm::default())
            .apply(PaymentEvent::FieldChanged(
                PaymentField::CardNumber,
                "4532 0151 1283 0367".to_string(),
            ))
            .unwrap()
            .apply(PaymentEvent::FieldChanged(PaymentField::Cvv, "12345".to_string()))
            .unwrap();

        assert_eq!(state.data().card_number, "4532015112830367");
        assert_eq!(state.errors().get("cardNumber"), Some("מספר כרטיס לא תקין"));
        assert_eq!(state.data().cvv, "123");
        assert!(!state.errors().contains_key("cvv"));
    }

    #[test]
    fn details_step_advances_without_checks() {
        let state = FormState::new(PaymentForm::default())
            .apply(PaymentEvent::Advance { today: today() })
            .unwrap();
        assert_eq!(state.data().step, PaymentStep::Card);
        assert!(state.errors().is_empty());
    }

    #[test]
    fn card_step_blocks_on_errors() {
        let mut form = card_form();
        form.card_number = "4532".to_string();
        form.expiry_year = "2025".to_string();
        form.id_number = "12345".to_string();

        let state = FormState::new(form)
            .apply(PaymentEvent::Advance { today: today() })
            .unwrap();

        assert_eq!(state.data().step, PaymentStep::Card);
        assert_eq!(
            state.errors().get("cardNumber"),
            Some("מספר כרטיס חייב להיות בדיוק 16 ספרות")
        );
        assert_eq!(state.errors().get("expiry"), Some(CARD_EXPIRED));
        assert_eq!(
            state.errors().get("idNumber"),
            Some("תעודת זהות חייבת להיות בדיוק 9 ספרות")
        );
    }

    #[test]
    fn card_step_requires_fields() {
        let errors = PaymentForm::default().validate_card_step(today());

        assert_eq!(errors.get("cardNumber"), Some(CARD_NUMBER_REQUIRED));
        assert_eq!(errors.get("cardHolder"), Some(CARD_HOLDER_REQUIRED));
        assert_eq!(errors.get("expiry"), Some(EXPIRY_REQUIRED));
        assert_eq!(errors.get("cvv"), Some(CVV_REQUIRED));
        assert_eq!(errors.get("idNumber"), Some(ID_NUMBER_REQUIRED));
        assert_eq!(errors.get("city"), Some(CITY_REQUIRED));
        assert!(!errors.contains_key("zipCode"));
    }

    #[test]
    fn card_valid_through_its_expiry_month() {
        assert!(card_form().validate_card_step(today()).is_empty());

        let mut form = card_form();
        form.expiry_month = "13".to_string();
        assert_eq!(
            form.validate_card_step(today()).get("expiry"),
            Some(EXPIRY_REQUIRED)
        );
    }

    #[test]
    fn full_walk_to_submission() {
        let state = FormState::new(card_form())
            .apply(PaymentEvent::Advance { today: today() })
            .unwrap();
        assert_eq!(state.data().step, PaymentStep::Confirm);

        let back = state.apply(PaymentEvent::Back).unwrap();
        assert_eq!(back.data().step, PaymentStep::Card);

        let done = state
            .apply(PaymentEvent::Advance { today: today() })
            .unwrap();
        assert_eq!(done.data().step, PaymentStep::Submitted);
        assert!(matches!(
            done.apply(PaymentEvent::Advance { today: today() }),
            Err(FormError::AlreadySubmitted)
        ));
        assert!(matches!(
            done.apply(PaymentEvent::FieldChanged(PaymentField::Cvv, "999".to_string())),
            Err(FormError::AlreadySubmitted)
        ));
    }

    #[test]
    fn edit_on_confirm_returns_to_card_step() {
        let confirm = FormState::new(card_form())
            .apply(PaymentEvent::Advance { today: today() })
            .unwrap();
        assert_eq!(confirm.data().step, PaymentStep::Confirm);

        let edited = confirm
            .apply(PaymentEvent::FieldChanged(
                PaymentField::CardNumber,
                "4532015112830367".to_string(),
            ))
            .unwrap();
        let state = edited
            .apply(PaymentEvent::Advance { today: today() })
            .unwrap();

        assert_eq!(state.data().step, PaymentStep::Card);
        assert_eq!(state.errors().get("cardNumber"), Some("מספר כרטיס לא תקין"));
    }

    #[test]
    fn year_options_stop_at_the_largest_year() {
        let years = year_options(i32::MAX - 2);
        assert_eq!(years, vec![i32::MAX - 2, i32::MAX - 1]);
    }

    #[test]
    fn confirmation_masks_card() {
        let confirmation = card_form().confirmation();
        assert_eq!(confirmation.masked_card_number, "•••• •••• •••• 0366");
        assert_eq!(confirmation.selected_invoices.len(), 2);
        assert_eq!(confirmation.payment_amount, 8500.0);
    }
}
