//! Request and response bodies of the validation API.

use serde::{Deserialize, Serialize};

use crate::forms::ErrorMap;
use crate::forms::end_customer::AddEndCustomerForm;

/// Body of `POST /api/v1/fields/{kind}/validate`.
#[derive(Debug, Deserialize)]
pub struct FieldValueRequest {
    #[serde(default)]
    pub value: String,
}

/// Outcome of a single field check; `error` is `null` when the value passes.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldValidationResponse {
    pub error: Option<String>,
}

/// Body returned with `422 Unprocessable Entity`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorsResponse {
    pub errors: ErrorMap,
}

/// End-customer form together with the client it is created for.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndClientRequest {
    pub client_id: i64,
    #[serde(flatten)]
    pub form: AddEndCustomerForm,
}

/// Expiry select options of the payment screen.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentOptionsResponse {
    pub months: Vec<String>,
    pub years: Vec<i32>,
}
