use serde::{Deserialize, Serialize};

/// Summary of an accepted card payment as shown on the confirmation step.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub selected_invoices: Vec<String>,
    pub payment_amount: f64,
    pub masked_card_number: String,
    pub card_holder: String,
}
