use serde::{Deserialize, Serialize};

use crate::domain::types::{EntityType, PaymentTerms};

/// Bank details a business client is paid out to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub bank_name: String,
    pub branch_number: String,
    pub account_number: String,
}

impl BankAccount {
    /// Returns `None` when every part of the account is blank.
    #[must_use]
    pub fn new(bank_name: &str, branch_number: &str, account_number: &str) -> Option<Self> {
        let parts = [bank_name.trim(), branch_number.trim(), account_number.trim()];
        if parts.iter().all(|part| part.is_empty()) {
            return None;
        }
        Some(Self {
            bank_name: parts[0].to_string(),
            branch_number: parts[1].to_string(),
            account_number: parts[2].to_string(),
        })
    }
}

/// Business client created by an administrator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub id_number: Option<String>,
    pub company_name: String,
    pub entity_type: EntityType,
    pub vat_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub credit_limit: Option<String>,
    pub payment_terms: PaymentTerms,
    pub bank_account: Option<BankAccount>,
}
