use serde::{Deserialize, Serialize};

use crate::domain::types::EndCustomerStatus;

/// End customer created directly by an administrator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminNewEndCustomer {
    pub first_name: String,
    pub last_name: String,
    pub identification_number: String,
    pub address: Option<String>,
    pub phone: String,
    pub email: String,
    pub notes: Option<String>,
    pub status: EndCustomerStatus,
}

impl AdminNewEndCustomer {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: String,
        last_name: String,
        identification_number: String,
        address: Option<String>,
        phone: String,
        email: String,
        notes: Option<String>,
        status: EndCustomerStatus,
    ) -> Self {
        Self {
            first_name,
            last_name,
            identification_number,
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            phone,
            email,
            notes: notes
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status,
        }
    }
}
