//! Option catalogues and small value helpers shared by the forms.
//!
//! Every select box in the back-office is backed by one of the enums below.
//! Each variant carries its wire value (what the backend expects), a Hebrew
//! display label and, where relevant, derived flags such as
//! [`EntityType::requires_vat`].
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::FieldKind;

/// Date format produced by HTML date inputs.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors produced when attempting to construct a constrained value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Value is not one of the options of the named catalogue.
    #[error("unknown {kind} option: {value}")]
    UnknownOption { kind: &'static str, value: String },
    /// Value is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// A `{value, label}` pair as rendered in a select box.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Parses a trimmed `YYYY-MM-DD` date as entered in a form.
pub fn parse_form_date(value: &str) -> Result<NaiveDate, TypeConstraintError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, FORM_DATE_FORMAT)
        .map_err(|_| TypeConstraintError::InvalidDate(trimmed.to_string()))
}

/// Trims an optional text field, mapping blank input to `None`.
pub fn optional_text(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|s| !s.is_empty())
}

/// Macro to generate a closed option catalogue with wire values and labels.
macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal $(, default = $default:ident)? {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every option in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value sent over the wire.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Hebrew label shown to the user.
            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Options in the shape consumed by select boxes.
            pub fn options() -> Vec<SelectOption> {
                Self::ALL
                    .iter()
                    .map(|option| SelectOption {
                        value: option.as_str(),
                        label: option.label(),
                    })
                    .collect()
            }
        }

        $(
            impl Default for $name {
                fn default() -> Self {
                    $name::$default
                }
            }
        )?

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str() == s)
                    .ok_or_else(|| TypeConstraintError::UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

option_enum!(
    /// How an end customer settles a debt.
    PaymentMethod, "payment method", default = Cash {
        Cash => ("CASH", "מזומן"),
        Credit => ("CREDIT", "כרטיס אשראי"),
        BankTransfer => ("BANK_TRANSFER", "העברה בנקאית"),
        Check => ("CHECK", "צ'ק"),
    }
);

option_enum!(
    /// Whether a charge happens once or repeats on an interval.
    ChargeType, "charge type", default = OneTime {
        OneTime => ("ONE_TIME", "חד פעמי"),
        Recurring => ("RECURRING", "מחזורי"),
    }
);

option_enum!(
    IntervalUnit, "interval unit", default = Months {
        Days => ("DAYS", "ימים"),
        Months => ("MONTHS", "חודשים"),
        Years => ("YEARS", "שנים"),
    }
);

option_enum!(
    /// Channel of a single contact detail of a person.
    ContactType, "contact type" {
        Email => ("EMAIL", "אימייל"),
        Phone => ("PHONE", "טלפון"),
        Mobile => ("MOBILE", "נייד"),
        Fax => ("FAX", "פקס"),
        Other => ("OTHER", "אחר"),
    }
);

option_enum!(
    /// Legal form of a business client.
    EntityType, "entity type", default = Company {
        Company => ("COMPANY", "חברה"),
        PrivatePerson => ("PRIVATE_PERSON", "אדם פרטי"),
        Business => ("BUSINESS", "עוסק"),
        Nonprofit => ("NONPROFIT", "עמותה"),
        Other => ("OTHER", "אחר"),
    }
);

option_enum!(
    /// Settlement terms agreed with a business client.
    PaymentTerms, "payment terms", default = Net30 {
        Immediate => ("0", "תשלום מיידי"),
        Net30 => ("30", "שוטף + 30"),
        Net60 => ("60", "שוטף + 60"),
        Net90 => ("90", "שוטף + 90"),
    }
);

option_enum!(
    EndCustomerStatus, "status", default = Active {
        Active => ("ACTIVE", "פעיל"),
        Inactive => ("INACTIVE", "לא פעיל"),
    }
);

impl ContactType {
    /// Validator applied to the contact value, if any.
    pub const fn field_kind(self) -> Option<FieldKind> {
        match self {
            ContactType::Email => Some(FieldKind::Email),
            ContactType::Phone | ContactType::Mobile => Some(FieldKind::Phone),
            ContactType::Fax | ContactType::Other => None,
        }
    }

    pub const fn is_phone(self) -> bool {
        matches!(self, ContactType::Phone | ContactType::Mobile)
    }
}

impl EntityType {
    /// Whether a VAT / company registration number must be supplied.
    pub const fn requires_vat(self) -> bool {
        matches!(self, EntityType::Company | EntityType::Business)
    }
}

impl PaymentTerms {
    /// Days after the end of the month until payment is due.
    pub const fn days(self) -> u32 {
        match self {
            PaymentTerms::Immediate => 0,
            PaymentTerms::Net30 => 30,
            PaymentTerms::Net60 => 60,
            PaymentTerms::Net90 => 90,
        }
    }
}

/// All option catalogues keyed by the name used by the forms.
pub fn option_catalogue() -> BTreeMap<&'static str, Vec<SelectOption>> {
    BTreeMap::from([
        ("paymentMethods", PaymentMethod::options()),
        ("chargeTypes", ChargeType::options()),
        ("intervalUnits", IntervalUnit::options()),
        ("contactTypes", ContactType::options()),
        ("entityTypes", EntityType::options()),
        ("paymentTerms", PaymentTerms::options()),
        ("statuses", EndCustomerStatus::options()),
    ])
}
