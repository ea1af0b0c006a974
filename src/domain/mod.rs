//! Typed payloads and option catalogues of the collection back-office.

pub mod client;
pub mod end_client;
pub mod end_customer;
pub mod payment;
pub mod types;
