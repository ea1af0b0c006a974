//! Models shared by the service binary.

pub mod config;
