//! DTO modules bridging the services with the JSON API.

pub mod api;
