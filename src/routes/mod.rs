//! HTTP handlers of the validation API.

use actix_web::{HttpResponse, Scope, web};
use log::error;

use crate::dto::api::ErrorsResponse;
use crate::forms::FormError;
use crate::routes::api::{
    api_v1_options, api_v1_payment_options, api_v1_validate_admin_end_customer,
    api_v1_validate_client, api_v1_validate_end_client, api_v1_validate_field,
    api_v1_validate_payment,
};
use crate::services::ServiceError;

pub mod api;

/// The `/api` scope with every validation endpoint registered.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(api_v1_options)
        .service(api_v1_validate_field)
        .service(api_v1_validate_end_client)
        .service(api_v1_validate_admin_end_customer)
        .service(api_v1_validate_client)
        .service(api_v1_payment_options)
        .service(api_v1_validate_payment)
}

/// Maps a service failure onto its HTTP response.
pub fn service_error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::UnknownField(_) => HttpResponse::NotFound().finish(),
        ServiceError::Form(FormError::Validation(errors)) => {
            HttpResponse::UnprocessableEntity().json(ErrorsResponse { errors })
        }
        ServiceError::Form(e) => {
            error!("Failed to build payload: {e}");
            HttpResponse::BadRequest().body(e.to_string())
        }
    }
}
