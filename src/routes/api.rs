use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::Local;

use crate::dto::api::{EndClientRequest, FieldValidationResponse, FieldValueRequest};
use crate::forms::admin_end_customer::AdminEndCustomerForm;
use crate::forms::client::AddClientForm;
use crate::forms::payment::PaymentForm;
use crate::routes::service_error_response;
use crate::services::validation::{
    list_options, payment_options, validate_admin_end_customer, validate_client,
    validate_end_client, validate_field, validate_payment,
};

#[get("/v1/options")]
pub async fn api_v1_options() -> impl Responder {
    HttpResponse::Ok().json(list_options())
}

#[post("/v1/fields/{kind}/validate")]
pub async fn api_v1_validate_field(
    kind: web::Path<String>,
    body: web::Json<FieldValueRequest>,
) -> impl Responder {
    match validate_field(&kind, &body.value) {
        Ok(error) => HttpResponse::Ok().json(FieldValidationResponse { error }),
        Err(e) => service_error_response(e),
    }
}

#[post("/v1/end-clients/validate")]
pub async fn api_v1_validate_end_client(body: web::Json<EndClientRequest>) -> impl Responder {
    let EndClientRequest { client_id, form } = body.into_inner();
    match validate_end_client(client_id, form) {
        Ok(payload) => HttpResponse::Ok().json(payload),
        Err(e) => service_error_response(e),
    }
}

#[post("/v1/end-customers/validate")]
pub async fn api_v1_validate_admin_end_customer(
    form: web::Json<AdminEndCustomerForm>,
) -> impl Responder {
    match validate_admin_end_customer(form.into_inner()) {
        Ok(payload) => HttpResponse::Ok().json(payload),
        Err(e) => service_error_response(e),
    }
}

#[post("/v1/clients/validate")]
pub async fn api_v1_validate_client(form: web::Json<AddClientForm>) -> impl Responder {
    match validate_client(form.into_inner()) {
        Ok(payload) => HttpResponse::Ok().json(payload),
        Err(e) => service_error_response(e),
    }
}

#[get("/v1/payments/options")]
pub async fn api_v1_payment_options() -> impl Responder {
    HttpResponse::Ok().json(payment_options(Local::now().date_naive()))
}

#[post("/v1/payments/validate")]
pub async fn api_v1_validate_payment(form: web::Json<PaymentForm>) -> impl Responder {
    let today = Local::now().date_naive();
    match validate_payment(form.into_inner(), today) {
        Ok(confirmation) => HttpResponse::Ok().json(confirmation),
        Err(e) => service_error_response(e),
    }
}
