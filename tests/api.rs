use actix_web::{App, http::StatusCode, test};
use chrono::{Datelike, Local};
use serde_json::{Value, json};

use gvia_forms::routes::api_scope;

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let app = test::init_service(App::new().service(api_scope())).await;
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[actix_web::test]
async fn options_lists_every_catalogue() {
    let app = test::init_service(App::new().service(api_scope())).await;
    let req = test::TestRequest::get().uri("/api/v1/options").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["statuses"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        body["paymentMethods"][0],
        json!({"value": "CASH", "label": "מזומן"})
    );
}

#[actix_web::test]
async fn field_endpoint_returns_message_or_null() {
    let (status, body) = post_json(
        "/api/v1/fields/card_number/validate",
        json!({"value": "4532015112830367"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "מספר כרטיס לא תקין"}));

    let (status, body) = post_json(
        "/api/v1/fields/id_number/validate",
        json!({"value": "000000018"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": null}));

    let (_, body) = post_json("/api/v1/fields/phone/validate", json!({"value": "05-123"})).await;
    assert_eq!(
        body["error"],
        "מספר טלפון לא תקין - חייב להיות בין 9-15 ספרות"
    );
}

#[actix_web::test]
async fn unknown_field_kind_is_not_found() {
    let (status, _) = post_json("/api/v1/fields/iban/validate", json!({"value": "x"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn valid_end_client_returns_payload() {
    let (status, body) = post_json(
        "/api/v1/end-clients/validate",
        json!({
            "clientId": 7,
            "name": "חברת בדיקה",
            "totalDebt": "1500",
            "dueDate": "2026-12-01",
            "persons": [{
                "firstName": "דנה",
                "lastName": "כהן",
                "contacts": [{"type": "EMAIL", "value": "dana@example.com"}]
            }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clientId"], 7);
    assert_eq!(body["initialChargeDueDate"], "2026-12-01");
    assert_eq!(body["initialChargeType"], "ONE_TIME");
    assert_eq!(body["intervalValue"], Value::Null);
}

#[actix_web::test]
async fn invalid_end_client_returns_keyed_errors() {
    let (status, body) = post_json(
        "/api/v1/end-clients/validate",
        json!({"clientId": 7, "name": "", "totalDebt": "0", "persons": [{}]}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = &body["errors"];
    assert_eq!(errors["name"], "שם לקוח קצה חובה");
    assert_eq!(errors["totalDebt"], "סכום חוב חייב להיות גדול מ-0");
    assert_eq!(errors["dueDate"], "תאריך פירעון חובה");
    assert_eq!(errors["person_0_firstName"], "שם פרטי חובה");
    assert_eq!(errors["person_0_email"], "נדרש לפחות אימייל אחד");
}

#[actix_web::test]
async fn end_client_without_persons_is_rejected() {
    let (status, body) = post_json(
        "/api/v1/end-clients/validate",
        json!({
            "clientId": 7,
            "name": "חברת בדיקה",
            "totalDebt": "1500",
            "dueDate": "2026-12-01",
            "persons": []
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["persons"], "חייב להיות לפחות איש קשר אחד");
}

#[actix_web::test]
async fn payment_options_list_months_and_years() {
    let app = test::init_service(App::new().service(api_scope())).await;
    let req = test::TestRequest::get()
        .uri("/api/v1/payments/options")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["months"][0], "01");
    assert_eq!(body["months"].as_array().map(Vec::len), Some(12));
    assert_eq!(body["years"][0], Local::now().year());
}

#[actix_web::test]
async fn admin_end_customer_nulls_blank_fields() {
    let (status, body) = post_json(
        "/api/v1/end-customers/validate",
        json!({
            "firstName": "יוסי",
            "lastName": "לוי",
            "identificationNumber": "000000018",
            "phone": "0521234567",
            "email": "yossi@example.co.il",
            "address": "   "
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], Value::Null);
    assert_eq!(body["status"], "ACTIVE");
}

#[actix_web::test]
async fn client_without_company_is_rejected() {
    let (status, body) = post_json(
        "/api/v1/clients/validate",
        json!({
            "firstName": "רונית",
            "lastName": "אברהם",
            "email": "ronit@example.com",
            "phone": "031234567",
            "entityType": "BUSINESS"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["companyName"], "שם החברה חובה");
    assert_eq!(body["errors"]["vatNumber"], "מספר עוסק חובה");
}

fn payment_body(expiry_year: i32) -> Value {
    json!({
        "selectedInvoices": ["INV-001"],
        "paymentAmount": 8500.0,
        "cardNumber": "4532015112830366",
        "cardHolder": "Dana Cohen",
        "expiryMonth": "12",
        "expiryYear": expiry_year.to_string(),
        "cvv": "123",
        "idNumber": "123456782",
        "city": "חיפה"
    })
}

#[actix_web::test]
async fn payment_returns_masked_card() {
    let next_year = Local::now().year() + 1;
    let (status, body) = post_json("/api/v1/payments/validate", payment_body(next_year)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["maskedCardNumber"], "•••• •••• •••• 0366");
    assert_eq!(body["cardHolder"], "Dana Cohen");
}

#[actix_web::test]
async fn expired_card_is_rejected() {
    let (status, body) = post_json("/api/v1/payments/validate", payment_body(2000)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["expiry"], "הכרטיס פג תוקף");
}

#[actix_web::test]
async fn malformed_body_is_bad_request() {
    let app = test::init_service(App::new().service(api_scope())).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/clients/validate")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
