use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;

pub mod enquiries;
pub mod events;
pub mod products;

/// `200 {message: success, result}` body shared by the read endpoints.
pub(crate) fn success<T: Serialize>(result: T) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "success", "result": result }))
}

/// `200 {message: success}` body for mutations without a payload.
pub(crate) fn success_message() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "success" }))
}
