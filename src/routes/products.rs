use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, get, post, web};
use serde_json::json;

use crate::auth::AuthenticatedAccount;
use crate::forms::products::{ProductRegistrationForm, ProductSearchForm, RegistrationRefsForm};
use crate::repository::DieselRepository;
use crate::routes::success;
use crate::services::{ServiceError, products};
use crate::storage::LocalObjectStorage;

#[get("/products")]
pub async fn show_products(
    params: web::Query<ProductSearchForm>,
    account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalObjectStorage>,
) -> Result<HttpResponse, ServiceError> {
    let result = products::search_products(
        repo.get_ref(),
        storage.get_ref(),
        &account,
        params.into_inner(),
    )?;
    Ok(success(result))
}

/// Reference data for the registration form. Registered before the
/// `/products/{product_code}` route so `new` is not taken for a code.
#[get("/products/new")]
pub async fn show_registration_refs(
    params: web::Query<RegistrationRefsForm>,
    account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalObjectStorage>,
) -> Result<HttpResponse, ServiceError> {
    let result = products::registration_references(
        repo.get_ref(),
        storage.get_ref(),
        &account,
        params.into_inner(),
    )?;
    Ok(success(result))
}

#[get("/products/{product_code}")]
pub async fn show_product_detail(
    path: web::Path<String>,
    _account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalObjectStorage>,
) -> Result<HttpResponse, ServiceError> {
    let result = products::product_detail(repo.get_ref(), storage.get_ref(), path.as_str())?;
    Ok(success(result))
}

#[post("/products")]
pub async fn add_product(
    MultipartForm(form): MultipartForm<ProductRegistrationForm>,
    account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalObjectStorage>,
) -> Result<HttpResponse, ServiceError> {
    let registration = form
        .into_registration()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let result = products::register_product(
        repo.get_ref(),
        storage.get_ref(),
        &account,
        registration,
    )?;

    Ok(HttpResponse::Created().json(json!({ "message": "success", "result": result })))
}
