use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedAccount;
use crate::forms::enquiries::{AnswerForm, EnquiryListForm};
use crate::repository::DieselRepository;
use crate::routes::{success, success_message};
use crate::services::{ServiceError, enquiries};
use crate::storage::LocalObjectStorage;

#[get("/enquiries")]
pub async fn show_enquiries(
    params: web::Query<EnquiryListForm>,
    _account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let result = enquiries::list_enquiries(repo.get_ref(), params.into_inner())?;
    Ok(success(result))
}

#[get("/enquiries/{enquiry_id}/answer")]
pub async fn show_answer(
    path: web::Path<i32>,
    _account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalObjectStorage>,
) -> Result<HttpResponse, ServiceError> {
    let result = enquiries::answer_detail(repo.get_ref(), storage.get_ref(), *path)?;
    Ok(success(result))
}

#[post("/enquiries/{enquiry_id}/answer")]
pub async fn add_answer(
    path: web::Path<i32>,
    account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AnswerForm>,
) -> Result<HttpResponse, ServiceError> {
    enquiries::create_answer(repo.get_ref(), &account, *path, form)?;
    Ok(success_message())
}

#[put("/enquiries/{enquiry_id}/answer")]
pub async fn edit_answer(
    path: web::Path<i32>,
    _account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AnswerForm>,
) -> Result<HttpResponse, ServiceError> {
    enquiries::update_answer(repo.get_ref(), *path, form)?;
    Ok(success_message())
}

#[delete("/enquiries/{enquiry_id}/answer")]
pub async fn delete_answer(
    path: web::Path<i32>,
    _account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    enquiries::delete_answer(repo.get_ref(), *path)?;
    Ok(success_message())
}

#[delete("/enquiries/{enquiry_id}")]
pub async fn delete_enquiry(
    path: web::Path<i32>,
    _account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    enquiries::delete_enquiry(repo.get_ref(), *path)?;
    Ok(success_message())
}
