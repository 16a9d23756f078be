use actix_web::{HttpResponse, get, web};

use crate::auth::AuthenticatedAccount;
use crate::forms::events::{EventListForm, EventProductsForm};
use crate::repository::DieselRepository;
use crate::routes::success;
use crate::services::{ServiceError, events};
use crate::storage::LocalObjectStorage;

#[get("/events")]
pub async fn show_events(
    params: web::Query<EventListForm>,
    _account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let result = events::list_events(repo.get_ref(), params.into_inner())?;
    Ok(success(result))
}

#[get("/events/products")]
pub async fn show_event_products(
    params: web::Query<EventProductsForm>,
    _account: AuthenticatedAccount,
    repo: web::Data<DieselRepository>,
    storage: web::Data<LocalObjectStorage>,
) -> Result<HttpResponse, ServiceError> {
    let result =
        events::list_event_candidates(repo.get_ref(), storage.get_ref(), params.into_inner())?;
    Ok(success(result))
}
