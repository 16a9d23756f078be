use serde::Serialize;
use validator::Validate;

use crate::domain::event::{EventListQuery, EventProductQuery, EventSummary, menu_attribute_types};
use crate::forms::events::{EventListForm, EventProductsForm};
use crate::pagination::Pagination;
use crate::repository::EventReader;
use crate::services::{ServiceError, ServiceResult, check_date_range};
use crate::storage::ObjectStorage;

#[derive(Debug, Serialize)]
pub struct EventsPage {
    pub total_count: usize,
    pub events: Vec<EventSummary>,
}

/// List promotional events with the validated filter set.
pub fn list_events<R>(repo: &R, form: EventListForm) -> ServiceResult<EventsPage>
where
    R: EventReader + ?Sized,
{
    form.validate()?;
    if form.name.is_some() && form.number.is_some() {
        return Err(ServiceError::Form(
            "search accepts only one of name or number".into(),
        ));
    }
    check_date_range(form.start_date, form.end_date)?;

    let mut query = EventListQuery::new(Pagination::new(form.page, form.length));
    if let Some(name) = form.name {
        query = query.name(name);
    } else if let Some(number) = form.number {
        query = query.number(number);
    }
    if let Some(status) = form.status {
        query = query.status(status);
    }
    if let Some(exposure) = form.exposure {
        query = query.exposure(exposure == 1);
    }
    if let (Some(start), Some(end)) = (form.start_date, form.end_date) {
        query = query.created_range(start, end);
    }

    let now = chrono::Utc::now().naive_utc();
    let (total_count, events) = repo.list_events(query, now)?;
    if events.is_empty() {
        return Err(ServiceError::EventNotFound);
    }

    Ok(EventsPage {
        total_count,
        events,
    })
}

/// One product row offered for attachment to an event.
#[derive(Debug, Serialize)]
pub struct EventProductView {
    pub id: i32,
    pub thumbnail_image_url: String,
    pub product_number: String,
    pub product_name: String,
    pub seller_name: String,
    pub original_price: i64,
    pub discounted_price: i64,
    /// Whole percent.
    pub discount_rate: i64,
    pub is_sale: bool,
    pub is_display: bool,
}

#[derive(Debug, Serialize)]
pub struct EventProductsPage {
    pub total_count: usize,
    pub products: Vec<EventProductView>,
}

/// List products eligible to attach to an event. An empty result is an
/// empty page, not an error.
pub fn list_event_candidates<R, S>(
    repo: &R,
    storage: &S,
    form: EventProductsForm,
) -> ServiceResult<EventProductsPage>
where
    R: EventReader + ?Sized,
    S: ObjectStorage + ?Sized,
{
    form.validate()?;
    check_date_range(form.start_date, form.end_date)?;
    if let Some(menu_id) = form.menu_id
        && menu_attribute_types(menu_id).is_none()
    {
        return Err(ServiceError::Form("menu_id must be one of 4, 5, 6".into()));
    }

    let query = EventProductQuery {
        product_name: form.product_name,
        product_code: form.product_number,
        seller_name: form.seller_name,
        seller_id: form.seller_number,
        start_date: form.start_date,
        end_date: form.end_date,
        menu_id: form.menu_id,
        main_category_id: form.main_category_id,
        sub_category_id: form.sub_category_id,
        pagination: Some(Pagination::new(form.page, form.length)),
    };

    let (total_count, rows) = repo.list_event_candidates(query)?;

    let products = rows
        .into_iter()
        .map(|row| EventProductView {
            id: row.product_id,
            thumbnail_image_url: storage.url_for(&row.thumbnail_key),
            product_number: row.product_code,
            product_name: row.product_name,
            seller_name: row.seller_name,
            original_price: row.origin_price,
            discounted_price: row.discounted_price,
            discount_rate: (row.discount_rate * 100.0).round() as i64,
            is_sale: row.is_sale,
            is_display: row.is_display,
        })
        .collect();

    Ok(EventProductsPage {
        total_count,
        products,
    })
}
