use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::event::EventStatus;

/// Query parameters of `GET /events`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EventListForm {
    pub name: Option<String>,
    pub number: Option<i32>,
    pub status: Option<EventStatus>,
    #[validate(range(min = 0, max = 1))]
    pub exposure: Option<i32>,
    #[validate(range(min = 1))]
    pub page: usize,
    #[validate(range(min = 1, max = 100))]
    pub length: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Query parameters of `GET /events/products`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EventProductsForm {
    #[validate(length(max = 100))]
    pub product_name: Option<String>,
    #[validate(length(max = 20))]
    pub product_number: Option<String>,
    #[validate(length(max = 20))]
    pub seller_name: Option<String>,
    pub seller_number: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub menu_id: Option<i32>,
    pub main_category_id: Option<i32>,
    pub sub_category_id: Option<i32>,
    #[validate(range(min = 1))]
    pub page: usize,
    #[validate(range(min = 1, max = 100))]
    pub length: usize,
}
