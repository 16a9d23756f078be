use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Lifecycle phase of an event relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Progress,
    Wait,
    End,
}

impl EventStatus {
    /// Classify an event window against `now`.
    pub fn of(start: NaiveDateTime, end: NaiveDateTime, now: NaiveDateTime) -> Self {
        if now < start {
            EventStatus::Wait
        } else if now > end {
            EventStatus::End
        } else {
            EventStatus::Progress
        }
    }
}

/// One row of the event listing.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub event_number: i32,
    pub event_name: String,
    pub event_status: EventStatus,
    pub event_type: String,
    pub event_kind: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_display: bool,
    pub created_at: NaiveDateTime,
    pub product_count: i64,
}

/// Typed filter set for the event listing.
#[derive(Debug, Clone)]
pub struct EventListQuery {
    pub name: Option<String>,
    pub number: Option<i32>,
    pub status: Option<EventStatus>,
    pub exposure: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub pagination: Pagination,
}

impl EventListQuery {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            name: None,
            number: None,
            status: None,
            exposure: None,
            start_date: None,
            end_date: None,
            pagination,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn number(mut self, number: i32) -> Self {
        self.number = Some(number);
        self
    }

    pub fn status(mut self, status: EventStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn exposure(mut self, exposure: bool) -> Self {
        self.exposure = Some(exposure);
        self
    }

    pub fn created_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }
}

/// Seller-attribute groups selectable when picking event products.
/// Menu 4 = trend, 5 = brand, 6 = beauty.
pub fn menu_attribute_types(menu_id: i32) -> Option<&'static [i32]> {
    match menu_id {
        4 => Some(&[1, 2, 3]),
        5 => Some(&[4, 5, 6]),
        6 => Some(&[7]),
        _ => None,
    }
}

/// Typed filter set for products eligible to attach to an event.
#[derive(Debug, Clone, Default)]
pub struct EventProductQuery {
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub seller_name: Option<String>,
    pub seller_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub menu_id: Option<i32>,
    pub main_category_id: Option<i32>,
    pub sub_category_id: Option<i32>,
    pub pagination: Option<Pagination>,
}

/// One candidate product row, joined with its order-1 thumbnail.
#[derive(Debug, Clone)]
pub struct EventProductRow {
    pub product_id: i32,
    pub thumbnail_key: String,
    pub product_code: String,
    pub product_name: String,
    pub seller_name: String,
    pub origin_price: i64,
    pub discounted_price: i64,
    pub discount_rate: f64,
    pub is_sale: bool,
    pub is_display: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn status_classification() {
        assert_eq!(EventStatus::of(at(10), at(20), at(15)), EventStatus::Progress);
        assert_eq!(EventStatus::of(at(10), at(20), at(10)), EventStatus::Progress);
        assert_eq!(EventStatus::of(at(10), at(20), at(5)), EventStatus::Wait);
        assert_eq!(EventStatus::of(at(10), at(20), at(25)), EventStatus::End);
    }

    #[test]
    fn menu_groups_map_to_attribute_sets() {
        assert_eq!(menu_attribute_types(4), Some(&[1, 2, 3][..]));
        assert_eq!(menu_attribute_types(6), Some(&[7][..]));
        assert_eq!(menu_attribute_types(9), None);
    }
}
