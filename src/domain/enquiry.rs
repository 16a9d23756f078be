use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::pagination::Pagination;

/// Typed filter set for the enquiry listing.
#[derive(Debug, Clone)]
pub struct EnquiryListQuery {
    /// `Some(true)` keeps enquiries with a live reply, `Some(false)` the rest.
    pub answered: Option<bool>,
    pub product_name: Option<String>,
    pub enquiry_id: Option<i32>,
    pub seller_name: Option<String>,
    pub membership_number: Option<i32>,
    pub enquiry_type_id: Option<i32>,
    /// Keep enquiries registered within the last N days.
    pub response_within_days: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub pagination: Pagination,
}

impl EnquiryListQuery {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            answered: None,
            product_name: None,
            enquiry_id: None,
            seller_name: None,
            membership_number: None,
            enquiry_type_id: None,
            response_within_days: None,
            start_date: None,
            end_date: None,
            pagination,
        }
    }

    pub fn answered(mut self, answered: bool) -> Self {
        self.answered = Some(answered);
        self
    }

    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn enquiry_id(mut self, id: i32) -> Self {
        self.enquiry_id = Some(id);
        self
    }

    pub fn seller_name(mut self, name: impl Into<String>) -> Self {
        self.seller_name = Some(name.into());
        self
    }

    pub fn membership_number(mut self, number: i32) -> Self {
        self.membership_number = Some(number);
        self
    }

    pub fn enquiry_type(mut self, type_id: i32) -> Self {
        self.enquiry_type_id = Some(type_id);
        self
    }

    pub fn response_within_days(mut self, days: i64) -> Self {
        self.response_within_days = Some(days);
        self
    }

    pub fn created_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }
}

/// One row of the enquiry listing; reply fields are present only when a
/// live reply exists.
#[derive(Debug, Clone, Serialize)]
pub struct EnquirySummary {
    pub id: i32,
    pub enquiry_type: String,
    pub registration_date: NaiveDateTime,
    pub phone_number: String,
    pub product_name: String,
    pub question: String,
    pub membership_number: i32,
    pub seller_name: String,
    pub is_secret: bool,
    pub is_answered: bool,
    pub answer: Option<String>,
    pub answer_date: Option<NaiveDateTime>,
    pub answer_user: Option<String>,
}

/// Data backing the answer form for one enquiry.
#[derive(Debug, Clone)]
pub struct AnswerDetail {
    pub id: i32,
    pub enquiry_type: String,
    /// Username of the account that answered, when a live reply exists.
    pub username: Option<String>,
    pub name: Option<String>,
    pub phone: String,
    pub product_name: String,
    pub product_image_key: String,
    pub question: String,
    pub registration_date: NaiveDateTime,
    pub is_secret: bool,
}

/// Payload for inserting an enquiry reply.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub enquiry_id: i32,
    pub account_id: i32,
    pub content: String,
}
