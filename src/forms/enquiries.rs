use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

/// Query parameters of `GET /enquiries`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EnquiryListForm {
    /// `yes` keeps answered enquiries, `no` the unanswered rest.
    pub is_answered: Option<String>,
    #[validate(length(max = 100))]
    pub product_name: Option<String>,
    pub id: Option<i32>,
    #[validate(length(max = 20))]
    pub seller_name: Option<String>,
    pub membership_number: Option<i32>,
    #[serde(rename = "type")]
    pub enquiry_type_id: Option<i32>,
    /// Keep enquiries registered within the last N days.
    #[validate(range(min = 1, max = 365))]
    pub response_date: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub page: usize,
    #[validate(range(min = 1, max = 100))]
    pub length: usize,
}

/// Body of `POST`/`PUT /enquiries/{id}/answer`.
#[derive(Debug, Deserialize, Validate)]
pub struct AnswerForm {
    #[validate(length(min = 1, max = 1000))]
    pub answer: String,
}
