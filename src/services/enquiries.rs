use chrono::NaiveDateTime;
use serde::Serialize;
use validator::Validate;

use crate::auth::AuthenticatedAccount;
use crate::domain::enquiry::{EnquiryListQuery, EnquirySummary, NewAnswer};
use crate::forms::enquiries::{AnswerForm, EnquiryListForm};
use crate::pagination::Pagination;
use crate::repository::{EnquiryReader, EnquiryWriter, RepositoryError};
use crate::services::{ServiceError, ServiceResult, check_date_range};
use crate::storage::ObjectStorage;

#[derive(Debug, Serialize)]
pub struct EnquiriesPage {
    pub total_count: usize,
    pub enquiries: Vec<EnquirySummary>,
}

/// List product enquiries with the validated filter set.
pub fn list_enquiries<R>(repo: &R, form: EnquiryListForm) -> ServiceResult<EnquiriesPage>
where
    R: EnquiryReader + ?Sized,
{
    form.validate()?;
    let answered = match form.is_answered.as_deref() {
        None => None,
        Some("yes") => Some(true),
        Some("no") => Some(false),
        Some(_) => {
            return Err(ServiceError::Form("is_answered must be yes or no".into()));
        }
    };
    check_date_range(form.start_date, form.end_date)?;

    let mut query = EnquiryListQuery::new(Pagination::new(form.page, form.length));
    if let Some(answered) = answered {
        query = query.answered(answered);
    }
    if let Some(name) = form.product_name {
        query = query.product_name(name);
    } else if let Some(id) = form.id {
        query = query.enquiry_id(id);
    } else if let Some(name) = form.seller_name {
        query = query.seller_name(name);
    } else if let Some(number) = form.membership_number {
        query = query.membership_number(number);
    }
    if let Some(type_id) = form.enquiry_type_id {
        query = query.enquiry_type(type_id);
    }
    if let Some(days) = form.response_date {
        query = query.response_within_days(days);
    }
    if let (Some(start), Some(end)) = (form.start_date, form.end_date) {
        query = query.created_range(start, end);
    }

    let now = chrono::Utc::now().naive_utc();
    let (total_count, enquiries) = repo.list_enquiries(query, now)?;
    if enquiries.is_empty() {
        return Err(ServiceError::EnquiryNotFound);
    }

    Ok(EnquiriesPage {
        total_count,
        enquiries,
    })
}

/// Data backing the answer form, with the thumbnail resolved.
#[derive(Debug, Serialize)]
pub struct AnswerDetailView {
    pub id: i32,
    pub enquiry_type: String,
    pub username: Option<String>,
    pub name: Option<String>,
    pub phone: String,
    pub product_name: String,
    pub product_image: String,
    pub question: String,
    pub registration_date: NaiveDateTime,
    pub is_secret: bool,
}

pub fn answer_detail<R, S>(repo: &R, storage: &S, enquiry_id: i32) -> ServiceResult<AnswerDetailView>
where
    R: EnquiryReader + ?Sized,
    S: ObjectStorage + ?Sized,
{
    let detail = repo
        .get_answer_detail(enquiry_id)?
        .ok_or(ServiceError::AnswerNotFound)?;

    Ok(AnswerDetailView {
        id: detail.id,
        enquiry_type: detail.enquiry_type,
        username: detail.username,
        name: detail.name,
        phone: detail.phone,
        product_name: detail.product_name,
        product_image: storage.url_for(&detail.product_image_key),
        question: detail.question,
        registration_date: detail.registration_date,
        is_secret: detail.is_secret,
    })
}

/// Answer an enquiry; only one live answer may exist per enquiry.
pub fn create_answer<R>(
    repo: &R,
    account: &AuthenticatedAccount,
    enquiry_id: i32,
    form: AnswerForm,
) -> ServiceResult<()>
where
    R: EnquiryWriter + ?Sized,
{
    form.validate()?;

    let answer = NewAnswer {
        enquiry_id,
        account_id: account.account_id,
        content: form.answer,
    };
    repo.create_answer(&answer).map_err(|err| match err {
        RepositoryError::Conflict => ServiceError::AnswerAlreadyExists,
        other => ServiceError::from(other),
    })
}

pub fn update_answer<R>(repo: &R, enquiry_id: i32, form: AnswerForm) -> ServiceResult<()>
where
    R: EnquiryWriter + ?Sized,
{
    form.validate()?;

    repo.update_answer(enquiry_id, &form.answer)
        .map_err(|err| match err {
            RepositoryError::NotFound => ServiceError::AnswerNotFound,
            other => ServiceError::from(other),
        })
}

pub fn delete_answer<R>(repo: &R, enquiry_id: i32) -> ServiceResult<()>
where
    R: EnquiryWriter + ?Sized,
{
    repo.delete_answer(enquiry_id).map_err(|err| match err {
        RepositoryError::NotFound => ServiceError::AnswerNotFound,
        other => ServiceError::from(other),
    })
}

pub fn delete_enquiry<R>(repo: &R, enquiry_id: i32) -> ServiceResult<()>
where
    R: EnquiryWriter + ?Sized,
{
    repo.delete_enquiry(enquiry_id).map_err(|err| match err {
        RepositoryError::NotFound => ServiceError::EnquiryNotFound,
        other => ServiceError::from(other),
    })
}
