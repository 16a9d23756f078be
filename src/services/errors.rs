use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::repository::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Business-rule and lookup failures raised by the service layer.
///
/// Every variant maps to one HTTP status band and a stable
/// `{message, errorMessage}` body via [`ResponseError`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid request: {0}")]
    Form(String),

    #[error("minimum quantity greater than maximum quantity")]
    QuantityRangeInvalid,
    #[error("manufacture information required")]
    ManufactureInfoRequired,
    #[error("discounted price greater than origin price")]
    DiscountedPriceExceedsOrigin,
    #[error("discounted price does not match the discount rate")]
    DiscountedPriceMismatch,
    #[error("discount start and end date must both be set")]
    DiscountWindowIncomplete,
    #[error("discount start date greater than end date")]
    DiscountWindowInverted,
    #[error("both lookup date fields required")]
    DateRangeIncomplete,
    #[error("lookup start date greater than end date")]
    DateRangeInverted,
    #[error("invalid seller attribute type {0}")]
    InvalidAttributeType(i32),
    #[error("answer already exists")]
    AnswerAlreadyExists,

    #[error("invalid file")]
    InvalidFile,
    #[error("file size too large")]
    FileTooLarge,
    #[error("file scale too small")]
    FileTooSmall,
    #[error("unsupported file format")]
    UnsupportedFormat,

    #[error("product does not exist")]
    ProductNotFound,
    #[error("product image does not exist")]
    ImageNotFound,
    #[error("stock does not exist")]
    StockNotFound,
    #[error("category does not exist")]
    CategoryNotFound,
    #[error("color does not exist")]
    ColorNotFound,
    #[error("size does not exist")]
    SizeNotFound,
    #[error("product origin type does not exist")]
    OriginTypeNotFound,
    #[error("seller does not exist")]
    SellerNotFound,
    #[error("event does not exist")]
    EventNotFound,
    #[error("enquiry does not exist")]
    EnquiryNotFound,
    #[error("answer does not exist")]
    AnswerNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::Form(errors.to_string())
    }
}

impl ServiceError {
    /// Human-readable `message` field of the error body.
    fn message(&self) -> String {
        match self {
            ServiceError::Unauthorized => "unauthorized".into(),
            ServiceError::Form(_) => "invalid request".into(),
            ServiceError::QuantityRangeInvalid => "compare quantity field check error".into(),
            ServiceError::ManufactureInfoRequired | ServiceError::DiscountWindowIncomplete => {
                "required field is blank".into()
            }
            ServiceError::DiscountedPriceExceedsOrigin | ServiceError::DiscountedPriceMismatch => {
                "compare price field check error".into()
            }
            ServiceError::DiscountWindowInverted | ServiceError::DateRangeInverted => {
                "start date is greater than end date".into()
            }
            ServiceError::DateRangeIncomplete => "both date fields required".into(),
            ServiceError::InvalidAttributeType(_) => "invalid seller attribute type".into(),
            ServiceError::AnswerAlreadyExists => "answer create failed".into(),
            ServiceError::InvalidFile => "invalid file".into(),
            ServiceError::FileTooLarge => "file size too large".into(),
            ServiceError::FileTooSmall => "file scale too small, 640x720 at least".into(),
            ServiceError::UnsupportedFormat => "only jpg files are allowed".into(),
            ServiceError::ProductNotFound => "product does not exist".into(),
            ServiceError::ImageNotFound => "product image does not exist".into(),
            ServiceError::StockNotFound => "stock does not exist".into(),
            ServiceError::CategoryNotFound => "category does not exist".into(),
            ServiceError::ColorNotFound => "color does not exist".into(),
            ServiceError::SizeNotFound => "size does not exist".into(),
            ServiceError::OriginTypeNotFound => "product origin type does not exist".into(),
            ServiceError::SellerNotFound => "seller does not exist".into(),
            ServiceError::EventNotFound => "event does not exist".into(),
            ServiceError::EnquiryNotFound => "enquiry does not exist".into(),
            ServiceError::AnswerNotFound => "answer does not exist".into(),
            ServiceError::Repository(RepositoryError::Storage(_)) => {
                "image upload to object storage failed".into()
            }
            ServiceError::Repository(_) => "database error".into(),
        }
    }

    /// Stable snake-case `errorMessage` field of the error body.
    fn error_code(&self) -> String {
        match self {
            ServiceError::Unauthorized => "login_required".into(),
            ServiceError::Form(message) => message.clone(),
            ServiceError::QuantityRangeInvalid => {
                "minimum_quantity_cannot_be_greater_than_maximum_quantity".into()
            }
            ServiceError::ManufactureInfoRequired => "manufacture_information_required".into(),
            ServiceError::DiscountedPriceExceedsOrigin => {
                "discounted_price_cannot_be_greater_than_origin_price".into()
            }
            ServiceError::DiscountedPriceMismatch => "wrong_discounted_price".into(),
            ServiceError::DiscountWindowIncomplete => {
                "discount_start_and_end_date_required".into()
            }
            ServiceError::DiscountWindowInverted => {
                "discount_start_date_cannot_be_greater_than_end_date".into()
            }
            ServiceError::DateRangeIncomplete => "both_date_fields_required".into(),
            ServiceError::DateRangeInverted => {
                "start_date_cannot_be_greater_than_end_date".into()
            }
            ServiceError::InvalidAttributeType(_) => "invalid_seller_attribute_type".into(),
            ServiceError::AnswerAlreadyExists => "answer_already_exists".into(),
            ServiceError::InvalidFile => "invalid_file".into(),
            ServiceError::FileTooLarge => "file_size_too_large".into(),
            ServiceError::FileTooSmall => "file_scale_at_least_640x720".into(),
            ServiceError::UnsupportedFormat => "only_allowed_jpg_type".into(),
            ServiceError::ProductNotFound => "product_does_not_exist".into(),
            ServiceError::ImageNotFound => "product_image_does_not_exist".into(),
            ServiceError::StockNotFound => "stock_does_not_exist".into(),
            ServiceError::CategoryNotFound => "category_does_not_exist".into(),
            ServiceError::ColorNotFound => "color_does_not_exist".into(),
            ServiceError::SizeNotFound => "size_does_not_exist".into(),
            ServiceError::OriginTypeNotFound => "product_origin_type_does_not_exist".into(),
            ServiceError::SellerNotFound => "seller_does_not_exist".into(),
            ServiceError::EventNotFound => "event_does_not_exist".into(),
            ServiceError::EnquiryNotFound => "enquiry_does_not_exist".into(),
            ServiceError::AnswerNotFound => "answer_does_not_exist".into(),
            ServiceError::Repository(RepositoryError::InsertDenied(table)) => {
                format!("unable_to_create_{table}")
            }
            ServiceError::Repository(RepositoryError::UpdateDenied(target)) => {
                format!("unable_to_update_{target}")
            }
            ServiceError::Repository(RepositoryError::Storage(_)) => "image_file_upload_fail".into(),
            ServiceError::Repository(_) => "database_error".into(),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Form(_)
            | ServiceError::QuantityRangeInvalid
            | ServiceError::ManufactureInfoRequired
            | ServiceError::DiscountedPriceExceedsOrigin
            | ServiceError::DiscountedPriceMismatch
            | ServiceError::DiscountWindowIncomplete
            | ServiceError::DiscountWindowInverted
            | ServiceError::DateRangeIncomplete
            | ServiceError::DateRangeInverted
            | ServiceError::InvalidAttributeType(_)
            | ServiceError::AnswerAlreadyExists => StatusCode::BAD_REQUEST,
            ServiceError::InvalidFile
            | ServiceError::FileTooLarge
            | ServiceError::FileTooSmall
            | ServiceError::UnsupportedFormat => StatusCode::PAYLOAD_TOO_LARGE,
            ServiceError::ProductNotFound
            | ServiceError::ImageNotFound
            | ServiceError::StockNotFound
            | ServiceError::CategoryNotFound
            | ServiceError::ColorNotFound
            | ServiceError::SizeNotFound
            | ServiceError::OriginTypeNotFound
            | ServiceError::SellerNotFound
            | ServiceError::EventNotFound
            | ServiceError::EnquiryNotFound
            | ServiceError::AnswerNotFound => StatusCode::NOT_FOUND,
            ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("request failed: {self}");
        }
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.message(),
            "errorMessage": self.error_code(),
        }))
    }
}
