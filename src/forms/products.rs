use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors raised while converting raw request payloads into typed ones.
#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("{field} must be 0 or 1")]
    InvalidFlag { field: &'static str },
    #[error("{field} is not a valid date")]
    InvalidDate { field: &'static str },
    #[error("options must be a JSON array of option entries: {0}")]
    InvalidOptions(#[from] serde_json::Error),
    #[error("failed to read an uploaded file: {0}")]
    UnreadableFile(#[from] std::io::Error),
}

/// Multipart payload of `POST /products`.
#[derive(Debug, MultipartForm)]
pub struct ProductRegistrationForm {
    pub seller_id: Text<i32>,
    pub is_sale: Text<i8>,
    pub is_display: Text<i8>,
    pub main_category_id: Text<i32>,
    pub sub_category_id: Text<i32>,
    pub is_product_notice: Text<i8>,
    pub manufacturer: Option<Text<String>>,
    pub manufacturing_date: Option<Text<String>>,
    pub product_origin_type_id: Option<Text<i32>>,
    pub product_name: Text<String>,
    pub description: Option<Text<String>>,
    pub detail_information: Text<String>,
    /// JSON-encoded array of option entries.
    pub options: Text<String>,
    pub minimum_quantity: Option<Text<i32>>,
    pub maximum_quantity: Option<Text<i32>>,
    pub origin_price: Text<i64>,
    pub discount_rate: Text<i64>,
    pub discounted_price: Text<i64>,
    pub discount_start_date: Option<Text<String>>,
    pub discount_end_date: Option<Text<String>>,
    /// The per-file limit is intentionally above the 4 MiB policy so the
    /// service can reject oversized files with the file-policy status.
    #[multipart(limit = "8MiB")]
    pub image_files: Vec<TempFile>,
}

/// One entry of the registration form's `options` array.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionEntry {
    pub color: i32,
    pub size: i32,
    #[serde(default)]
    pub remain: Option<i64>,
    #[serde(default, rename = "isStockManage")]
    pub is_stock_manage: Option<i8>,
}

/// Uploaded file bytes with the client-supplied name, not yet validated
/// against the image policy.
#[derive(Debug)]
pub struct RawImage {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Typed registration payload; business-rule validation and normalization
/// happen in the service layer.
#[derive(Debug)]
pub struct ProductRegistration {
    pub seller_id: i32,
    pub is_sale: bool,
    pub is_display: bool,
    pub main_category_id: i32,
    pub sub_category_id: i32,
    pub is_product_notice: bool,
    pub manufacturer: Option<String>,
    pub manufacturing_date: Option<NaiveDate>,
    pub product_origin_type_id: Option<i32>,
    pub product_name: String,
    pub description: Option<String>,
    pub detail_information: String,
    pub options: Vec<OptionEntry>,
    pub minimum_quantity: i32,
    pub maximum_quantity: i32,
    pub origin_price: i64,
    /// Whole percent as submitted.
    pub discount_rate: i64,
    pub discounted_price: i64,
    pub discount_start_date: Option<NaiveDateTime>,
    pub discount_end_date: Option<NaiveDateTime>,
    pub images: Vec<RawImage>,
}

impl ProductRegistrationForm {
    /// Convert the multipart payload into a typed registration request.
    pub fn into_registration(self) -> ProductFormResult<ProductRegistration> {
        let options = serde_json::from_str::<Vec<OptionEntry>>(&self.options.0)?;

        let mut images = Vec::with_capacity(self.image_files.len());
        for file in self.image_files {
            let bytes = std::fs::read(file.file.path())?;
            images.push(RawImage {
                file_name: file.file_name,
                bytes,
            });
        }

        Ok(ProductRegistration {
            seller_id: self.seller_id.0,
            is_sale: parse_flag(self.is_sale.0, "is_sale")?,
            is_display: parse_flag(self.is_display.0, "is_display")?,
            main_category_id: self.main_category_id.0,
            sub_category_id: self.sub_category_id.0,
            is_product_notice: parse_flag(self.is_product_notice.0, "is_product_notice")?,
            manufacturer: non_empty(self.manufacturer),
            manufacturing_date: parse_opt_date(self.manufacturing_date, "manufacturing_date")?,
            product_origin_type_id: self.product_origin_type_id.map(|value| value.0),
            product_name: self.product_name.0,
            description: non_empty(self.description),
            detail_information: self.detail_information.0,
            options,
            minimum_quantity: self.minimum_quantity.map(|value| value.0).unwrap_or(0),
            maximum_quantity: self.maximum_quantity.map(|value| value.0).unwrap_or(0),
            origin_price: self.origin_price.0,
            discount_rate: self.discount_rate.0,
            discounted_price: self.discounted_price.0,
            discount_start_date: parse_opt_datetime(
                self.discount_start_date,
                "discount_start_date",
            )?,
            discount_end_date: parse_opt_datetime(self.discount_end_date, "discount_end_date")?,
            images,
        })
    }
}

fn parse_flag(value: i8, field: &'static str) -> ProductFormResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(ProductFormError::InvalidFlag { field }),
    }
}

fn non_empty(value: Option<Text<String>>) -> Option<String> {
    value
        .map(|text| text.0)
        .filter(|value| !value.trim().is_empty())
}

fn parse_opt_date(
    value: Option<Text<String>>,
    field: &'static str,
) -> ProductFormResult<Option<NaiveDate>> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ProductFormError::InvalidDate { field }),
    }
}

fn parse_opt_datetime(
    value: Option<Text<String>>,
    field: &'static str,
) -> ProductFormResult<Option<NaiveDateTime>> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .map(Some)
        .map_err(|_| ProductFormError::InvalidDate { field })
}

/// Query parameters of `GET /products`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProductSearchForm {
    pub lookup_start_date: Option<NaiveDate>,
    pub lookup_end_date: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub seller_name: Option<String>,
    #[validate(length(max = 100))]
    pub product_name: Option<String>,
    pub product_id: Option<i32>,
    #[validate(length(max = 20))]
    pub product_code: Option<String>,
    /// JSON-encoded list of seller attribute type ids.
    pub seller_attribute_type_id: Option<String>,
    #[validate(range(min = 1, max = 2))]
    pub is_sale: Option<i32>,
    #[validate(range(min = 1, max = 2))]
    pub is_display: Option<i32>,
    #[validate(range(min = 1, max = 2))]
    pub is_discount: Option<i32>,
    #[validate(range(min = 1))]
    pub page_number: usize,
    pub limit: usize,
}

/// Query parameters of `GET /products/new`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegistrationRefsForm {
    #[validate(length(min = 1, max = 20))]
    pub seller_name: Option<String>,
    pub seller_id: Option<i32>,
    pub main_category_id: Option<i32>,
}
