use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::pagination::Pagination;

/// Prefix of every assigned product code.
pub const PRODUCT_CODE_PREFIX: &str = "P";
/// Zero-padded width of the numeric part of a product code.
pub const PRODUCT_CODE_WIDTH: usize = 18;
/// Zero-padded width of the color/size ids inside an option code.
pub const OPTION_ID_WIDTH: usize = 3;

/// Quantity bounds applied when the caller leaves them at zero.
pub const DEFAULT_MINIMUM_QUANTITY: i32 = 1;
pub const DEFAULT_MAXIMUM_QUANTITY: i32 = 20;

/// Image policy: at most 5 files, 4 MiB each, at least 640x720, JPEG only.
pub const MAX_IMAGE_COUNT: usize = 5;
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;
pub const MIN_IMAGE_WIDTH: u32 = 640;
pub const MIN_IMAGE_HEIGHT: u32 = 720;

/// Derive the product code for a freshly inserted product id.
pub fn product_code(product_id: i32) -> String {
    format!("{PRODUCT_CODE_PREFIX}{product_id:0width$}", width = PRODUCT_CODE_WIDTH)
}

/// Derive the stock lookup key for a product/color/size combination.
pub fn option_code(product_id: i32, color_id: i32, size_id: i32) -> String {
    format!(
        "{product_id}{color_id:0width$}{size_id:0width$}",
        width = OPTION_ID_WIDTH
    )
}

/// Normalized payload for the product-registration workflow.
///
/// All business-rule validation has already been applied: quantities are
/// within bounds, the discount fields are mutually consistent and the
/// manufacturing fields are present exactly when the notice flag is set.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub seller_id: i32,
    pub account_id: i32,
    pub is_sale: bool,
    pub is_display: bool,
    pub main_category_id: i32,
    pub sub_category_id: i32,
    pub is_product_notice: bool,
    pub manufacturer: Option<String>,
    pub manufacturing_date: Option<NaiveDate>,
    pub product_origin_type_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub detail_information: String,
    pub origin_price: i64,
    /// Stored as a fraction (percent / 100).
    pub discount_rate: f64,
    pub discounted_price: i64,
    pub discount_start_date: Option<NaiveDateTime>,
    pub discount_end_date: Option<NaiveDateTime>,
    pub minimum_quantity: i32,
    pub maximum_quantity: i32,
}

/// One option row to create alongside a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStock {
    pub color_id: i32,
    pub size_id: i32,
    pub remain: i64,
    pub is_stock_manage: bool,
}

/// A validated JPEG payload ready for upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
}

/// Identifiers produced by a successful registration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegisteredProduct {
    pub product_id: i32,
    pub product_code: String,
}

/// Typed filter set for the product search listing.
#[derive(Debug, Clone)]
pub struct ProductSearchQuery {
    /// Restricts results to one seller; forced for seller-permission callers.
    pub seller_id: Option<i32>,
    pub lookup_start_date: Option<NaiveDate>,
    pub lookup_end_date: Option<NaiveDate>,
    pub seller_name: Option<String>,
    pub product_name: Option<String>,
    pub product_id: Option<i32>,
    pub product_code: Option<String>,
    pub seller_attribute_type_ids: Option<Vec<i32>>,
    pub is_sale: Option<bool>,
    pub is_display: Option<bool>,
    pub is_discount: Option<bool>,
    pub pagination: Pagination,
}

impl ProductSearchQuery {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            seller_id: None,
            lookup_start_date: None,
            lookup_end_date: None,
            seller_name: None,
            product_name: None,
            product_id: None,
            product_code: None,
            seller_attribute_type_ids: None,
            is_sale: None,
            is_display: None,
            is_discount: None,
            pagination,
        }
    }

    pub fn seller_id(mut self, seller_id: i32) -> Self {
        self.seller_id = Some(seller_id);
        self
    }

    pub fn lookup_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.lookup_start_date = Some(start);
        self.lookup_end_date = Some(end);
        self
    }

    pub fn seller_name(mut self, name: impl Into<String>) -> Self {
        self.seller_name = Some(name.into());
        self
    }

    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn product_id(mut self, id: i32) -> Self {
        self.product_id = Some(id);
        self
    }

    pub fn product_code(mut self, code: impl Into<String>) -> Self {
        self.product_code = Some(code.into());
        self
    }

    pub fn attribute_types(mut self, ids: Vec<i32>) -> Self {
        self.seller_attribute_type_ids = Some(ids);
        self
    }

    pub fn is_sale(mut self, value: bool) -> Self {
        self.is_sale = Some(value);
        self
    }

    pub fn is_display(mut self, value: bool) -> Self {
        self.is_display = Some(value);
        self
    }

    pub fn is_discount(mut self, value: bool) -> Self {
        self.is_discount = Some(value);
        self
    }
}

/// One row of the product search listing, joined with the order-1 image
/// and the owning seller.
#[derive(Debug, Clone)]
pub struct ProductSummary {
    pub product_id: i32,
    pub product_code: String,
    pub product_name: String,
    pub image_key: String,
    pub seller_name: String,
    pub seller_attribute_type: String,
    pub origin_price: i64,
    pub discounted_price: i64,
    pub discount_rate: f64,
    pub is_sale: bool,
    pub is_display: bool,
    pub updated_at: NaiveDateTime,
}

/// Full product record joined with seller, categories and origin type.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub product_id: i32,
    pub product_code: String,
    pub seller_id: i32,
    pub seller_name: String,
    pub is_sale: bool,
    pub is_display: bool,
    pub main_category_id: i32,
    pub main_category_name: String,
    pub sub_category_id: i32,
    pub sub_category_name: String,
    pub is_product_notice: bool,
    pub manufacturer: Option<String>,
    pub manufacturing_date: Option<NaiveDate>,
    pub product_origin_type_id: Option<i32>,
    pub product_origin_type_name: Option<String>,
    pub product_name: String,
    pub description: Option<String>,
    pub detail_information: String,
    pub origin_price: i64,
    pub discount_rate: f64,
    pub discounted_price: i64,
    pub discount_start_date: Option<NaiveDateTime>,
    pub discount_end_date: Option<NaiveDateTime>,
    pub minimum_quantity: i32,
    pub maximum_quantity: i32,
    pub updated_at: NaiveDateTime,
}

/// Stored image row of a product, ordered by `order_index`.
#[derive(Debug, Clone)]
pub struct ProductImage {
    pub image_key: String,
    pub order_index: i32,
}

/// Stock row joined with its color and size names.
#[derive(Debug, Clone, Serialize)]
pub struct ProductOption {
    pub stock_id: i32,
    pub product_option_code: String,
    pub color_id: i32,
    pub color_name: String,
    pub size_id: i32,
    pub size_name: String,
    pub remain: i64,
    pub is_stock_manage: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_code_is_prefixed_and_padded() {
        assert_eq!(product_code(1131), "P000000000000001131");
        assert_eq!(product_code(1), "P000000000000000001");
    }

    #[test]
    fn option_code_pads_color_and_size() {
        assert_eq!(option_code(1194, 1, 8), "1194001008");
        assert_eq!(option_code(7, 12, 3), "7012003");
    }
}
