use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::product::NewProduct as DomainNewProduct;

/// Full `products` row; joined reads select this plus the related names.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub product_code: Option<String>,
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
    pub discount_rate: f64,
    pub discounted_price: i64,
    pub discount_start_date: Option<NaiveDateTime>,
    pub discount_end_date: Option<NaiveDateTime>,
    pub minimum_quantity: i32,
    pub maximum_quantity: i32,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub seller_id: i32,
    pub account_id: i32,
    pub is_sale: bool,
    pub is_display: bool,
    pub main_category_id: i32,
    pub sub_category_id: i32,
    pub is_product_notice: bool,
    pub manufacturer: Option<&'a str>,
    pub manufacturing_date: Option<NaiveDate>,
    pub product_origin_type_id: Option<i32>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub detail_information: &'a str,
    pub origin_price: i64,
    pub discount_rate: f64,
    pub discounted_price: i64,
    pub discount_start_date: Option<NaiveDateTime>,
    pub discount_end_date: Option<NaiveDateTime>,
    pub minimum_quantity: i32,
    pub maximum_quantity: i32,
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            seller_id: value.seller_id,
            account_id: value.account_id,
            is_sale: value.is_sale,
            is_display: value.is_display,
            main_category_id: value.main_category_id,
            sub_category_id: value.sub_category_id,
            is_product_notice: value.is_product_notice,
            manufacturer: value.manufacturer.as_deref(),
            manufacturing_date: value.manufacturing_date,
            product_origin_type_id: value.product_origin_type_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            detail_information: value.detail_information.as_str(),
            origin_price: value.origin_price,
            discount_rate: value.discount_rate,
            discounted_price: value.discounted_price,
            discount_start_date: value.discount_start_date,
            discount_end_date: value.discount_end_date,
            minimum_quantity: value.minimum_quantity,
            maximum_quantity: value.maximum_quantity,
        }
    }
}
