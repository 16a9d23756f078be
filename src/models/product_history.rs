use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::NewProduct as DomainNewProduct;

/// Snapshot of the product fields written once per create/update.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_histories)]
pub struct NewProductHistory<'a> {
    pub product_id: i32,
    pub product_name: &'a str,
    pub is_sale: bool,
    pub is_display: bool,
    pub origin_price: i64,
    pub discount_rate: f64,
    pub discounted_price: i64,
    pub discount_start_date: Option<NaiveDateTime>,
    pub discount_end_date: Option<NaiveDateTime>,
    pub minimum_quantity: i32,
    pub maximum_quantity: i32,
    pub updater_id: i32,
}

impl<'a> NewProductHistory<'a> {
    /// Snapshot `product` as it is being created.
    pub fn snapshot(product_id: i32, product: &'a DomainNewProduct) -> Self {
        Self {
            product_id,
            product_name: product.name.as_str(),
            is_sale: product.is_sale,
            is_display: product.is_display,
            origin_price: product.origin_price,
            discount_rate: product.discount_rate,
            discounted_price: product.discounted_price,
            discount_start_date: product.discount_start_date,
            discount_end_date: product.discount_end_date,
            minimum_quantity: product.minimum_quantity,
            maximum_quantity: product.maximum_quantity,
            updater_id: product.account_id,
        }
    }
}
