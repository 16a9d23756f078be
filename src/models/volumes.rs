use diesel::prelude::*;

/// Counter row initialized at product creation, incremented elsewhere.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_sales_volumes)]
pub struct NewProductSalesVolume {
    pub product_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bookmark_volumes)]
pub struct NewBookmarkVolume {
    pub product_id: i32,
}
