use diesel::prelude::*;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage<'a> {
    pub product_id: i32,
    pub image_url: &'a str,
    pub order_index: i32,
}
