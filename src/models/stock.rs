use diesel::prelude::*;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::stocks)]
pub struct NewStock<'a> {
    pub product_option_code: &'a str,
    pub product_id: i32,
    pub color_id: i32,
    pub size_id: i32,
    pub remain: i64,
    pub is_stock_manage: bool,
}
