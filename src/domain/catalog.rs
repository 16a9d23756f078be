use serde::Serialize;

/// Color reference row shown on the registration form.
#[derive(Debug, Clone, Serialize)]
pub struct Color {
    pub color_id: i32,
    pub color_name: String,
}

/// Size reference row shown on the registration form.
#[derive(Debug, Clone, Serialize)]
pub struct Size {
    pub size_id: i32,
    pub size_name: String,
}

/// Top-level product category.
#[derive(Debug, Clone, Serialize)]
pub struct MainCategory {
    pub main_category_id: i32,
    pub main_category_name: String,
}

/// Second-level category beneath a [`MainCategory`].
#[derive(Debug, Clone, Serialize)]
pub struct SubCategory {
    pub sub_category_id: i32,
    pub sub_category_name: String,
}

/// Manufacturing origin reference row.
#[derive(Debug, Clone, Serialize)]
pub struct OriginType {
    pub product_origin_type_id: i32,
    pub product_origin_type_name: String,
}

/// Seller row returned by the admin seller lookup.
#[derive(Debug, Clone)]
pub struct SellerSummary {
    pub seller_id: i32,
    pub seller_name: String,
    pub profile_image_key: Option<String>,
}
