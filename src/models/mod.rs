pub mod enquiry;
pub mod product;
pub mod product_history;
pub mod product_image;
pub mod stock;
pub mod volumes;
