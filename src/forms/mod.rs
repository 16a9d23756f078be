pub mod enquiries;
pub mod events;
pub mod products;
