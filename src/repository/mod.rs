use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::catalog::{Color, MainCategory, OriginType, SellerSummary, Size, SubCategory};
use crate::domain::enquiry::{AnswerDetail, EnquiryListQuery, EnquirySummary, NewAnswer};
use crate::domain::event::{EventListQuery, EventProductQuery, EventProductRow, EventSummary};
use crate::domain::product::{
    ImageUpload, NewProduct, NewStock, ProductDetail, ProductImage, ProductOption,
    ProductSearchQuery, ProductSummary, RegisteredProduct,
};
use crate::storage::ObjectStorage;

pub mod errors;

mod catalog;
mod enquiry;
mod event;
mod product;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

/// First instant of `date`, for inclusive range filters.
pub(crate) fn day_start(date: chrono::NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

/// Last second of `date`, for inclusive range filters.
pub(crate) fn day_end(date: chrono::NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN) + chrono::Duration::seconds(86_399)
}

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only access to the registration-form reference tables.
pub trait CatalogReader {
    fn list_origin_types(&self) -> RepositoryResult<Vec<OriginType>>;
    fn list_colors(&self) -> RepositoryResult<Vec<Color>>;
    fn list_sizes(&self) -> RepositoryResult<Vec<Size>>;
    fn list_main_categories(&self) -> RepositoryResult<Vec<MainCategory>>;
    fn list_sub_categories(&self, main_category_id: i32) -> RepositoryResult<Vec<SubCategory>>;
    /// Sellers whose name contains `name`.
    fn search_sellers_by_name(&self, name: &str) -> RepositoryResult<Vec<SellerSummary>>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn search_products(
        &self,
        query: ProductSearchQuery,
    ) -> RepositoryResult<(usize, Vec<ProductSummary>)>;
    fn get_product_detail(&self, product_code: &str) -> RepositoryResult<Option<ProductDetail>>;
    fn get_product_images(&self, product_id: i32) -> RepositoryResult<Vec<ProductImage>>;
    fn get_product_options(&self, product_id: i32) -> RepositoryResult<Vec<ProductOption>>;
}

/// Write operations over product records.
pub trait ProductWriter {
    /// Run the whole registration workflow inside one transaction: insert
    /// the product, assign its code, create stocks, snapshot history,
    /// initialize the counters, then upload and record each image. Any
    /// failure unwinds every row written so far.
    fn register_product(
        &self,
        product: &NewProduct,
        stocks: &[NewStock],
        images: &[ImageUpload],
        storage: &dyn ObjectStorage,
    ) -> RepositoryResult<RegisteredProduct>;
}

/// Read-only operations over promotional events.
pub trait EventReader {
    fn list_events(
        &self,
        query: EventListQuery,
        now: NaiveDateTime,
    ) -> RepositoryResult<(usize, Vec<EventSummary>)>;
    fn list_event_candidates(
        &self,
        query: EventProductQuery,
    ) -> RepositoryResult<(usize, Vec<EventProductRow>)>;
}

/// Read-only operations over product enquiries.
pub trait EnquiryReader {
    fn list_enquiries(
        &self,
        query: EnquiryListQuery,
        now: NaiveDateTime,
    ) -> RepositoryResult<(usize, Vec<EnquirySummary>)>;
    fn get_answer_detail(&self, enquiry_id: i32) -> RepositoryResult<Option<AnswerDetail>>;
}

/// Write operations over enquiry replies.
pub trait EnquiryWriter {
    /// Fails with [`RepositoryError::Conflict`] when a live reply exists.
    fn create_answer(&self, answer: &NewAnswer) -> RepositoryResult<()>;
    fn update_answer(&self, enquiry_id: i32, content: &str) -> RepositoryResult<()>;
    fn delete_answer(&self, enquiry_id: i32) -> RepositoryResult<()>;
    fn delete_enquiry(&self, enquiry_id: i32) -> RepositoryResult<()>;
}
