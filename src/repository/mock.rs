use chrono::NaiveDateTime;
use mockall::mock;

use super::{
    CatalogReader, EnquiryReader, EnquiryWriter, EventReader, ProductReader, ProductWriter,
    RepositoryResult,
};
use crate::domain::catalog::{Color, MainCategory, OriginType, SellerSummary, Size, SubCategory};
use crate::domain::enquiry::{AnswerDetail, EnquiryListQuery, EnquirySummary, NewAnswer};
use crate::domain::event::{EventListQuery, EventProductQuery, EventProductRow, EventSummary};
use crate::domain::product::{
    ImageUpload, NewProduct, NewStock, ProductDetail, ProductImage, ProductOption,
    ProductSearchQuery, ProductSummary, RegisteredProduct,
};
use crate::storage::{ObjectStorage, StorageError};

mock! {
    pub CatalogReader {}

    impl CatalogReader for CatalogReader {
        fn list_origin_types(&self) -> RepositoryResult<Vec<OriginType>>;
        fn list_colors(&self) -> RepositoryResult<Vec<Color>>;
        fn list_sizes(&self) -> RepositoryResult<Vec<Size>>;
        fn list_main_categories(&self) -> RepositoryResult<Vec<MainCategory>>;
        fn list_sub_categories(&self, main_category_id: i32) -> RepositoryResult<Vec<SubCategory>>;
        fn search_sellers_by_name(&self, name: &str) -> RepositoryResult<Vec<SellerSummary>>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn search_products(&self, query: ProductSearchQuery) -> RepositoryResult<(usize, Vec<ProductSummary>)>;
        fn get_product_detail(&self, product_code: &str) -> RepositoryResult<Option<ProductDetail>>;
        fn get_product_images(&self, product_id: i32) -> RepositoryResult<Vec<ProductImage>>;
        fn get_product_options(&self, product_id: i32) -> RepositoryResult<Vec<ProductOption>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn register_product(
            &self,
            product: &NewProduct,
            stocks: &[NewStock],
            images: &[ImageUpload],
            storage: &dyn ObjectStorage,
        ) -> RepositoryResult<RegisteredProduct>;
    }
}

mock! {
    pub EventReader {}

    impl EventReader for EventReader {
        fn list_events(&self, query: EventListQuery, now: NaiveDateTime) -> RepositoryResult<(usize, Vec<EventSummary>)>;
        fn list_event_candidates(&self, query: EventProductQuery) -> RepositoryResult<(usize, Vec<EventProductRow>)>;
    }
}

mock! {
    pub EnquiryReader {}

    impl EnquiryReader for EnquiryReader {
        fn list_enquiries(&self, query: EnquiryListQuery, now: NaiveDateTime) -> RepositoryResult<(usize, Vec<EnquirySummary>)>;
        fn get_answer_detail(&self, enquiry_id: i32) -> RepositoryResult<Option<AnswerDetail>>;
    }
}

mock! {
    pub EnquiryWriter {}

    impl EnquiryWriter for EnquiryWriter {
        fn create_answer(&self, answer: &NewAnswer) -> RepositoryResult<()>;
        fn update_answer(&self, enquiry_id: i32, content: &str) -> RepositoryResult<()>;
        fn delete_answer(&self, enquiry_id: i32) -> RepositoryResult<()>;
        fn delete_enquiry(&self, enquiry_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ObjectStorage {}

    impl ObjectStorage for ObjectStorage {
        fn upload(&self, bytes: &[u8], key: &str) -> Result<String, StorageError>;
        fn delete(&self, key: &str) -> Result<(), StorageError>;
        fn url_for(&self, key: &str) -> String;
    }
}
