//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use backoffice::auth::{AuthenticatedAccount, Permission};
use backoffice::db::{DbPool, establish_connection_pool};
use backoffice::forms::products::{OptionEntry, ProductRegistration, RawImage};
use backoffice::storage::{ObjectStorage, StorageError};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

pub fn admin_account(account_id: i32) -> AuthenticatedAccount {
    AuthenticatedAccount {
        account_id,
        permission: Permission::Admin,
    }
}

pub fn seller_account(account_id: i32) -> AuthenticatedAccount {
    AuthenticatedAccount {
        account_id,
        permission: Permission::Seller,
    }
}

pub fn seed_account(pool: &DbPool, username: &str) -> i32 {
    use backoffice::schema::accounts;

    let mut conn = pool.get().expect("get connection");
    diesel::insert_into(accounts::table)
        .values(accounts::username.eq(username))
        .returning(accounts::id)
        .get_result(&mut conn)
        .expect("seed account")
}

pub fn seed_seller(pool: &DbPool, name: &str, attribute_type_id: i32) -> i32 {
    use backoffice::schema::sellers;

    let mut conn = pool.get().expect("get connection");
    diesel::insert_into(sellers::table)
        .values((
            sellers::name.eq(name),
            sellers::seller_attribute_type_id.eq(attribute_type_id),
        ))
        .returning(sellers::id)
        .get_result(&mut conn)
        .expect("seed seller")
}

/// Create one main category with one sub category; returns (main, sub) ids.
pub fn seed_categories(pool: &DbPool, main_name: &str, sub_name: &str) -> (i32, i32) {
    use backoffice::schema::{main_categories, sub_categories};

    let mut conn = pool.get().expect("get connection");
    let main_id: i32 = diesel::insert_into(main_categories::table)
        .values(main_categories::name.eq(main_name))
        .returning(main_categories::id)
        .get_result(&mut conn)
        .expect("seed main category");
    let sub_id: i32 = diesel::insert_into(sub_categories::table)
        .values((
            sub_categories::main_category_id.eq(main_id),
            sub_categories::name.eq(sub_name),
        ))
        .returning(sub_categories::id)
        .get_result(&mut conn)
        .expect("seed sub category");
    (main_id, sub_id)
}

pub fn seed_user(pool: &DbPool, account_id: i32, phone: &str) -> i32 {
    use backoffice::schema::users;

    let mut conn = pool.get().expect("get connection");
    diesel::insert_into(users::table)
        .values((users::account_id.eq(account_id), users::phone.eq(phone)))
        .returning(users::id)
        .get_result(&mut conn)
        .expect("seed user")
}

/// Insert a bare product row, bypassing the registration workflow.
#[allow(clippy::too_many_arguments)]
pub fn seed_product(
    pool: &DbPool,
    seller_id: i32,
    account_id: i32,
    main_category_id: i32,
    sub_category_id: i32,
    name: &str,
    code: &str,
    origin_price: i64,
    discount_rate: f64,
    discounted_price: i64,
) -> i32 {
    use backoffice::schema::products;

    let mut conn = pool.get().expect("get connection");
    diesel::insert_into(products::table)
        .values((
            products::product_code.eq(code),
            products::seller_id.eq(seller_id),
            products::account_id.eq(account_id),
            products::main_category_id.eq(main_category_id),
            products::sub_category_id.eq(sub_category_id),
            products::name.eq(name),
            products::detail_information.eq("<p>detail</p>"),
            products::origin_price.eq(origin_price),
            products::discount_rate.eq(discount_rate),
            products::discounted_price.eq(discounted_price),
        ))
        .returning(products::id)
        .get_result(&mut conn)
        .expect("seed product")
}

pub fn seed_product_image(pool: &DbPool, product_id: i32, key: &str, order_index: i32) {
    use backoffice::schema::product_images;

    let mut conn = pool.get().expect("get connection");
    diesel::insert_into(product_images::table)
        .values((
            product_images::product_id.eq(product_id),
            product_images::image_url.eq(key),
            product_images::order_index.eq(order_index),
        ))
        .execute(&mut conn)
        .expect("seed product image");
}

pub fn seed_enquiry(
    pool: &DbPool,
    enquiry_type_id: i32,
    user_id: i32,
    product_id: i32,
    content: &str,
) -> i32 {
    use backoffice::schema::enquiries;

    let mut conn = pool.get().expect("get connection");
    diesel::insert_into(enquiries::table)
        .values((
            enquiries::enquiry_type_id.eq(enquiry_type_id),
            enquiries::user_id.eq(user_id),
            enquiries::product_id.eq(product_id),
            enquiries::content.eq(content),
        ))
        .returning(enquiries::id)
        .get_result(&mut conn)
        .expect("seed enquiry")
}

pub fn seed_event(
    pool: &DbPool,
    name: &str,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    is_display: bool,
) -> i32 {
    use backoffice::schema::events;

    let mut conn = pool.get().expect("get connection");
    diesel::insert_into(events::table)
        .values((
            events::name.eq(name),
            events::event_type_id.eq(1),
            events::event_kind_id.eq(1),
            events::start_date.eq(start_date),
            events::end_date.eq(end_date),
            events::is_display.eq(is_display),
        ))
        .returning(events::id)
        .get_result(&mut conn)
        .expect("seed event")
}

pub fn link_event_product(pool: &DbPool, event_id: i32, product_id: i32) {
    use backoffice::schema::events_products;

    let mut conn = pool.get().expect("get connection");
    diesel::insert_into(events_products::table)
        .values((
            events_products::event_id.eq(event_id),
            events_products::product_id.eq(product_id),
        ))
        .execute(&mut conn)
        .expect("link event product");
}

/// A JPEG payload of the given dimensions.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let buffer = image::RgbImage::from_pixel(width, height, image::Rgb([120, 100, 80]));
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut bytes)
        .encode_image(&buffer)
        .expect("encode jpeg");
    bytes
}

pub fn raw_image(bytes: Vec<u8>) -> RawImage {
    RawImage {
        file_name: Some("front.jpg".to_string()),
        bytes,
    }
}

/// A registration payload that passes validation as-is.
pub fn sample_registration(
    seller_id: i32,
    main_category_id: i32,
    sub_category_id: i32,
) -> ProductRegistration {
    ProductRegistration {
        seller_id,
        is_sale: true,
        is_display: true,
        main_category_id,
        sub_category_id,
        is_product_notice: false,
        manufacturer: None,
        manufacturing_date: None,
        product_origin_type_id: None,
        product_name: "Daily jacket".to_string(),
        description: Some("A jacket for daily wear".to_string()),
        detail_information: "<p>detail</p>".to_string(),
        options: vec![OptionEntry {
            color: 1,
            size: 2,
            remain: Some(30),
            is_stock_manage: Some(1),
        }],
        minimum_quantity: 0,
        maximum_quantity: 0,
        origin_price: 10_000,
        discount_rate: 0,
        discounted_price: 0,
        discount_start_date: None,
        discount_end_date: None,
        images: vec![raw_image(jpeg_bytes(640, 720))],
    }
}

/// Object store whose uploads always fail; used to drive rollbacks.
pub struct FailingStorage;

impl ObjectStorage for FailingStorage {
    fn upload(&self, _bytes: &[u8], _key: &str) -> Result<String, StorageError> {
        Err(StorageError::Upload("injected failure".to_string()))
    }

    fn delete(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn url_for(&self, key: &str) -> String {
        format!("http://media.local/{key}")
    }
}
