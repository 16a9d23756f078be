use std::io::Cursor;

use chrono::{NaiveDate, NaiveDateTime};
use image::ImageFormat;
use serde::Serialize;
use validator::Validate;

use crate::auth::AuthenticatedAccount;
use crate::domain::catalog::{Color, MainCategory, OriginType, Size, SubCategory};
use crate::domain::product::{
    DEFAULT_MAXIMUM_QUANTITY, DEFAULT_MINIMUM_QUANTITY, ImageUpload, MAX_IMAGE_BYTES,
    MAX_IMAGE_COUNT, MIN_IMAGE_HEIGHT, MIN_IMAGE_WIDTH, NewProduct, NewStock, ProductOption,
    ProductSearchQuery, RegisteredProduct,
};
use crate::forms::products::{
    ProductRegistration, ProductSearchForm, RawImage, RegistrationRefsForm,
};
use crate::pagination::{ALLOWED_PAGE_SIZES, Pagination};
use crate::repository::{CatalogReader, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult, check_date_range, format_price};
use crate::storage::ObjectStorage;

/// Valid seller attribute type ids.
const ATTRIBUTE_TYPE_RANGE: std::ops::RangeInclusive<i32> = 1..=7;

/// Register a new product with its options, history, counters and images.
///
/// Validation happens up front; the repository then runs every write in
/// one transaction so a failing step leaves no partial product behind.
pub fn register_product<R, S>(
    repo: &R,
    storage: &S,
    account: &AuthenticatedAccount,
    registration: ProductRegistration,
) -> ServiceResult<RegisteredProduct>
where
    R: ProductWriter + ?Sized,
    S: ObjectStorage,
{
    let (product, stocks) = normalize_registration(account, &registration)?;
    let images = validate_images(&registration.images)?;

    repo.register_product(&product, &stocks, &images, storage)
        .map_err(ServiceError::from)
}

/// Apply the registration business rules and produce the row payloads.
fn normalize_registration(
    account: &AuthenticatedAccount,
    registration: &ProductRegistration,
) -> ServiceResult<(NewProduct, Vec<NewStock>)> {
    if registration.product_name.trim().is_empty() {
        return Err(ServiceError::Form("product_name must not be empty".into()));
    }
    if registration.detail_information.trim().is_empty() {
        return Err(ServiceError::Form(
            "detail_information must not be empty".into(),
        ));
    }
    if registration.options.is_empty() {
        return Err(ServiceError::Form("at least one option is required".into()));
    }
    if registration.minimum_quantity < 0 || registration.maximum_quantity < 0 {
        return Err(ServiceError::Form(
            "purchase quantities must not be negative".into(),
        ));
    }
    if registration.origin_price < 0 || registration.discounted_price < 0 {
        return Err(ServiceError::Form("prices must not be negative".into()));
    }
    if !(0..=99).contains(&registration.discount_rate) {
        return Err(ServiceError::Form(
            "discount_rate must be between 0 and 99".into(),
        ));
    }

    let minimum = registration.minimum_quantity;
    let maximum = registration.maximum_quantity;
    if minimum != 0 && maximum != 0 && minimum > maximum {
        return Err(ServiceError::QuantityRangeInvalid);
    }
    let minimum_quantity = if minimum == 0 {
        DEFAULT_MINIMUM_QUANTITY
    } else {
        minimum
    };
    let maximum_quantity = if maximum == 0 {
        DEFAULT_MAXIMUM_QUANTITY
    } else {
        maximum
    };

    let (manufacturer, manufacturing_date, product_origin_type_id) =
        if registration.is_product_notice {
            if registration.manufacturer.is_none()
                || registration.manufacturing_date.is_none()
                || registration.product_origin_type_id.is_none()
            {
                return Err(ServiceError::ManufactureInfoRequired);
            }
            (
                registration.manufacturer.clone(),
                registration.manufacturing_date,
                registration.product_origin_type_id,
            )
        } else {
            (None, None, None)
        };

    let (discounted_price, discount_start_date, discount_end_date) =
        if registration.discount_rate == 0 {
            (registration.origin_price, None, None)
        } else {
            if registration.discounted_price > registration.origin_price {
                return Err(ServiceError::DiscountedPriceExceedsOrigin);
            }
            // Integer form of discounted == origin * (1 - rate/100), exact.
            if registration.origin_price * (100 - registration.discount_rate)
                != registration.discounted_price * 100
            {
                return Err(ServiceError::DiscountedPriceMismatch);
            }
            match (
                registration.discount_start_date,
                registration.discount_end_date,
            ) {
                (Some(_), None) | (None, Some(_)) => {
                    return Err(ServiceError::DiscountWindowIncomplete);
                }
                (Some(start), Some(end)) => {
                    if start > end {
                        return Err(ServiceError::DiscountWindowInverted);
                    }
                    (registration.discounted_price, Some(start), Some(end))
                }
                (None, None) => (registration.discounted_price, None, None),
            }
        };

    let product = NewProduct {
        seller_id: registration.seller_id,
        account_id: account.account_id,
        is_sale: registration.is_sale,
        is_display: registration.is_display,
        main_category_id: registration.main_category_id,
        sub_category_id: registration.sub_category_id,
        is_product_notice: registration.is_product_notice,
        manufacturer,
        manufacturing_date,
        product_origin_type_id,
        name: registration.product_name.clone(),
        description: registration.description.clone(),
        detail_information: registration.detail_information.clone(),
        origin_price: registration.origin_price,
        discount_rate: registration.discount_rate as f64 / 100.0,
        discounted_price,
        discount_start_date,
        discount_end_date,
        minimum_quantity,
        maximum_quantity,
    };

    let stocks = registration
        .options
        .iter()
        .map(|option| NewStock {
            color_id: option.color,
            size_id: option.size,
            remain: option.remain.unwrap_or(0),
            is_stock_manage: option.is_stock_manage.unwrap_or(0) != 0,
        })
        .collect();

    Ok((product, stocks))
}

/// Check every uploaded file against the image policy, in input order.
fn validate_images(images: &[RawImage]) -> ServiceResult<Vec<ImageUpload>> {
    if images.is_empty() {
        return Err(ServiceError::Form(
            "at least one image file is required".into(),
        ));
    }
    if images.len() > MAX_IMAGE_COUNT {
        return Err(ServiceError::Form(format!(
            "at most {MAX_IMAGE_COUNT} image files are allowed"
        )));
    }

    let mut validated = Vec::with_capacity(images.len());
    for image in images {
        validated.push(validate_image(image)?);
    }
    Ok(validated)
}

fn validate_image(image: &RawImage) -> ServiceResult<ImageUpload> {
    let name_blank = image
        .file_name
        .as_deref()
        .map(str::trim)
        .is_none_or(str::is_empty);
    if name_blank || image.bytes.is_empty() {
        return Err(ServiceError::InvalidFile);
    }
    if image.bytes.len() > MAX_IMAGE_BYTES {
        return Err(ServiceError::FileTooLarge);
    }

    let reader = image::ImageReader::new(Cursor::new(&image.bytes))
        .with_guessed_format()
        .map_err(|_| ServiceError::InvalidFile)?;
    let Some(format) = reader.format() else {
        return Err(ServiceError::InvalidFile);
    };
    let (width, height) = reader
        .into_dimensions()
        .map_err(|_| ServiceError::InvalidFile)?;

    if width < MIN_IMAGE_WIDTH || height < MIN_IMAGE_HEIGHT {
        return Err(ServiceError::FileTooSmall);
    }
    if format != ImageFormat::Jpeg {
        return Err(ServiceError::UnsupportedFormat);
    }

    Ok(ImageUpload {
        bytes: image.bytes.clone(),
    })
}

/// One row of the search response, formatted for display.
#[derive(Debug, Serialize)]
pub struct ProductRowView {
    pub updated_at: NaiveDateTime,
    pub product_image_url: String,
    pub product_name: String,
    pub product_code: String,
    pub product_id: i32,
    pub seller_attribute_type: String,
    pub seller_name: String,
    pub origin_price: String,
    pub discounted_price: String,
    /// Whole percent.
    pub discount_rate: i64,
    pub is_sale: bool,
    pub is_display: bool,
}

#[derive(Debug, Serialize)]
pub struct ProductSearchPage {
    pub total_count: usize,
    pub product_list: Vec<ProductRowView>,
}

/// Search the catalog with the validated filter set.
pub fn search_products<R, S>(
    repo: &R,
    storage: &S,
    account: &AuthenticatedAccount,
    form: ProductSearchForm,
) -> ServiceResult<ProductSearchPage>
where
    R: ProductReader + ?Sized,
    S: ObjectStorage + ?Sized,
{
    form.validate()?;
    if !ALLOWED_PAGE_SIZES.contains(&form.limit) {
        return Err(ServiceError::Form("limit must be one of 10, 20, 50".into()));
    }
    check_date_range(form.lookup_start_date, form.lookup_end_date)?;

    let attribute_type_ids = match form.seller_attribute_type_id.as_deref() {
        None => None,
        Some(raw) => {
            let ids: Vec<i32> = serde_json::from_str(raw).map_err(|_| {
                ServiceError::Form("seller_attribute_type_id must be a JSON list of ids".into())
            })?;
            for id in &ids {
                if !ATTRIBUTE_TYPE_RANGE.contains(id) {
                    return Err(ServiceError::InvalidAttributeType(*id));
                }
            }
            Some(ids)
        }
    };

    let mut query = ProductSearchQuery::new(Pagination::new(form.page_number, form.limit));
    if let (Some(start), Some(end)) = (form.lookup_start_date, form.lookup_end_date) {
        query = query.lookup_range(start, end);
    }
    if let Some(name) = form.seller_name {
        query = query.seller_name(name);
    }
    if let Some(name) = form.product_name {
        query = query.product_name(name);
    }
    if let Some(id) = form.product_id {
        query = query.product_id(id);
    }
    if let Some(code) = form.product_code {
        query = query.product_code(code);
    }
    if let Some(ids) = attribute_type_ids {
        query = query.attribute_types(ids);
    }
    if let Some(flag) = form.is_sale {
        query = query.is_sale(flag == 1);
    }
    if let Some(flag) = form.is_display {
        query = query.is_display(flag == 1);
    }
    if let Some(flag) = form.is_discount {
        query = query.is_discount(flag == 1);
    }
    // Sellers only ever see their own products.
    if !account.permission.is_admin() {
        query = query.seller_id(account.account_id);
    }

    let (total_count, items) = repo.search_products(query)?;

    let product_list = items
        .into_iter()
        .map(|item| ProductRowView {
            updated_at: item.updated_at,
            product_image_url: storage.url_for(&item.image_key),
            product_name: item.product_name,
            product_code: item.product_code,
            product_id: item.product_id,
            seller_attribute_type: item.seller_attribute_type,
            seller_name: item.seller_name,
            origin_price: format_price(item.origin_price),
            discounted_price: format_price(item.discounted_price),
            discount_rate: (item.discount_rate * 100.0).round() as i64,
            is_sale: item.is_sale,
            is_display: item.is_display,
        })
        .collect();

    Ok(ProductSearchPage {
        total_count,
        product_list,
    })
}

#[derive(Debug, Serialize)]
pub struct ProductDetailBody {
    pub product_id: i32,
    pub product_code: String,
    pub seller_id: i32,
    pub seller_name: String,
    pub is_sale: bool,
    pub is_display: bool,
    pub main_category_id: i32,
    pub main_category_name: String,
    pub sub_category_id: i32,
    pub sub_category_name: String,
    pub is_product_notice: bool,
    pub manufacturer: Option<String>,
    pub manufacturing_date: Option<NaiveDate>,
    pub product_origin_type_id: Option<i32>,
    pub product_origin_type_name: Option<String>,
    pub product_name: String,
    pub description: Option<String>,
    pub detail_information: String,
    pub origin_price: i64,
    /// Fraction, as stored.
    pub discount_rate: f64,
    pub discounted_price: i64,
    pub discount_start_date: Option<NaiveDateTime>,
    pub discount_end_date: Option<NaiveDateTime>,
    pub minimum_quantity: i32,
    pub maximum_quantity: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct ProductImageView {
    pub product_image_url: String,
    pub order_index: i32,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    pub product_detail: ProductDetailBody,
    pub product_images: Vec<ProductImageView>,
    pub product_options: Vec<ProductOption>,
}

/// Load one product by code with its images and options.
///
/// Every registered product owns at least one image and one option; their
/// absence is reported as the matching not-found kind.
pub fn product_detail<R, S>(repo: &R, storage: &S, product_code: &str) -> ServiceResult<ProductDetailView>
where
    R: ProductReader + ?Sized,
    S: ObjectStorage + ?Sized,
{
    let detail = repo
        .get_product_detail(product_code)?
        .ok_or(ServiceError::ProductNotFound)?;

    let images = repo.get_product_images(detail.product_id)?;
    if images.is_empty() {
        return Err(ServiceError::ImageNotFound);
    }
    let options = repo.get_product_options(detail.product_id)?;
    if options.is_empty() {
        return Err(ServiceError::StockNotFound);
    }

    Ok(ProductDetailView {
        product_detail: ProductDetailBody {
            product_id: detail.product_id,
            product_code: detail.product_code,
            seller_id: detail.seller_id,
            seller_name: detail.seller_name,
            is_sale: detail.is_sale,
            is_display: detail.is_display,
            main_category_id: detail.main_category_id,
            main_category_name: detail.main_category_name,
            sub_category_id: detail.sub_category_id,
            sub_category_name: detail.sub_category_name,
            is_product_notice: detail.is_product_notice,
            manufacturer: detail.manufacturer,
            manufacturing_date: detail.manufacturing_date,
            product_origin_type_id: detail.product_origin_type_id,
            product_origin_type_name: detail.product_origin_type_name,
            product_name: detail.product_name,
            description: detail.description,
            detail_information: detail.detail_information,
            origin_price: detail.origin_price,
            discount_rate: detail.discount_rate,
            discounted_price: detail.discounted_price,
            discount_start_date: detail.discount_start_date,
            discount_end_date: detail.discount_end_date,
            minimum_quantity: detail.minimum_quantity,
            maximum_quantity: detail.maximum_quantity,
            updated_at: detail.updated_at,
        },
        product_images: images
            .into_iter()
            .map(|image| ProductImageView {
                product_image_url: storage.url_for(&image.image_key),
                order_index: image.order_index,
            })
            .collect(),
        product_options: options,
    })
}

#[derive(Debug, Serialize)]
pub struct SellerView {
    pub seller_id: i32,
    pub seller_name: String,
    pub profile_image_url: Option<String>,
}

/// Reference data for the registration form, keyed by which query
/// parameter drove the request.
#[derive(Debug, Default, Serialize)]
pub struct RegistrationRefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_list: Option<Vec<SellerView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_category_list: Option<Vec<MainCategory>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category_list: Option<Vec<SubCategory>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_origin_types: Option<Vec<OriginType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_list: Option<Vec<Color>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_list: Option<Vec<Size>>,
}

/// Load the registration-form reference data.
///
/// Branches: a seller-name lookup (admin only) returns the matching
/// sellers; a chosen seller returns the main categories; a chosen main
/// category returns its sub categories; otherwise origin types, colors
/// and sizes are returned.
pub fn registration_references<R, S>(
    repo: &R,
    storage: &S,
    account: &AuthenticatedAccount,
    form: RegistrationRefsForm,
) -> ServiceResult<RegistrationRefs>
where
    R: CatalogReader + ?Sized,
    S: ObjectStorage + ?Sized,
{
    form.validate()?;

    let mut refs = RegistrationRefs::default();

    if let Some(name) = form.seller_name.as_deref() {
        if !account.permission.is_admin() {
            return Err(ServiceError::Unauthorized);
        }
        let sellers = repo.search_sellers_by_name(name)?;
        if sellers.is_empty() {
            return Err(ServiceError::SellerNotFound);
        }
        refs.seller_list = Some(
            sellers
                .into_iter()
                .map(|seller| SellerView {
                    seller_id: seller.seller_id,
                    seller_name: seller.seller_name,
                    profile_image_url: seller
                        .profile_image_key
                        .map(|key| storage.url_for(&key)),
                })
                .collect(),
        );
        return Ok(refs);
    }

    if form.seller_id.is_some() {
        let main_categories = repo.list_main_categories()?;
        if main_categories.is_empty() {
            return Err(ServiceError::CategoryNotFound);
        }
        refs.main_category_list = Some(main_categories);
    }

    if let Some(main_category_id) = form.main_category_id {
        let sub_categories = repo.list_sub_categories(main_category_id)?;
        if sub_categories.is_empty() {
            return Err(ServiceError::CategoryNotFound);
        }
        refs.sub_category_list = Some(sub_categories);
        return Ok(refs);
    }

    let origin_types = repo.list_origin_types()?;
    if origin_types.is_empty() {
        return Err(ServiceError::OriginTypeNotFound);
    }
    let colors = repo.list_colors()?;
    if colors.is_empty() {
        return Err(ServiceError::ColorNotFound);
    }
    let sizes = repo.list_sizes()?;
    if sizes.is_empty() {
        return Err(ServiceError::SizeNotFound);
    }

    refs.product_origin_types = Some(origin_types);
    refs.color_list = Some(colors);
    refs.size_list = Some(sizes);

    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::auth::Permission;
    use crate::domain::product::{ProductDetail, ProductImage};
    use crate::forms::products::OptionEntry;
    use crate::repository::mock::{
        MockCatalogReader, MockObjectStorage, MockProductReader, MockProductWriter,
    };
    use crate::repository::RepositoryError;

    fn admin() -> AuthenticatedAccount {
        AuthenticatedAccount {
            account_id: 1,
            permission: Permission::Admin,
        }
    }

    fn seller(account_id: i32) -> AuthenticatedAccount {
        AuthenticatedAccount {
            account_id,
            permission: Permission::Seller,
        }
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let buffer = image::RgbImage::from_pixel(width, height, image::Rgb([120, 100, 80]));
        let mut bytes = Vec::new();
        image::codecs::jpeg::JpegEncoder::new(&mut bytes)
            .encode_image(&buffer)
            .expect("encode jpeg");
        bytes
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buffer = image::RgbImage::from_pixel(width, height, image::Rgb([120, 100, 80]));
        let mut bytes = Vec::new();
        buffer
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    fn raw_image(bytes: Vec<u8>) -> RawImage {
        RawImage {
            file_name: Some("front.jpg".to_string()),
            bytes,
        }
    }

    fn registration() -> ProductRegistration {
        ProductRegistration {
            seller_id: 3,
            is_sale: true,
            is_display: true,
            main_category_id: 1,
            sub_category_id: 6,
            is_product_notice: false,
            manufacturer: None,
            manufacturing_date: None,
            product_origin_type_id: None,
            product_name: "Daily jacket".to_string(),
            description: Some("A jacket".to_string()),
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

    #[test]
    fn zero_quantities_normalize_to_defaults() {
        let (product, stocks) = normalize_registration(&admin(), &registration()).expect("valid");

        assert_eq!(product.minimum_quantity, 1);
        assert_eq!(product.maximum_quantity, 20);
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].remain, 30);
        assert!(stocks[0].is_stock_manage);
    }

    #[test]
    fn quantity_inversion_is_rejected() {
        let mut reg = registration();
        reg.minimum_quantity = 10;
        reg.maximum_quantity = 5;

        assert!(matches!(
            normalize_registration(&admin(), &reg),
            Err(ServiceError::QuantityRangeInvalid)
        ));
    }

    #[test]
    fn zero_rate_forces_discounted_price_and_clears_window() {
        let mut reg = registration();
        reg.discounted_price = 4_000;
        reg.discount_start_date = NaiveDate::from_ymd_opt(2021, 11, 1)
            .and_then(|date| date.and_hms_opt(9, 0, 0));
        reg.discount_end_date = NaiveDate::from_ymd_opt(2021, 12, 25)
            .and_then(|date| date.and_hms_opt(23, 59, 0));

        let (product, _) = normalize_registration(&admin(), &reg).expect("valid");

        assert_eq!(product.discounted_price, product.origin_price);
        assert!(product.discount_start_date.is_none());
        assert!(product.discount_end_date.is_none());
        assert_eq!(product.discount_rate, 0.0);
    }

    #[test]
    fn discounted_price_must_match_the_rate_exactly() {
        let mut reg = registration();
        reg.discount_rate = 10;
        reg.discounted_price = 8_999;

        assert!(matches!(
            normalize_registration(&admin(), &reg),
            Err(ServiceError::DiscountedPriceMismatch)
        ));

        reg.discounted_price = 9_000;
        let (product, _) = normalize_registration(&admin(), &reg).expect("valid");
        assert_eq!(product.discounted_price, 9_000);
        assert_eq!(product.discount_rate, 0.1);
    }

    #[test]
    fn discounted_price_above_origin_is_rejected() {
        let mut reg = registration();
        reg.discount_rate = 10;
        reg.discounted_price = 11_000;

        assert!(matches!(
            normalize_registration(&admin(), &reg),
            Err(ServiceError::DiscountedPriceExceedsOrigin)
        ));
    }

    #[test]
    fn one_sided_discount_window_is_rejected() {
        let mut reg = registration();
        reg.discount_rate = 10;
        reg.discounted_price = 9_000;
        reg.discount_start_date = NaiveDate::from_ymd_opt(2021, 11, 1)
            .and_then(|date| date.and_hms_opt(9, 0, 0));

        assert!(matches!(
            normalize_registration(&admin(), &reg),
            Err(ServiceError::DiscountWindowIncomplete)
        ));
    }

    #[test]
    fn inverted_discount_window_is_rejected() {
        let mut reg = registration();
        reg.discount_rate = 10;
        reg.discounted_price = 9_000;
        reg.discount_start_date = NaiveDate::from_ymd_opt(2021, 12, 26)
            .and_then(|date| date.and_hms_opt(0, 0, 0));
        reg.discount_end_date = NaiveDate::from_ymd_opt(2021, 12, 25)
            .and_then(|date| date.and_hms_opt(0, 0, 0));

        assert!(matches!(
            normalize_registration(&admin(), &reg),
            Err(ServiceError::DiscountWindowInverted)
        ));
    }

    #[test]
    fn notice_flag_requires_all_manufacture_fields() {
        let mut reg = registration();
        reg.is_product_notice = true;
        reg.manufacturer = Some("Acme Apparel".to_string());
        reg.product_origin_type_id = Some(3);
        // manufacturing_date missing

        assert!(matches!(
            normalize_registration(&admin(), &reg),
            Err(ServiceError::ManufactureInfoRequired)
        ));
    }

    #[test]
    fn notice_flag_off_clears_manufacture_fields() {
        let mut reg = registration();
        reg.manufacturer = Some("Acme Apparel".to_string());
        reg.manufacturing_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        reg.product_origin_type_id = Some(3);

        let (product, _) = normalize_registration(&admin(), &reg).expect("valid");

        assert!(product.manufacturer.is_none());
        assert!(product.manufacturing_date.is_none());
        assert!(product.product_origin_type_id.is_none());
    }

    #[test]
    fn image_policy_rejections() {
        assert!(matches!(
            validate_image(&RawImage {
                file_name: None,
                bytes: jpeg_bytes(640, 720),
            }),
            Err(ServiceError::InvalidFile)
        ));
        assert!(matches!(
            validate_image(&raw_image(vec![0u8; MAX_IMAGE_BYTES + 1])),
            Err(ServiceError::FileTooLarge)
        ));
        assert!(matches!(
            validate_image(&raw_image(jpeg_bytes(639, 720))),
            Err(ServiceError::FileTooSmall)
        ));
        assert!(matches!(
            validate_image(&raw_image(png_bytes(640, 720))),
            Err(ServiceError::UnsupportedFormat)
        ));
        assert!(validate_image(&raw_image(jpeg_bytes(640, 720))).is_ok());
    }

    #[test]
    fn too_many_images_are_rejected() {
        let images: Vec<RawImage> = (0..6).map(|_| raw_image(jpeg_bytes(640, 720))).collect();

        assert!(matches!(
            validate_images(&images),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn register_product_passes_normalized_payload_to_the_repository() {
        let mut writer = MockProductWriter::new();
        let storage = MockObjectStorage::new();

        writer
            .expect_register_product()
            .times(1)
            .withf(|product, stocks, images, _| {
                assert_eq!(product.minimum_quantity, 1);
                assert_eq!(product.maximum_quantity, 20);
                assert_eq!(product.discounted_price, product.origin_price);
                assert_eq!(stocks.len(), 1);
                assert_eq!(images.len(), 1);
                true
            })
            .returning(|_, _, _, _| {
                Ok(RegisteredProduct {
                    product_id: 1131,
                    product_code: "P000000000000001131".to_string(),
                })
            });

        let result = register_product(&writer, &storage, &admin(), registration())
            .expect("expected success");

        assert_eq!(result.product_id, 1131);
    }

    #[test]
    fn register_product_rejects_before_any_write() {
        let writer = MockProductWriter::new(); // no expectations: must not be called
        let storage = MockObjectStorage::new();

        let mut reg = registration();
        reg.minimum_quantity = 10;
        reg.maximum_quantity = 5;

        assert!(matches!(
            register_product(&writer, &storage, &admin(), reg),
            Err(ServiceError::QuantityRangeInvalid)
        ));
    }

    #[test]
    fn search_rejects_one_sided_date_range() {
        let repo = MockProductReader::new();
        let storage = MockObjectStorage::new();

        let form = ProductSearchForm {
            lookup_start_date: NaiveDate::from_ymd_opt(2021, 1, 1),
            page_number: 1,
            limit: 10,
            ..Default::default()
        };

        assert!(matches!(
            search_products(&repo, &storage, &admin(), form),
            Err(ServiceError::DateRangeIncomplete)
        ));
    }

    #[test]
    fn search_rejects_inverted_date_range() {
        let repo = MockProductReader::new();
        let storage = MockObjectStorage::new();

        let form = ProductSearchForm {
            lookup_start_date: NaiveDate::from_ymd_opt(2021, 2, 1),
            lookup_end_date: NaiveDate::from_ymd_opt(2021, 1, 1),
            page_number: 1,
            limit: 10,
            ..Default::default()
        };

        assert!(matches!(
            search_products(&repo, &storage, &admin(), form),
            Err(ServiceError::DateRangeInverted)
        ));
    }

    #[test]
    fn search_rejects_unknown_attribute_type() {
        let repo = MockProductReader::new();
        let storage = MockObjectStorage::new();

        let form = ProductSearchForm {
            seller_attribute_type_id: Some("[1, 9]".to_string()),
            page_number: 1,
            limit: 20,
            ..Default::default()
        };

        assert!(matches!(
            search_products(&repo, &storage, &admin(), form),
            Err(ServiceError::InvalidAttributeType(9))
        ));
    }

    #[test]
    fn search_rejects_unsupported_page_size() {
        let repo = MockProductReader::new();
        let storage = MockObjectStorage::new();

        let form = ProductSearchForm {
            page_number: 1,
            limit: 25,
            ..Default::default()
        };

        assert!(matches!(
            search_products(&repo, &storage, &admin(), form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn seller_search_is_scoped_to_their_own_products() {
        let mut repo = MockProductReader::new();
        let mut storage = MockObjectStorage::new();
        storage
            .expect_url_for()
            .returning(|key| format!("http://media.local/{key}"));

        repo.expect_search_products()
            .times(1)
            .withf(|query| {
                assert_eq!(query.seller_id, Some(77));
                true
            })
            .returning(|_| Ok((0, Vec::new())));

        let form = ProductSearchForm {
            page_number: 1,
            limit: 10,
            ..Default::default()
        };

        let page =
            search_products(&repo, &storage, &seller(77), form).expect("expected success");
        assert_eq!(page.total_count, 0);
    }

    #[test]
    fn search_formats_prices_and_resolves_image_urls() {
        let mut repo = MockProductReader::new();
        let mut storage = MockObjectStorage::new();
        storage
            .expect_url_for()
            .returning(|key| format!("http://media.local/{key}"));

        repo.expect_search_products().returning(|_| {
            Ok((
                1,
                vec![crate::domain::product::ProductSummary {
                    product_id: 1131,
                    product_code: "P000000000000001131".to_string(),
                    product_name: "Daily jacket".to_string(),
                    image_key: "sellers/3/products/1131/images/a.jpg".to_string(),
                    seller_name: "Acme Apparel".to_string(),
                    seller_attribute_type: "Shopping mall".to_string(),
                    origin_price: 10_000,
                    discounted_price: 9_000,
                    discount_rate: 0.1,
                    is_sale: true,
                    is_display: true,
                    updated_at: NaiveDate::from_ymd_opt(2021, 1, 2)
                        .and_then(|date| date.and_hms_opt(4, 11, 4))
                        .unwrap_or_default(),
                }],
            ))
        });

        let form = ProductSearchForm {
            page_number: 1,
            limit: 10,
            ..Default::default()
        };

        let page = search_products(&repo, &storage, &admin(), form).expect("expected success");

        assert_eq!(page.total_count, 1);
        let row = &page.product_list[0];
        assert_eq!(row.origin_price, "10,000");
        assert_eq!(row.discounted_price, "9,000");
        assert_eq!(row.discount_rate, 10);
        assert_eq!(
            row.product_image_url,
            "http://media.local/sellers/3/products/1131/images/a.jpg"
        );
    }

    fn sample_detail() -> ProductDetail {
        ProductDetail {
            product_id: 999,
            product_code: "P000000000000000999".to_string(),
            seller_id: 3,
            seller_name: "Acme Apparel".to_string(),
            is_sale: true,
            is_display: true,
            main_category_id: 1,
            main_category_name: "Outerwear".to_string(),
            sub_category_id: 6,
            sub_category_name: "Jackets".to_string(),
            is_product_notice: false,
            manufacturer: None,
            manufacturing_date: None,
            product_origin_type_id: None,
            product_origin_type_name: None,
            product_name: "Daily jacket".to_string(),
            description: None,
            detail_information: "<p>detail</p>".to_string(),
            origin_price: 10_000,
            discount_rate: 0.0,
            discounted_price: 10_000,
            discount_start_date: None,
            discount_end_date: None,
            minimum_quantity: 1,
            maximum_quantity: 20,
            updated_at: NaiveDate::from_ymd_opt(2020, 12, 31)
                .and_then(|date| date.and_hms_opt(13, 25, 8))
                .unwrap_or_default(),
        }
    }

    #[test]
    fn detail_without_product_is_not_found() {
        let mut repo = MockProductReader::new();
        let storage = MockObjectStorage::new();

        repo.expect_get_product_detail().returning(|_| Ok(None));

        assert!(matches!(
            product_detail(&repo, &storage, "P000000000000000999"),
            Err(ServiceError::ProductNotFound)
        ));
    }

    #[test]
    fn detail_without_stock_rows_is_a_stock_not_found() {
        let mut repo = MockProductReader::new();
        let storage = MockObjectStorage::new();

        repo.expect_get_product_detail()
            .returning(|_| Ok(Some(sample_detail())));
        repo.expect_get_product_images().returning(|_| {
            Ok(vec![ProductImage {
                image_key: "sellers/3/products/999/images/a.jpg".to_string(),
                order_index: 1,
            }])
        });
        repo.expect_get_product_options().returning(|_| Ok(Vec::new()));

        assert!(matches!(
            product_detail(&repo, &storage, "P000000000000000999"),
            Err(ServiceError::StockNotFound)
        ));
    }

    #[test]
    fn detail_without_images_is_an_image_not_found() {
        let mut repo = MockProductReader::new();
        let storage = MockObjectStorage::new();

        repo.expect_get_product_detail()
            .returning(|_| Ok(Some(sample_detail())));
        repo.expect_get_product_images().returning(|_| Ok(Vec::new()));

        assert!(matches!(
            product_detail(&repo, &storage, "P000000000000000999"),
            Err(ServiceError::ImageNotFound)
        ));
    }

    #[test]
    fn seller_name_lookup_requires_admin() {
        let repo = MockCatalogReader::new();
        let storage = MockObjectStorage::new();

        let form = RegistrationRefsForm {
            seller_name: Some("acme".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            registration_references(&repo, &storage, &seller(5), form),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn default_branch_returns_origins_colors_and_sizes() {
        let mut repo = MockCatalogReader::new();
        let storage = MockObjectStorage::new();

        repo.expect_list_origin_types().returning(|| {
            Ok(vec![OriginType {
                product_origin_type_id: 1,
                product_origin_type_name: "Other".to_string(),
            }])
        });
        repo.expect_list_colors().returning(|| {
            Ok(vec![Color {
                color_id: 1,
                color_name: "Black".to_string(),
            }])
        });
        repo.expect_list_sizes().returning(|| {
            Ok(vec![Size {
                size_id: 1,
                size_name: "Free".to_string(),
            }])
        });

        let refs = registration_references(
            &repo,
            &storage,
            &admin(),
            RegistrationRefsForm::default(),
        )
        .expect("expected success");

        assert!(refs.product_origin_types.is_some());
        assert!(refs.color_list.is_some());
        assert!(refs.size_list.is_some());
        assert!(refs.seller_list.is_none());
        assert!(refs.main_category_list.is_none());
    }

    #[test]
    fn repository_failures_keep_their_cause() {
        let mut writer = MockProductWriter::new();
        let storage = MockObjectStorage::new();

        writer
            .expect_register_product()
            .returning(|_, _, _, _| Err(RepositoryError::InsertDenied("stocks")));

        let result = register_product(&writer, &storage, &admin(), registration());

        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::InsertDenied(
                "stocks"
            )))
        ));
    }
}
