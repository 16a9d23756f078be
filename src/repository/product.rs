use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::product::{
    ImageUpload, NewProduct as DomainNewProduct, NewStock as DomainNewStock, ProductDetail,
    ProductImage, ProductOption, ProductSearchQuery, ProductSummary, RegisteredProduct,
    option_code, product_code,
};
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
use crate::models::product_history::NewProductHistory;
use crate::models::product_image::NewProductImage;
use crate::models::stock::NewStock as DbNewStock;
use crate::models::volumes::{NewBookmarkVolume, NewProductSalesVolume};
use crate::repository::{
    DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult, day_end,
    day_start,
};
use crate::storage::ObjectStorage;

/// Object key for one product image: scoped by seller and product, with a
/// random suffix so re-uploads never collide.
fn image_key(seller_id: i32, product_id: i32, code: &str) -> String {
    format!(
        "sellers/{seller_id}/products/{product_id}/images/{code}-{}.jpg",
        Uuid::new_v4()
    )
}

impl ProductReader for DieselRepository {
    fn search_products(
        &self,
        query: ProductSearchQuery,
    ) -> RepositoryResult<(usize, Vec<ProductSummary>)> {
        use crate::schema::{product_images, products, seller_attribute_types, sellers};

        let mut conn = self.conn()?;

        let mut count_query = products::table
            .inner_join(
                product_images::table.on(product_images::product_id
                    .eq(products::id)
                    .and(product_images::order_index.eq(1))
                    .and(product_images::is_deleted.eq(false))),
            )
            .inner_join(sellers::table.inner_join(seller_attribute_types::table))
            .filter(products::is_deleted.eq(false))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(seller_id) = query.seller_id {
            count_query = count_query.filter(products::seller_id.eq(seller_id));
        }
        if let (Some(start), Some(end)) = (query.lookup_start_date, query.lookup_end_date) {
            count_query =
                count_query.filter(products::updated_at.between(day_start(start), day_end(end)));
        }
        if let Some(name) = query.seller_name.as_ref() {
            count_query = count_query.filter(sellers::name.eq(name.clone()));
        }
        if let Some(name) = query.product_name.as_ref() {
            count_query = count_query.filter(products::name.like(format!("%{name}%")));
        }
        if let Some(id) = query.product_id {
            count_query = count_query.filter(products::id.eq(id));
        }
        if let Some(code) = query.product_code.as_ref() {
            count_query = count_query.filter(products::product_code.eq(Some(code.clone())));
        }
        if let Some(ids) = query.seller_attribute_type_ids.as_ref() {
            count_query = count_query.filter(seller_attribute_types::id.eq_any(ids.clone()));
        }
        if let Some(is_sale) = query.is_sale {
            count_query = count_query.filter(products::is_sale.eq(is_sale));
        }
        if let Some(is_display) = query.is_display {
            count_query = count_query.filter(products::is_display.eq(is_display));
        }
        if let Some(is_discount) = query.is_discount {
            count_query = if is_discount {
                count_query.filter(products::discount_rate.gt(0.0))
            } else {
                count_query.filter(products::discount_rate.eq(0.0))
            };
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table
            .inner_join(
                product_images::table.on(product_images::product_id
                    .eq(products::id)
                    .and(product_images::order_index.eq(1))
                    .and(product_images::is_deleted.eq(false))),
            )
            .inner_join(sellers::table.inner_join(seller_attribute_types::table))
            .filter(products::is_deleted.eq(false))
            .select((
                products::id,
                products::product_code,
                products::name,
                product_images::image_url,
                sellers::name,
                seller_attribute_types::name,
                products::origin_price,
                products::discounted_price,
                products::discount_rate,
                products::is_sale,
                products::is_display,
                products::updated_at,
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(seller_id) = query.seller_id {
            items = items.filter(products::seller_id.eq(seller_id));
        }
        if let (Some(start), Some(end)) = (query.lookup_start_date, query.lookup_end_date) {
            items = items.filter(products::updated_at.between(day_start(start), day_end(end)));
        }
        if let Some(name) = query.seller_name.as_ref() {
            items = items.filter(sellers::name.eq(name.clone()));
        }
        if let Some(name) = query.product_name.as_ref() {
            items = items.filter(products::name.like(format!("%{name}%")));
        }
        if let Some(id) = query.product_id {
            items = items.filter(products::id.eq(id));
        }
        if let Some(code) = query.product_code.as_ref() {
            items = items.filter(products::product_code.eq(Some(code.clone())));
        }
        if let Some(ids) = query.seller_attribute_type_ids.as_ref() {
            items = items.filter(seller_attribute_types::id.eq_any(ids.clone()));
        }
        if let Some(is_sale) = query.is_sale {
            items = items.filter(products::is_sale.eq(is_sale));
        }
        if let Some(is_display) = query.is_display {
            items = items.filter(products::is_display.eq(is_display));
        }
        if let Some(is_discount) = query.is_discount {
            items = if is_discount {
                items.filter(products::discount_rate.gt(0.0))
            } else {
                items.filter(products::discount_rate.eq(0.0))
            };
        }

        let rows = items
            .order(products::id.desc())
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .load::<(
                i32,
                Option<String>,
                String,
                String,
                String,
                String,
                i64,
                i64,
                f64,
                bool,
                bool,
                chrono::NaiveDateTime,
            )>(&mut conn)?;

        let summaries = rows
            .into_iter()
            .map(
                |(
                    product_id,
                    code,
                    product_name,
                    image_key,
                    seller_name,
                    seller_attribute_type,
                    origin_price,
                    discounted_price,
                    discount_rate,
                    is_sale,
                    is_display,
                    updated_at,
                )| ProductSummary {
                    product_id,
                    product_code: code.unwrap_or_default(),
                    product_name,
                    image_key,
                    seller_name,
                    seller_attribute_type,
                    origin_price,
                    discounted_price,
                    discount_rate,
                    is_sale,
                    is_display,
                    updated_at,
                },
            )
            .collect();

        Ok((total, summaries))
    }

    fn get_product_detail(&self, code: &str) -> RepositoryResult<Option<ProductDetail>> {
        use crate::schema::{main_categories, product_origin_types, products, sellers, sub_categories};

        let mut conn = self.conn()?;

        let row = products::table
            .inner_join(sellers::table)
            .inner_join(main_categories::table)
            .inner_join(sub_categories::table)
            .left_join(product_origin_types::table)
            .filter(products::is_deleted.eq(false))
            .filter(products::product_code.eq(Some(code.to_string())))
            .select((
                DbProduct::as_select(),
                sellers::name,
                main_categories::name,
                sub_categories::name,
                product_origin_types::name.nullable(),
            ))
            .first::<(DbProduct, String, String, String, Option<String>)>(&mut conn)
            .optional()?;

        Ok(row.map(
            |(product, seller_name, main_category_name, sub_category_name, origin_type_name)| {
                ProductDetail {
                    product_id: product.id,
                    product_code: product.product_code.unwrap_or_default(),
                    seller_id: product.seller_id,
                    seller_name,
                    is_sale: product.is_sale,
                    is_display: product.is_display,
                    main_category_id: product.main_category_id,
                    main_category_name,
                    sub_category_id: product.sub_category_id,
                    sub_category_name,
                    is_product_notice: product.is_product_notice,
                    manufacturer: product.manufacturer,
                    manufacturing_date: product.manufacturing_date,
                    product_origin_type_id: product.product_origin_type_id,
                    product_origin_type_name: origin_type_name,
                    product_name: product.name,
                    description: product.description,
                    detail_information: product.detail_information,
                    origin_price: product.origin_price,
                    discount_rate: product.discount_rate,
                    discounted_price: product.discounted_price,
                    discount_start_date: product.discount_start_date,
                    discount_end_date: product.discount_end_date,
                    minimum_quantity: product.minimum_quantity,
                    maximum_quantity: product.maximum_quantity,
                    updated_at: product.updated_at,
                }
            },
        ))
    }

    fn get_product_images(&self, product_id: i32) -> RepositoryResult<Vec<ProductImage>> {
        use crate::schema::product_images;

        let mut conn = self.conn()?;
        let rows = product_images::table
            .filter(product_images::product_id.eq(product_id))
            .filter(product_images::is_deleted.eq(false))
            .order(product_images::order_index.asc())
            .select((product_images::image_url, product_images::order_index))
            .load::<(String, i32)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(image_key, order_index)| ProductImage {
                image_key,
                order_index,
            })
            .collect())
    }

    fn get_product_options(&self, product_id: i32) -> RepositoryResult<Vec<ProductOption>> {
        use crate::schema::{colors, sizes, stocks};

        let mut conn = self.conn()?;
        let rows = stocks::table
            .inner_join(colors::table)
            .inner_join(sizes::table)
            .filter(stocks::product_id.eq(product_id))
            .filter(stocks::is_deleted.eq(false))
            .order(stocks::product_option_code.asc())
            .select((
                stocks::id,
                stocks::product_option_code,
                colors::id,
                colors::name,
                sizes::id,
                sizes::name,
                stocks::remain,
                stocks::is_stock_manage,
            ))
            .load::<(i32, String, i32, String, i32, String, i64, bool)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(
                    stock_id,
                    product_option_code,
                    color_id,
                    color_name,
                    size_id,
                    size_name,
                    remain,
                    is_stock_manage,
                )| ProductOption {
                    stock_id,
                    product_option_code,
                    color_id,
                    color_name,
                    size_id,
                    size_name,
                    remain,
                    is_stock_manage,
                },
            )
            .collect())
    }
}

impl ProductWriter for DieselRepository {
    fn register_product(
        &self,
        product: &DomainNewProduct,
        stocks: &[DomainNewStock],
        images: &[ImageUpload],
        storage: &dyn ObjectStorage,
    ) -> RepositoryResult<RegisteredProduct> {
        use crate::schema::{
            bookmark_volumes, product_histories, product_images, product_sales_volumes, products,
            stocks as stocks_table,
        };

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let product_id = diesel::insert_into(products::table)
                .values(DbNewProduct::from(product))
                .returning(products::id)
                .get_result::<i32>(conn)?;

            let code = product_code(product_id);
            let updated = diesel::update(
                products::table
                    .filter(products::id.eq(product_id))
                    .filter(products::is_deleted.eq(false)),
            )
            .set((
                products::product_code.eq(Some(code.as_str())),
                products::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)?;
            if updated == 0 {
                return Err(RepositoryError::UpdateDenied("products.product_code"));
            }

            for stock in stocks {
                let option_code = option_code(product_id, stock.color_id, stock.size_id);
                let inserted = diesel::insert_into(stocks_table::table)
                    .values(DbNewStock {
                        product_option_code: &option_code,
                        product_id,
                        color_id: stock.color_id,
                        size_id: stock.size_id,
                        remain: stock.remain,
                        is_stock_manage: stock.is_stock_manage,
                    })
                    .execute(conn)?;
                if inserted == 0 {
                    return Err(RepositoryError::InsertDenied("stocks"));
                }
            }

            let inserted = diesel::insert_into(product_histories::table)
                .values(NewProductHistory::snapshot(product_id, product))
                .execute(conn)?;
            if inserted == 0 {
                return Err(RepositoryError::InsertDenied("product_histories"));
            }

            let inserted = diesel::insert_into(product_sales_volumes::table)
                .values(NewProductSalesVolume { product_id })
                .execute(conn)?;
            if inserted == 0 {
                return Err(RepositoryError::InsertDenied("product_sales_volumes"));
            }

            let inserted = diesel::insert_into(bookmark_volumes::table)
                .values(NewBookmarkVolume { product_id })
                .execute(conn)?;
            if inserted == 0 {
                return Err(RepositoryError::InsertDenied("bookmark_volumes"));
            }

            // Uploads run last: the object store cannot be rolled back with
            // the transaction, so every database failure up to here leaves
            // nothing behind in it.
            for (index, image) in images.iter().enumerate() {
                let key = image_key(product.seller_id, product_id, &code);
                let stored = storage.upload(&image.bytes, &key)?;

                let row = NewProductImage {
                    product_id,
                    image_url: &stored,
                    order_index: (index + 1) as i32,
                };
                if let Err(err) = diesel::insert_into(product_images::table)
                    .values(row)
                    .execute(conn)
                {
                    if let Err(delete_err) = storage.delete(&stored) {
                        log::error!(
                            "failed to remove uploaded object {stored} after insert error: {delete_err}"
                        );
                    }
                    return Err(err.into());
                }
            }

            Ok(RegisteredProduct {
                product_id,
                product_code: code,
            })
        })
    }
}
