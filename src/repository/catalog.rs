use diesel::prelude::*;

use crate::domain::catalog::{Color, MainCategory, OriginType, SellerSummary, Size, SubCategory};
use crate::repository::{CatalogReader, DieselRepository, RepositoryResult};

impl CatalogReader for DieselRepository {
    fn list_origin_types(&self) -> RepositoryResult<Vec<OriginType>> {
        use crate::schema::product_origin_types;

        let mut conn = self.conn()?;
        let rows = product_origin_types::table
            .filter(product_origin_types::is_deleted.eq(false))
            .order(product_origin_types::id.asc())
            .select((product_origin_types::id, product_origin_types::name))
            .load::<(i32, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| OriginType {
                product_origin_type_id: id,
                product_origin_type_name: name,
            })
            .collect())
    }

    fn list_colors(&self) -> RepositoryResult<Vec<Color>> {
        use crate::schema::colors;

        let mut conn = self.conn()?;
        let rows = colors::table
            .filter(colors::is_deleted.eq(false))
            .order(colors::id.asc())
            .select((colors::id, colors::name))
            .load::<(i32, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Color {
                color_id: id,
                color_name: name,
            })
            .collect())
    }

    fn list_sizes(&self) -> RepositoryResult<Vec<Size>> {
        use crate::schema::sizes;

        let mut conn = self.conn()?;
        let rows = sizes::table
            .filter(sizes::is_deleted.eq(false))
            .order(sizes::id.asc())
            .select((sizes::id, sizes::name))
            .load::<(i32, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Size {
                size_id: id,
                size_name: name,
            })
            .collect())
    }

    fn list_main_categories(&self) -> RepositoryResult<Vec<MainCategory>> {
        use crate::schema::main_categories;

        let mut conn = self.conn()?;
        let rows = main_categories::table
            .filter(main_categories::is_deleted.eq(false))
            .order(main_categories::id.asc())
            .select((main_categories::id, main_categories::name))
            .load::<(i32, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| MainCategory {
                main_category_id: id,
                main_category_name: name,
            })
            .collect())
    }

    fn list_sub_categories(&self, main_category_id: i32) -> RepositoryResult<Vec<SubCategory>> {
        use crate::schema::sub_categories;

        let mut conn = self.conn()?;
        let rows = sub_categories::table
            .filter(sub_categories::is_deleted.eq(false))
            .filter(sub_categories::main_category_id.eq(main_category_id))
            .order(sub_categories::id.asc())
            .select((sub_categories::id, sub_categories::name))
            .load::<(i32, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| SubCategory {
                sub_category_id: id,
                sub_category_name: name,
            })
            .collect())
    }

    fn search_sellers_by_name(&self, name: &str) -> RepositoryResult<Vec<SellerSummary>> {
        use crate::schema::sellers;

        let mut conn = self.conn()?;
        let rows = sellers::table
            .filter(sellers::is_deleted.eq(false))
            .filter(sellers::name.like(format!("%{name}%")))
            .order(sellers::id.asc())
            .select((sellers::id, sellers::name, sellers::profile_image_url))
            .load::<(i32, String, Option<String>)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(id, seller_name, profile_image_key)| SellerSummary {
                seller_id: id,
                seller_name,
                profile_image_key,
            })
            .collect())
    }
}
