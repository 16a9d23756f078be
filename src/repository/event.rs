use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::event::{
    EventListQuery, EventProductQuery, EventProductRow, EventStatus, EventSummary,
    menu_attribute_types,
};
use crate::repository::{DieselRepository, EventReader, RepositoryResult, day_end, day_start};

impl EventReader for DieselRepository {
    fn list_events(
        &self,
        query: EventListQuery,
        now: NaiveDateTime,
    ) -> RepositoryResult<(usize, Vec<EventSummary>)> {
        use crate::schema::{event_kinds, event_types, events, events_products};

        let mut conn = self.conn()?;

        let mut count_query = events::table
            .inner_join(event_types::table)
            .inner_join(event_kinds::table)
            .filter(events::is_deleted.eq(false))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(name) = query.name.as_ref() {
            count_query = count_query.filter(events::name.like(format!("%{name}%")));
        } else if let Some(number) = query.number {
            count_query = count_query.filter(events::id.eq(number));
        }
        match query.status {
            Some(EventStatus::Progress) => {
                count_query = count_query
                    .filter(events::start_date.le(now))
                    .filter(events::end_date.ge(now));
            }
            Some(EventStatus::Wait) => {
                count_query = count_query.filter(events::start_date.gt(now));
            }
            Some(EventStatus::End) => {
                count_query = count_query.filter(events::end_date.lt(now));
            }
            None => {}
        }
        if let Some(exposure) = query.exposure {
            count_query = count_query.filter(events::is_display.eq(exposure));
        }
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            count_query =
                count_query.filter(events::created_at.between(day_start(start), day_end(end)));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = events::table
            .inner_join(event_types::table)
            .inner_join(event_kinds::table)
            .filter(events::is_deleted.eq(false))
            .select((
                events::id,
                events::name,
                event_types::name,
                event_kinds::name,
                events::start_date,
                events::end_date,
                events::is_display,
                events::created_at,
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(name) = query.name.as_ref() {
            items = items.filter(events::name.like(format!("%{name}%")));
        } else if let Some(number) = query.number {
            items = items.filter(events::id.eq(number));
        }
        match query.status {
            Some(EventStatus::Progress) => {
                items = items
                    .filter(events::start_date.le(now))
                    .filter(events::end_date.ge(now));
            }
            Some(EventStatus::Wait) => {
                items = items.filter(events::start_date.gt(now));
            }
            Some(EventStatus::End) => {
                items = items.filter(events::end_date.lt(now));
            }
            None => {}
        }
        if let Some(exposure) = query.exposure {
            items = items.filter(events::is_display.eq(exposure));
        }
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            items = items.filter(events::created_at.between(day_start(start), day_end(end)));
        }

        let rows = items
            .order(events::id.desc())
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .load::<(
                i32,
                String,
                String,
                String,
                NaiveDateTime,
                NaiveDateTime,
                bool,
                NaiveDateTime,
            )>(&mut conn)?;

        if rows.is_empty() {
            return Ok((total, Vec::new()));
        }

        let event_ids: Vec<i32> = rows.iter().map(|row| row.0).collect();
        let counts: HashMap<i32, i64> = events_products::table
            .filter(events_products::event_id.eq_any(&event_ids))
            .group_by(events_products::event_id)
            .select((events_products::event_id, diesel::dsl::count_star()))
            .load::<(i32, i64)>(&mut conn)?
            .into_iter()
            .collect();

        let summaries = rows
            .into_iter()
            .map(
                |(id, name, event_type, event_kind, start_date, end_date, is_display, created_at)| {
                    EventSummary {
                        event_number: id,
                        event_name: name,
                        event_status: EventStatus::of(start_date, end_date, now),
                        event_type,
                        event_kind,
                        start_date,
                        end_date,
                        is_display,
                        created_at,
                        product_count: counts.get(&id).copied().unwrap_or(0),
                    }
                },
            )
            .collect();

        Ok((total, summaries))
    }

    fn list_event_candidates(
        &self,
        query: EventProductQuery,
    ) -> RepositoryResult<(usize, Vec<EventProductRow>)> {
        use crate::schema::{product_images, products, sellers};

        let mut conn = self.conn()?;

        let mut count_query = products::table
            .inner_join(
                product_images::table.on(product_images::product_id
                    .eq(products::id)
                    .and(product_images::order_index.eq(1))
                    .and(product_images::is_deleted.eq(false))),
            )
            .inner_join(sellers::table)
            .filter(products::is_deleted.eq(false))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(name) = query.product_name.as_ref() {
            count_query = count_query.filter(products::name.like(format!("%{name}%")));
        } else if let Some(code) = query.product_code.as_ref() {
            count_query = count_query.filter(products::product_code.eq(Some(code.clone())));
        }
        if let Some(name) = query.seller_name.as_ref() {
            count_query = count_query.filter(sellers::name.eq(name.clone()));
        } else if let Some(seller_id) = query.seller_id {
            count_query = count_query.filter(products::seller_id.eq(seller_id));
        }
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            count_query =
                count_query.filter(products::created_at.between(day_start(start), day_end(end)));
        }
        if let Some(ids) = query.menu_id.and_then(menu_attribute_types) {
            count_query = count_query.filter(sellers::seller_attribute_type_id.eq_any(ids));
        }
        if let Some(main_category_id) = query.main_category_id {
            count_query = count_query.filter(products::main_category_id.eq(main_category_id));
        }
        if let Some(sub_category_id) = query.sub_category_id {
            count_query = count_query.filter(products::sub_category_id.eq(sub_category_id));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table
            .inner_join(
                product_images::table.on(product_images::product_id
                    .eq(products::id)
                    .and(product_images::order_index.eq(1))
                    .and(product_images::is_deleted.eq(false))),
            )
            .inner_join(sellers::table)
            .filter(products::is_deleted.eq(false))
            .select((
                products::id,
                product_images::image_url,
                products::product_code,
                products::name,
                sellers::name,
                products::origin_price,
                products::discounted_price,
                products::discount_rate,
                products::is_sale,
                products::is_display,
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(name) = query.product_name.as_ref() {
            items = items.filter(products::name.like(format!("%{name}%")));
        } else if let Some(code) = query.product_code.as_ref() {
            items = items.filter(products::product_code.eq(Some(code.clone())));
        }
        if let Some(name) = query.seller_name.as_ref() {
            items = items.filter(sellers::name.eq(name.clone()));
        } else if let Some(seller_id) = query.seller_id {
            items = items.filter(products::seller_id.eq(seller_id));
        }
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            items = items.filter(products::created_at.between(day_start(start), day_end(end)));
        }
        if let Some(ids) = query.menu_id.and_then(menu_attribute_types) {
            items = items.filter(sellers::seller_attribute_type_id.eq_any(ids));
        }
        if let Some(main_category_id) = query.main_category_id {
            items = items.filter(products::main_category_id.eq(main_category_id));
        }
        if let Some(sub_category_id) = query.sub_category_id {
            items = items.filter(products::sub_category_id.eq(sub_category_id));
        }

        items = items.order(products::id.desc());
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let rows = items.load::<(
            i32,
            String,
            Option<String>,
            String,
            String,
            i64,
            i64,
            f64,
            bool,
            bool,
        )>(&mut conn)?;

        let candidates = rows
            .into_iter()
            .map(
                |(
                    product_id,
                    thumbnail_key,
                    product_code,
                    product_name,
                    seller_name,
                    origin_price,
                    discounted_price,
                    discount_rate,
                    is_sale,
                    is_display,
                )| EventProductRow {
                    product_id,
                    thumbnail_key,
                    product_code: product_code.unwrap_or_default(),
                    product_name,
                    seller_name,
                    origin_price,
                    discounted_price,
                    discount_rate,
                    is_sale,
                    is_display,
                },
            )
            .collect();

        Ok((total, candidates))
    }
}
