use chrono::{Duration, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::enquiry::{AnswerDetail, EnquiryListQuery, EnquirySummary, NewAnswer};
use crate::models::enquiry::NewEnquiryReply;
use crate::repository::{
    DieselRepository, EnquiryReader, EnquiryWriter, RepositoryError, RepositoryResult, day_end,
    day_start,
};

impl EnquiryReader for DieselRepository {
    fn list_enquiries(
        &self,
        query: EnquiryListQuery,
        now: NaiveDateTime,
    ) -> RepositoryResult<(usize, Vec<EnquirySummary>)> {
        use crate::schema::{
            accounts, enquiries, enquiry_replies, enquiry_types, products, sellers, users,
        };

        let mut conn = self.conn()?;

        let mut count_query = enquiries::table
            .inner_join(enquiry_types::table)
            .inner_join(users::table)
            .inner_join(products::table.inner_join(sellers::table))
            .left_join(
                enquiry_replies::table.on(enquiry_replies::enquiry_id
                    .eq(enquiries::id)
                    .and(enquiry_replies::is_deleted.eq(false))),
            )
            .filter(enquiries::is_deleted.eq(false))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(answered) = query.answered {
            count_query = if answered {
                count_query.filter(enquiry_replies::id.is_not_null())
            } else {
                count_query.filter(enquiry_replies::id.is_null())
            };
        }
        if let Some(name) = query.product_name.as_ref() {
            count_query = count_query.filter(products::name.like(format!("%{name}%")));
        } else if let Some(id) = query.enquiry_id {
            count_query = count_query.filter(enquiries::id.eq(id));
        } else if let Some(name) = query.seller_name.as_ref() {
            count_query = count_query.filter(sellers::name.like(format!("%{name}%")));
        } else if let Some(number) = query.membership_number {
            count_query = count_query.filter(users::account_id.eq(number));
        }
        if let Some(type_id) = query.enquiry_type_id {
            count_query = count_query.filter(enquiry_types::id.eq(type_id));
        }
        if let Some(days) = query.response_within_days {
            count_query =
                count_query.filter(enquiries::created_at.between(now - Duration::days(days), now));
        }
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            count_query =
                count_query.filter(enquiries::created_at.between(day_start(start), day_end(end)));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = enquiries::table
            .inner_join(enquiry_types::table)
            .inner_join(users::table)
            .inner_join(products::table.inner_join(sellers::table))
            .left_join(
                enquiry_replies::table.on(enquiry_replies::enquiry_id
                    .eq(enquiries::id)
                    .and(enquiry_replies::is_deleted.eq(false))),
            )
            .left_join(accounts::table.on(accounts::id.eq(enquiry_replies::account_id)))
            .filter(enquiries::is_deleted.eq(false))
            .select((
                enquiries::id,
                enquiry_types::name,
                enquiries::created_at,
                users::phone,
                users::account_id,
                products::name,
                enquiries::content,
                sellers::name,
                enquiries::is_secret,
                enquiry_replies::content.nullable(),
                enquiry_replies::created_at.nullable(),
                accounts::username.nullable(),
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(answered) = query.answered {
            items = if answered {
                items.filter(enquiry_replies::id.is_not_null())
            } else {
                items.filter(enquiry_replies::id.is_null())
            };
        }
        if let Some(name) = query.product_name.as_ref() {
            items = items.filter(products::name.like(format!("%{name}%")));
        } else if let Some(id) = query.enquiry_id {
            items = items.filter(enquiries::id.eq(id));
        } else if let Some(name) = query.seller_name.as_ref() {
            items = items.filter(sellers::name.like(format!("%{name}%")));
        } else if let Some(number) = query.membership_number {
            items = items.filter(users::account_id.eq(number));
        }
        if let Some(type_id) = query.enquiry_type_id {
            items = items.filter(enquiry_types::id.eq(type_id));
        }
        if let Some(days) = query.response_within_days {
            items = items.filter(enquiries::created_at.between(now - Duration::days(days), now));
        }
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            items = items.filter(enquiries::created_at.between(day_start(start), day_end(end)));
        }

        let rows = items
            .order(enquiries::id.desc())
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .load::<(
                i32,
                String,
                NaiveDateTime,
                String,
                i32,
                String,
                String,
                String,
                bool,
                Option<String>,
                Option<NaiveDateTime>,
                Option<String>,
            )>(&mut conn)?;

        let summaries = rows
            .into_iter()
            .map(
                |(
                    id,
                    enquiry_type,
                    registration_date,
                    phone_number,
                    membership_number,
                    product_name,
                    question,
                    seller_name,
                    is_secret,
                    answer,
                    answer_date,
                    answer_user,
                )| EnquirySummary {
                    id,
                    enquiry_type,
                    registration_date,
                    phone_number,
                    product_name,
                    question,
                    membership_number,
                    seller_name,
                    is_secret,
                    is_answered: answer.is_some(),
                    answer,
                    answer_date,
                    answer_user,
                },
            )
            .collect();

        Ok((total, summaries))
    }

    fn get_answer_detail(&self, enquiry_id: i32) -> RepositoryResult<Option<AnswerDetail>> {
        use crate::schema::{
            accounts, enquiries, enquiry_replies, enquiry_types, product_images, products, users,
        };

        let mut conn = self.conn()?;

        let row = enquiries::table
            .inner_join(enquiry_types::table)
            .inner_join(users::table)
            .inner_join(
                products::table.inner_join(
                    product_images::table.on(product_images::product_id
                        .eq(products::id)
                        .and(product_images::order_index.eq(1))
                        .and(product_images::is_deleted.eq(false))),
                ),
            )
            .left_join(
                enquiry_replies::table.on(enquiry_replies::enquiry_id
                    .eq(enquiries::id)
                    .and(enquiry_replies::is_deleted.eq(false))),
            )
            .left_join(accounts::table.on(accounts::id.eq(enquiry_replies::account_id)))
            .filter(enquiries::is_deleted.eq(false))
            .filter(enquiries::id.eq(enquiry_id))
            .select((
                enquiries::id,
                enquiry_types::name,
                accounts::username.nullable(),
                users::name,
                users::phone,
                products::name,
                product_images::image_url,
                enquiries::content,
                enquiries::created_at,
                enquiries::is_secret,
            ))
            .first::<(
                i32,
                String,
                Option<String>,
                Option<String>,
                String,
                String,
                String,
                String,
                NaiveDateTime,
                bool,
            )>(&mut conn)
            .optional()?;

        Ok(row.map(
            |(
                id,
                enquiry_type,
                username,
                name,
                phone,
                product_name,
                product_image_key,
                question,
                registration_date,
                is_secret,
            )| AnswerDetail {
                id,
                enquiry_type,
                username,
                name,
                phone,
                product_name,
                product_image_key,
                question,
                registration_date,
                is_secret,
            },
        ))
    }
}

impl EnquiryWriter for DieselRepository {
    fn create_answer(&self, answer: &NewAnswer) -> RepositoryResult<()> {
        use crate::schema::enquiry_replies;

        let mut conn = self.conn()?;

        let exists = diesel::select(diesel::dsl::exists(
            enquiry_replies::table
                .filter(enquiry_replies::enquiry_id.eq(answer.enquiry_id))
                .filter(enquiry_replies::is_deleted.eq(false)),
        ))
        .get_result::<bool>(&mut conn)?;
        if exists {
            return Err(RepositoryError::Conflict);
        }

        let inserted = diesel::insert_into(enquiry_replies::table)
            .values(NewEnquiryReply::from(answer))
            .execute(&mut conn)?;
        if inserted == 0 {
            return Err(RepositoryError::InsertDenied("enquiry_replies"));
        }

        Ok(())
    }

    fn update_answer(&self, enquiry_id: i32, content: &str) -> RepositoryResult<()> {
        use crate::schema::enquiry_replies;

        let mut conn = self.conn()?;
        let updated = diesel::update(
            enquiry_replies::table
                .filter(enquiry_replies::enquiry_id.eq(enquiry_id))
                .filter(enquiry_replies::is_deleted.eq(false)),
        )
        .set(enquiry_replies::content.eq(content))
        .execute(&mut conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn delete_answer(&self, enquiry_id: i32) -> RepositoryResult<()> {
        use crate::schema::enquiry_replies;

        let mut conn = self.conn()?;
        let deleted = diesel::update(
            enquiry_replies::table
                .filter(enquiry_replies::enquiry_id.eq(enquiry_id))
                .filter(enquiry_replies::is_deleted.eq(false)),
        )
        .set(enquiry_replies::is_deleted.eq(true))
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn delete_enquiry(&self, enquiry_id: i32) -> RepositoryResult<()> {
        use crate::schema::enquiries;

        let mut conn = self.conn()?;
        let deleted = diesel::update(
            enquiries::table
                .filter(enquiries::id.eq(enquiry_id))
                .filter(enquiries::is_deleted.eq(false)),
        )
        .set(enquiries::is_deleted.eq(true))
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
