use diesel::prelude::*;

use crate::domain::enquiry::NewAnswer;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::enquiry_replies)]
pub struct NewEnquiryReply<'a> {
    pub enquiry_id: i32,
    pub account_id: i32,
    pub content: &'a str,
}

impl<'a> From<&'a NewAnswer> for NewEnquiryReply<'a> {
    fn from(value: &'a NewAnswer) -> Self {
        Self {
            enquiry_id: value.enquiry_id,
            account_id: value.account_id,
            content: value.content.as_str(),
        }
    }
}
