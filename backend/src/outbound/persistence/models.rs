//! Internal Diesel row structs. Never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::Faq;

use super::schema::faqs;

/// Row struct for reading from the faqs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = faqs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FaqRow {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FaqRow> for Faq {
    fn from(row: FaqRow) -> Self {
        let FaqRow {
            id,
            question,
            answer,
            created_at,
            updated_at,
        } = row;
        Self {
            id,
            question,
            answer,
            created_at,
            updated_at,
        }
    }
}

/// Insertable struct for new FAQ records; timestamps default in the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = faqs)]
pub(crate) struct NewFaqRow<'a> {
    pub id: Uuid,
    pub question: &'a str,
    pub answer: &'a str,
}

/// Changeset for partial updates; `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = faqs)]
pub(crate) struct FaqChangeset<'a> {
    pub question: Option<&'a str>,
    pub answer: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
