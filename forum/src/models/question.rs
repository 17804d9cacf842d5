use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::authz::Owned;

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize, Clone, PartialEq)]
#[diesel(table_name = crate::schema::questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Question {
    pub id: i32,
    pub subject: String,
    pub content: String,
    pub author_id: i32,
    pub modified_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::questions)]
pub struct NewQuestion {
    pub subject: String,
    pub content: String,
    pub author_id: i32,
    pub modified_at: NaiveDateTime,
}

/// Fields an author may change. The author itself is never part of an
/// update.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::questions)]
pub struct UpdateQuestion {
    pub subject: String,
    pub content: String,
    pub modified_at: NaiveDateTime,
}

impl Owned for Question {
    const KIND: &'static str = "question";

    fn owner_id(&self) -> i32 {
        self.author_id
    }
}
