use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::authz::Owned;

#[derive(Queryable, Selectable, Identifiable, Debug, Serialize, Clone, PartialEq)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub author_id: i32,
    pub question_id: i32,
    pub modified_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment {
    pub content: String,
    pub author_id: i32,
    pub question_id: i32,
    pub modified_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::comments)]
pub struct UpdateComment {
    pub content: String,
    pub modified_at: NaiveDateTime,
}

impl Owned for Comment {
    const KIND: &'static str = "comment";

    fn owner_id(&self) -> i32 {
        self.author_id
    }
}
