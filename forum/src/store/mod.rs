use std::collections::HashMap;

use crate::{
    identity::models::identity::Identity,
    models::{
        comment::{Comment, NewComment, UpdateComment},
        question::{NewQuestion, Question, UpdateQuestion},
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,

    #[error("could not get a database connection: {0}")]
    Pool(String),

    #[error(transparent)]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => StoreError::NotFound,
            e => StoreError::Database(e),
        }
    }
}

/// Persistence for questions and their comments. Every call is a single
/// document operation; there is no transaction spanning calls.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn get_question(&self, id: i32) -> Result<Question, StoreError>;

    /// All questions, most recently modified first.
    async fn all_questions(&self) -> Result<Vec<Question>, StoreError>;

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError>;

    async fn update_question(
        &self,
        id: i32,
        changes: UpdateQuestion,
    ) -> Result<Question, StoreError>;

    /// Removes the question together with its comments.
    async fn delete_question(&self, id: i32) -> Result<(), StoreError>;

    async fn get_comment(&self, id: i32) -> Result<Comment, StoreError>;

    /// Comments under a question, oldest first.
    async fn comments_for_question(&self, question_id: i32) -> Result<Vec<Comment>, StoreError>;

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError>;

    async fn update_comment(&self, id: i32, changes: UpdateComment)
    -> Result<Comment, StoreError>;

    async fn delete_comment(&self, id: i32) -> Result<(), StoreError>;

    /// Display names for the given identity ids. Unknown ids are left out.
    async fn author_names(&self, ids: &[i32]) -> Result<HashMap<i32, String>, StoreError>;
}

/// Resolves session tokens handed out by the login service.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn identity_for_token(&self, token: &str) -> Result<Option<Identity>, StoreError>;
}
