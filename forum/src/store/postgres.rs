use std::collections::HashMap;

use diesel::prelude::*;
use diesel_async::{
    AsyncPgConnection, RunQueryDsl,
    pooled_connection::{
        AsyncDieselConnectionManager,
        deadpool::{Object, Pool},
    },
};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::{
    identity::models::identity::{Identity, Traits},
    models::{
        comment::{Comment, NewComment, UpdateComment},
        question::{NewQuestion, Question, UpdateQuestion},
    },
    schema::{comments, identities, questions, sessions},
};

use super::{SessionStore, Store, StoreError};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DieselPool = Pool<AsyncPgConnection>;

#[derive(Clone)]
pub struct PgStore {
    diesel: DieselPool,
}

impl PgStore {
    pub fn connect(database_url: &str, max_connections: usize) -> eyre::Result<Self> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let diesel = Pool::builder(manager).max_size(max_connections).build()?;

        tracing::info!(max_connections, "Diesel pool initialized");

        Ok(PgStore { diesel })
    }

    async fn conn(&self) -> Result<Object<AsyncPgConnection>, StoreError> {
        self.diesel
            .get()
            .await
            .map_err(|e| StoreError::Pool(e.to_string()))
    }
}

/// Applies pending migrations over a blocking connection, since the harness
/// is synchronous.
pub async fn run_migrations(database_url: String) -> eyre::Result<usize> {
    tokio::task::spawn_blocking(move || -> eyre::Result<usize> {
        let mut conn = diesel::PgConnection::establish(&database_url)?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| eyre::eyre!("Failed to run migrations: {e}"))?;

        for migration in &applied {
            tracing::debug!("Applied migration: {migration}");
        }

        Ok(applied.len())
    })
    .await?
}

#[async_trait::async_trait]
impl Store for PgStore {
    async fn get_question(&self, id: i32) -> Result<Question, StoreError> {
        let mut conn = self.conn().await?;

        Ok(questions::table
            .find(id)
            .select(Question::as_select())
            .first(&mut conn)
            .await?)
    }

    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        let mut conn = self.conn().await?;

        Ok(questions::table
            .order((questions::modified_at.desc(), questions::id.desc()))
            .select(Question::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut conn = self.conn().await?;

        Ok(diesel::insert_into(questions::table)
            .values(&question)
            .returning(Question::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn update_question(
        &self,
        id: i32,
        changes: UpdateQuestion,
    ) -> Result<Question, StoreError> {
        let mut conn = self.conn().await?;

        Ok(diesel::update(questions::table.find(id))
            .set(&changes)
            .returning(Question::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete_question(&self, id: i32) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;

        // comments go with it through the ON DELETE CASCADE foreign key
        let deleted = diesel::delete(questions::table.find(id))
            .execute(&mut conn)
            .await?;

        if deleted == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn get_comment(&self, id: i32) -> Result<Comment, StoreError> {
        let mut conn = self.conn().await?;

        Ok(comments::table
            .find(id)
            .select(Comment::as_select())
            .first(&mut conn)
            .await?)
    }

    async fn comments_for_question(&self, question_id: i32) -> Result<Vec<Comment>, StoreError> {
        let mut conn = self.conn().await?;

        Ok(comments::table
            .filter(comments::question_id.eq(question_id))
            .order((comments::modified_at.asc(), comments::id.asc()))
            .select(Comment::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let mut conn = self.conn().await?;

        let result = diesel::insert_into(comments::table)
            .values(&comment)
            .returning(Comment::as_returning())
            .get_result(&mut conn)
            .await;

        match result {
            // the parent question vanished between the lookup and the insert
            Err(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                _,
            )) => Err(StoreError::NotFound),
            other => Ok(other?),
        }
    }

    async fn update_comment(
        &self,
        id: i32,
        changes: UpdateComment,
    ) -> Result<Comment, StoreError> {
        let mut conn = self.conn().await?;

        Ok(diesel::update(comments::table.find(id))
            .set(&changes)
            .returning(Comment::as_returning())
            .get_result(&mut conn)
            .await?)
    }

    async fn delete_comment(&self, id: i32) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;

        let deleted = diesel::delete(comments::table.find(id))
            .execute(&mut conn)
            .await?;

        if deleted == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn author_names(&self, ids: &[i32]) -> Result<HashMap<i32, String>, StoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = self.conn().await?;

        let rows: Vec<(i32, serde_json::Value)> = identities::table
            .filter(identities::id.eq_any(ids))
            .select((identities::id, identities::traits))
            .load(&mut conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, traits)| (id, Traits::from(traits).display_name(id)))
            .collect())
    }
}

#[async_trait::async_trait]
impl SessionStore for PgStore {
    async fn identity_for_token(&self, token: &str) -> Result<Option<Identity>, StoreError> {
        let mut conn = self.conn().await?;

        Ok(sessions::table
            .inner_join(identities::table)
            .filter(sessions::token.eq(token))
            .filter(sessions::active.eq(true))
            .filter(sessions::expires_at.gt(diesel::dsl::now))
            .filter(sessions::issued_at.le(diesel::dsl::now))
            .select(Identity::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }
}
