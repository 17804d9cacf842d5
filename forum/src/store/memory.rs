use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;

use crate::{
    identity::models::identity::{Identity, Traits},
    models::{
        comment::{Comment, NewComment, UpdateComment},
        question::{NewQuestion, Question, UpdateQuestion},
    },
};

use super::{SessionStore, Store, StoreError};

/// Keeps every document in process memory. Used for local runs without
/// Postgres and as the store behind the route tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Documents>,
}

#[derive(Default)]
struct Documents {
    last_id: i32,
    questions: BTreeMap<i32, Question>,
    comments: BTreeMap<i32, Comment>,
    identities: HashMap<i32, Identity>,
    sessions: HashMap<String, i32>,
}

impl Documents {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_identity(&self, traits: Traits) -> Identity {
        let mut docs = self.inner.write().await;
        let identity = Identity::new_with_traits(docs.next_id(), traits);
        docs.identities.insert(identity.id, identity.clone());
        identity
    }

    /// Makes `token` resolve to `identity_id`, the way a login would.
    pub async fn add_session(&self, token: impl Into<String>, identity_id: i32) {
        self.inner
            .write()
            .await
            .sessions
            .insert(token.into(), identity_id);
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn get_question(&self, id: i32) -> Result<Question, StoreError> {
        self.inner
            .read()
            .await
            .questions
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        let mut questions: Vec<Question> =
            self.inner.read().await.questions.values().cloned().collect();
        questions.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(questions)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut docs = self.inner.write().await;
        let question = Question {
            id: docs.next_id(),
            subject: question.subject,
            content: question.content,
            author_id: question.author_id,
            modified_at: question.modified_at,
        };
        docs.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn update_question(
        &self,
        id: i32,
        changes: UpdateQuestion,
    ) -> Result<Question, StoreError> {
        let mut docs = self.inner.write().await;
        let question = docs.questions.get_mut(&id).ok_or(StoreError::NotFound)?;
        question.subject = changes.subject;
        question.content = changes.content;
        question.modified_at = changes.modified_at;
        Ok(question.clone())
    }

    async fn delete_question(&self, id: i32) -> Result<(), StoreError> {
        let mut docs = self.inner.write().await;
        docs.questions.remove(&id).ok_or(StoreError::NotFound)?;
        docs.comments.retain(|_, c| c.question_id != id);
        Ok(())
    }

    async fn get_comment(&self, id: i32) -> Result<Comment, StoreError> {
        self.inner
            .read()
            .await
            .comments
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn comments_for_question(&self, question_id: i32) -> Result<Vec<Comment>, StoreError> {
        let mut comments: Vec<Comment> = self
            .inner
            .read()
            .await
            .comments
            .values()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            a.modified_at
                .cmp(&b.modified_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(comments)
    }

    async fn insert_comment(&self, comment: NewComment) -> Result<Comment, StoreError> {
        let mut docs = self.inner.write().await;
        if !docs.questions.contains_key(&comment.question_id) {
            return Err(StoreError::NotFound);
        }
        let comment = Comment {
            id: docs.next_id(),
            content: comment.content,
            author_id: comment.author_id,
            question_id: comment.question_id,
            modified_at: comment.modified_at,
        };
        docs.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update_comment(
        &self,
        id: i32,
        changes: UpdateComment,
    ) -> Result<Comment, StoreError> {
        let mut docs = self.inner.write().await;
        let comment = docs.comments.get_mut(&id).ok_or(StoreError::NotFound)?;
        comment.content = changes.content;
        comment.modified_at = changes.modified_at;
        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: i32) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn author_names(&self, ids: &[i32]) -> Result<HashMap<i32, String>, StoreError> {
        let docs = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| docs.identities.get(id))
            .map(|i| (i.id, i.display_name()))
            .collect())
    }
}

#[async_trait::async_trait]
impl SessionStore for MemoryStore {
    async fn identity_for_token(&self, token: &str) -> Result<Option<Identity>, StoreError> {
        let docs = self.inner.read().await;
        Ok(docs
            .sessions
            .get(token)
            .and_then(|id| docs.identities.get(id))
            .cloned())
    }
}
