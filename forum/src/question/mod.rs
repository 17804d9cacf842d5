pub mod create;
pub mod delete;
pub mod edit;
pub mod get;
pub mod routes;

use std::collections::HashMap;

use serde::Deserialize;
use validator::Validate;

use crate::{
    App,
    store::StoreError,
    validation::{FieldErrors, blank_as_empty},
};

/// The fields of the ask/edit form. Missing fields deserialize as empty so
/// that they are reported next to the input instead of failing the request.
#[derive(Deserialize, Validate, Debug, Default, Clone)]
pub struct QuestionForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Subject must be 1 to 200 characters"))]
    pub subject: String,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 10000,
        message = "Question must be 1 to 10000 characters"
    ))]
    pub content: String,
}

impl QuestionForm {
    /// Validates the form as submitted. The fields themselves are stored
    /// unchanged.
    pub fn check(&self) -> Result<(), FieldErrors> {
        QuestionForm {
            subject: blank_as_empty(&self.subject).to_owned(),
            content: blank_as_empty(&self.content).to_owned(),
        }
        .validate()
        .map_err(FieldErrors::from)
    }
}

pub fn question_path(id: i32) -> String {
    format!("/question/{id}")
}

/// Display names of the given authors, each looked up once.
pub(crate) async fn names_of(
    ctx: &App,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, String>, StoreError> {
    let mut ids: Vec<i32> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ctx.store.author_names(&ids).await
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::{
        models::question::NewQuestion,
        store::Store,
        test_utils::{TestForum, U1, U2},
    };

    async fn ask(forum: &TestForum, token: &str, subject: &str, content: &str) -> i32 {
        let res = forum
            .post_form(
                "/question/new",
                Some(token),
                &[("subject", subject), ("content", content)],
            )
            .await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        res.location()
            .and_then(|l| l.strip_prefix("/question/"))
            .and_then(|id| id.parse().ok())
            .expect("redirect to the new question")
    }

    #[test]
    fn blank_fields_are_reported_per_field() {
        let form = QuestionForm {
            subject: "   ".into(),
            content: "fine".into(),
        };
        let errors = form.check().unwrap_err();
        assert_eq!(errors.for_field("subject"), ["Subject must be 1 to 200 characters"]);
        assert!(errors.for_field("content").is_empty());
    }

    #[tokio::test]
    async fn created_question_reads_back_with_its_author() {
        let forum = TestForum::new().await;
        let id = ask(&forum, U1, "S", "C").await;

        let stored = forum.store.get_question(id).await.unwrap();
        assert_eq!(stored.subject, "S");
        assert_eq!(stored.content, "C");
        assert_eq!(stored.author_id, forum.u1.id);

        let res = forum.get(&format!("/question/{id}"), Some(U2)).await;
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.contains("<h1>S</h1>"));
        assert!(res.body.contains("Una"));
    }

    #[tokio::test]
    async fn timestamps_are_taken_at_write_time() {
        let forum = TestForum::new().await;
        let before = chrono::Utc::now().naive_utc();
        let id = ask(&forum, U1, "When", "now").await;
        let created = forum.store.get_question(id).await.unwrap().modified_at;
        assert!(created >= before);

        forum
            .post_form(
                &format!("/question/edit/{id}"),
                Some(U1),
                &[("subject", "When"), ("content", "later")],
            )
            .await;
        let edited = forum.store.get_question(id).await.unwrap().modified_at;
        assert!(edited >= created);
    }

    #[tokio::test]
    async fn invalid_submission_rerenders_the_form_and_stores_nothing() {
        let forum = TestForum::new().await;
        let res = forum
            .post_form("/question/new", Some(U1), &[("subject", ""), ("content", "body")])
            .await;

        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res.body.contains("Subject must be 1 to 200 characters"));
        assert!(res.body.contains(">body</textarea>"));
        assert!(forum.store.all_questions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_owner_cannot_edit() {
        let forum = TestForum::new().await;
        let id = ask(&forum, U1, "Budgeting 101", "Track every expense.").await;
        let before = forum.store.get_question(id).await.unwrap();

        let res = forum
            .post_form(
                &format!("/question/edit/{id}"),
                Some(U2),
                &[("subject", "Hijacked"), ("content", "Spend it all.")],
            )
            .await;

        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location(), Some(format!("/question/{id}").as_str()));
        assert_eq!(
            res.set_cookie("flash").as_deref(),
            Some("flash=question_edit_denied")
        );
        assert_eq!(forum.store.get_question(id).await.unwrap(), before);

        // the denial shows up on the page the visitor lands on, once
        let res = forum
            .get_with_cookie(&format!("/question/{id}"), U2, "flash=question_edit_denied")
            .await;
        assert!(res.body.contains("You can&#39;t edit a question you don&#39;t own."));
        assert_eq!(res.set_cookie("flash").as_deref(), Some("flash="));
    }

    #[tokio::test]
    async fn non_owner_is_turned_away_from_the_edit_form() {
        let forum = TestForum::new().await;
        let id = ask(&forum, U1, "Budgeting 101", "Track every expense.").await;

        let res = forum.get(&format!("/question/edit/{id}"), Some(U2)).await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location(), Some(format!("/question/{id}").as_str()));
    }

    #[tokio::test]
    async fn owner_edits_in_place() {
        let forum = TestForum::new().await;
        let id = ask(&forum, U1, "Budgeting 101", "Track every expense.").await;

        let res = forum.get(&format!("/question/edit/{id}"), Some(U1)).await;
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.contains("value=\"Budgeting 101\""));
        assert!(res.body.contains(">Track every expense.</textarea>"));

        let res = forum
            .post_form(
                &format!("/question/edit/{id}"),
                Some(U1),
                &[("subject", "Budgeting 102"), ("content", "Track every expense.")],
            )
            .await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location(), Some(format!("/question/{id}").as_str()));

        let stored = forum.store.get_question(id).await.unwrap();
        assert_eq!(stored.subject, "Budgeting 102");
        assert_eq!(stored.author_id, forum.u1.id);
    }

    #[tokio::test]
    async fn invalid_edit_rerenders_and_keeps_the_stored_question() {
        let forum = TestForum::new().await;
        let id = ask(&forum, U1, "Budgeting 101", "Track every expense.").await;
        let before = forum.store.get_question(id).await.unwrap();

        let res = forum
            .post_form(
                &format!("/question/edit/{id}"),
                Some(U1),
                &[("subject", " "), ("content", "A half finished thought")],
            )
            .await;

        assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res.body.contains("Subject must be 1 to 200 characters"));
        assert!(res.body.contains(">A half finished thought</textarea>"));
        assert!(res.body.contains(&format!("action=\"/question/edit/{id}\"")));
        assert_eq!(forum.store.get_question(id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn submitted_text_is_stored_as_typed() {
        let forum = TestForum::new().await;
        let id = ask(&forum, U1, " Spacing ", "  1. save\n  2. invest\n").await;

        let stored = forum.store.get_question(id).await.unwrap();
        assert_eq!(stored.subject, " Spacing ");
        assert_eq!(stored.content, "  1. save\n  2. invest\n");
    }

    #[tokio::test]
    async fn delete_answers_with_the_remaining_list() {
        let forum = TestForum::new().await;
        let keep = ask(&forum, U2, "Saving tips", "Pay yourself first.").await;
        let doomed = ask(&forum, U1, "Borrowing", "Is credit bad?").await;

        // non-owner: nothing changes
        let res = forum.get(&format!("/question/delete/{doomed}"), Some(U2)).await;
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.contains("You can&#39;t delete a question you don&#39;t own."));
        assert!(forum.store.get_question(doomed).await.is_ok());

        // owner: gone from the list
        let res = forum.get(&format!("/question/delete/{doomed}"), Some(U1)).await;
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.contains("The Question was deleted."));
        assert!(!res.body.contains("Borrowing"));
        assert!(res.body.contains("Saving tips"));

        let res = forum.get("/questions", Some(U1)).await;
        assert!(!res.body.contains(&format!("/question/{doomed}\"")));
        assert!(res.body.contains(&format!("/question/{keep}\"")));

        // deleting again does not silently succeed
        let res = forum.get(&format!("/question/delete/{doomed}"), Some(U1)).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lists_every_question() {
        let forum = TestForum::new().await;
        for (subject, author) in [("One", forum.u1.id), ("Two", forum.u2.id)] {
            forum
                .store
                .insert_question(NewQuestion {
                    subject: subject.into(),
                    content: "...".into(),
                    author_id: author,
                    modified_at: chrono::Utc::now().naive_utc(),
                })
                .await
                .unwrap();
        }

        let res = forum.get("/questions", Some(U1)).await;
        assert_eq!(res.status, StatusCode::OK);
        assert!(res.body.contains("One"));
        assert!(res.body.contains("Two"));
        assert!(res.body.contains("Ugo"));
    }

    #[tokio::test]
    async fn unknown_or_malformed_ids_are_not_found() {
        let forum = TestForum::new().await;
        for uri in ["/question/99", "/question/abc", "/question/edit/0", "/question/delete/-1"] {
            let res = forum.get(uri, Some(U1)).await;
            assert_eq!(res.status, StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn anonymous_visitors_are_sent_to_login() {
        let forum = TestForum::new().await;

        let res = forum.get("/questions", None).await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location(), Some("/login?next=%2Fquestions"));

        let res = forum.get("/question/new", Some("expired-token")).await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location(), Some("/login?next=%2Fquestion%2Fnew"));

        let res = forum
            .post_form("/question/new", None, &[("subject", "S"), ("content", "C")])
            .await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert!(forum.store.all_questions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn login_redirect_carries_the_path_as_one_parameter() {
        let forum = TestForum::new().await;
        let res = forum
            .get("/question/1&next=https:%2F%2Fevil.example", None)
            .await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);

        let location = res.location().unwrap();
        let (login, query) = location.split_once('?').unwrap();
        assert_eq!(login, "/login");

        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(
            pairs,
            [(
                "next".to_string(),
                "/question/1&next=https:%2F%2Fevil.example".to_string()
            )]
        );
    }
}
