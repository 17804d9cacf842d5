use axum::{Router, routing::get};

use crate::App;

use super::{
    create::{create_question, new_question_form},
    delete::delete_question,
    edit::{edit_question_form, update_question},
    get::{list_questions, view_question},
};

pub fn route() -> Router<App> {
    Router::<App>::new()
        .route("/question/new", get(new_question_form).post(create_question))
        .route(
            "/question/edit/{id}",
            get(edit_question_form).post(update_question),
        )
        .route("/question/delete/{id}", get(delete_question))
        .route("/question/{id}", get(view_question))
        .route("/questions", get(list_questions))
}
