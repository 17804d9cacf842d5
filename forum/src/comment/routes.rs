use axum::{Router, routing::get};

use crate::App;

use super::{
    create::{create_comment, new_comment_form},
    delete::delete_comment,
    edit::{edit_comment_form, update_comment},
};

pub fn route() -> Router<App> {
    Router::<App>::new()
        .route(
            "/comment/new/{question_id}",
            get(new_comment_form).post(create_comment),
        )
        .route(
            "/comment/edit/{id}",
            get(edit_comment_form).post(update_comment),
        )
        .route("/comment/delete/{id}", get(delete_comment))
}
