use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::{
    App,
    error::AppError,
    extract::{EntityId, Form},
    flash,
    identity::AuthUser,
    models::comment::NewComment,
    question::question_path,
    render,
    validation::FieldErrors,
};

use super::CommentForm;

const HEADING: &str = "Add a comment";

fn action(question_id: i32) -> String {
    format!("/comment/new/{question_id}")
}

#[debug_handler]
pub async fn new_comment_form(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    EntityId(question_id): EntityId,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let question = ctx.store.get_question(question_id).await?;

    let (jar, flash) = flash::take(jar);
    let body = render::comment_form(
        HEADING,
        &action(question_id),
        &question,
        "",
        &FieldErrors::none(),
    );

    Ok((
        jar,
        render::page(&ctx.config, Some(&identity), HEADING, flash, &body),
    ))
}

#[debug_handler]
pub async fn create_comment(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    EntityId(question_id): EntityId,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    // the parent has to exist before anything is written
    let question = ctx.store.get_question(question_id).await?;

    if let Err(errors) = form.check() {
        let body = render::comment_form(
            HEADING,
            &action(question_id),
            &question,
            &form.content,
            &errors,
        );
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            render::page(&ctx.config, Some(&identity), HEADING, None, &body),
        )
            .into_response());
    }

    let comment = ctx
        .store
        .insert_comment(NewComment {
            content: form.content,
            author_id: identity.id,
            question_id,
            modified_at: chrono::Utc::now().naive_utc(),
        })
        .await?;

    tracing::info!(
        comment_id = comment.id,
        question_id,
        author_id = identity.id,
        "Comment created"
    );

    Ok(Redirect::to(&question_path(question_id)).into_response())
}
