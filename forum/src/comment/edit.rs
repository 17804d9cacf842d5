use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::{
    App,
    authz::authorize_owner,
    error::AppError,
    extract::{EntityId, Form},
    flash::{self, Flash},
    identity::AuthUser,
    models::comment::UpdateComment,
    question::question_path,
    render,
    validation::FieldErrors,
};

use super::CommentForm;

const HEADING: &str = "Edit comment";

fn action(id: i32) -> String {
    format!("/comment/edit/{id}")
}

#[debug_handler]
pub async fn edit_comment_form(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let comment = ctx.store.get_comment(id).await?;

    if authorize_owner(&comment, &identity).is_err() {
        return Ok(flash::redirect_with(
            jar,
            Flash::CommentEditDenied,
            &question_path(comment.question_id),
        ));
    }

    let question = ctx.store.get_question(comment.question_id).await?;

    let (jar, flash) = flash::take(jar);
    let body = render::comment_form(
        HEADING,
        &action(id),
        &question,
        &comment.content,
        &FieldErrors::none(),
    );

    Ok((
        jar,
        render::page(&ctx.config, Some(&identity), HEADING, flash, &body),
    )
        .into_response())
}

#[debug_handler]
pub async fn update_comment(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    EntityId(id): EntityId,
    jar: CookieJar,
    Form(form): Form<CommentForm>,
) -> Result<Response, AppError> {
    let comment = ctx.store.get_comment(id).await?;

    if authorize_owner(&comment, &identity).is_err() {
        return Ok(flash::redirect_with(
            jar,
            Flash::CommentEditDenied,
            &question_path(comment.question_id),
        ));
    }

    if let Err(errors) = form.check() {
        let question = ctx.store.get_question(comment.question_id).await?;
        let body = render::comment_form(HEADING, &action(id), &question, &form.content, &errors);
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            render::page(&ctx.config, Some(&identity), HEADING, None, &body),
        )
            .into_response());
    }

    ctx.store
        .update_comment(
            id,
            UpdateComment {
                content: form.content,
                modified_at: chrono::Utc::now().naive_utc(),
            },
        )
        .await?;

    tracing::info!(comment_id = id, "Comment updated");

    Ok(Redirect::to(&question_path(comment.question_id)).into_response())
}
