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
    models::question::UpdateQuestion,
    render,
    validation::FieldErrors,
};

use super::{QuestionForm, question_path};

const HEADING: &str = "Edit question";

fn action(id: i32) -> String {
    format!("/question/edit/{id}")
}

#[debug_handler]
pub async fn edit_question_form(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let question = ctx.store.get_question(id).await?;

    if authorize_owner(&question, &identity).is_err() {
        return Ok(flash::redirect_with(jar, Flash::QuestionEditDenied, &question_path(id)));
    }

    let (jar, flash) = flash::take(jar);
    let body = render::question_form(
        HEADING,
        &action(id),
        &question.subject,
        &question.content,
        &FieldErrors::none(),
    );

    Ok((
        jar,
        render::page(&ctx.config, Some(&identity), HEADING, flash, &body),
    )
        .into_response())
}

#[debug_handler]
pub async fn update_question(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    EntityId(id): EntityId,
    jar: CookieJar,
    Form(form): Form<QuestionForm>,
) -> Result<Response, AppError> {
    let question = ctx.store.get_question(id).await?;

    if authorize_owner(&question, &identity).is_err() {
        return Ok(flash::redirect_with(jar, Flash::QuestionEditDenied, &question_path(id)));
    }

    if let Err(errors) = form.check() {
        let body = render::question_form(HEADING, &action(id), &form.subject, &form.content, &errors);
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            render::page(&ctx.config, Some(&identity), HEADING, None, &body),
        )
            .into_response());
    }

    ctx.store
        .update_question(
            id,
            UpdateQuestion {
                subject: form.subject,
                content: form.content,
                modified_at: chrono::Utc::now().naive_utc(),
            },
        )
        .await?;

    tracing::info!(question_id = id, "Question updated");

    Ok(Redirect::to(&question_path(id)).into_response())
}
