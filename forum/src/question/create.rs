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
    extract::Form,
    flash,
    identity::AuthUser,
    models::question::NewQuestion,
    render,
    validation::FieldErrors,
};

use super::{QuestionForm, question_path};

const HEADING: &str = "Ask a question";
const ACTION: &str = "/question/new";

#[debug_handler]
pub async fn new_question_form(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (jar, flash) = flash::take(jar);
    let body = render::question_form(HEADING, ACTION, "", "", &FieldErrors::none());

    Ok((
        jar,
        render::page(&ctx.config, Some(&identity), HEADING, flash, &body),
    ))
}

#[debug_handler]
pub async fn create_question(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    Form(form): Form<QuestionForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.check() {
        let body = render::question_form(HEADING, ACTION, &form.subject, &form.content, &errors);
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            render::page(&ctx.config, Some(&identity), HEADING, None, &body),
        )
            .into_response());
    }

    let question = ctx
        .store
        .insert_question(NewQuestion {
            subject: form.subject,
            content: form.content,
            author_id: identity.id,
            modified_at: chrono::Utc::now().naive_utc(),
        })
        .await?;

    tracing::info!(
        question_id = question.id,
        author_id = identity.id,
        "Question created"
    );

    Ok(Redirect::to(&question_path(question.id)).into_response())
}
