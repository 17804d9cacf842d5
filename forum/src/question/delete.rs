use axum::{debug_handler, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;

use crate::{
    App,
    authz::authorize_owner,
    error::AppError,
    extract::EntityId,
    flash::{self, Flash},
    identity::AuthUser,
    render,
};

use super::names_of;

/// Deletes the question when the caller wrote it. Either way the answer is
/// the list of remaining questions with the outcome shown on top, not a
/// redirect.
#[debug_handler]
pub async fn delete_question(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let question = ctx.store.get_question(id).await?;

    let notice = match authorize_owner(&question, &identity) {
        Ok(()) => {
            ctx.store.delete_question(id).await?;
            tracing::info!(question_id = id, author_id = identity.id, "Question deleted");
            Flash::QuestionDeleted
        }
        Err(_) => Flash::QuestionDeleteDenied,
    };

    // a notice still pending from an earlier redirect is superseded
    let (jar, _) = flash::take(jar);

    let questions = ctx.store.all_questions().await?;
    let names = names_of(&ctx, questions.iter().map(|q| q.author_id)).await?;
    let body = render::question_list(&questions, &names);

    Ok((
        jar,
        render::page(&ctx.config, Some(&identity), "Questions", Some(notice), &body),
    ))
}
