use axum::{debug_handler, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;

use crate::{App, error::AppError, extract::EntityId, flash, identity::AuthUser, render};

use super::names_of;

#[debug_handler]
pub async fn view_question(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let question = ctx.store.get_question(id).await?;
    let comments = ctx.store.comments_for_question(id).await?;

    let names = names_of(
        &ctx,
        std::iter::once(question.author_id).chain(comments.iter().map(|c| c.author_id)),
    )
    .await?;

    let (jar, flash) = flash::take(jar);
    let body = render::question_detail(&question, &comments, &names, &identity);

    Ok((
        jar,
        render::page(&ctx.config, Some(&identity), &question.subject, flash, &body),
    ))
}

#[debug_handler]
pub async fn list_questions(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let questions = ctx.store.all_questions().await?;
    let names = names_of(&ctx, questions.iter().map(|q| q.author_id)).await?;

    let (jar, flash) = flash::take(jar);
    let body = render::question_list(&questions, &names);

    Ok((
        jar,
        render::page(&ctx.config, Some(&identity), "Questions", flash, &body),
    ))
}
