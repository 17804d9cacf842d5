use axum::{debug_handler, extract::State, response::Response};
use axum_extra::extract::CookieJar;

use crate::{
    App,
    authz::authorize_owner,
    error::AppError,
    extract::EntityId,
    flash::{self, Flash},
    identity::AuthUser,
    question::question_path,
};

#[debug_handler]
pub async fn delete_comment(
    State(ctx): State<App>,
    AuthUser(identity): AuthUser,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let comment = ctx.store.get_comment(id).await?;
    let parent = question_path(comment.question_id);

    if authorize_owner(&comment, &identity).is_err() {
        return Ok(flash::redirect_with(jar, Flash::CommentDeleteDenied, &parent));
    }

    ctx.store.delete_comment(id).await?;

    tracing::info!(
        comment_id = id,
        question_id = comment.question_id,
        "Comment deleted"
    );

    Ok(flash::redirect_with(jar, Flash::CommentDeleted, &parent))
}
