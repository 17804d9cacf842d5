use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

pub const FLASH_COOKIE: &str = "flash";

/// One-shot notices carried to the next rendered page. The cookie holds the
/// key only, never the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flash {
    QuestionDeleted,
    QuestionEditDenied,
    QuestionDeleteDenied,
    CommentDeleted,
    CommentEditDenied,
    CommentDeleteDenied,
}

const ALL: [Flash; 6] = [
    Flash::QuestionDeleted,
    Flash::QuestionEditDenied,
    Flash::QuestionDeleteDenied,
    Flash::CommentDeleted,
    Flash::CommentEditDenied,
    Flash::CommentDeleteDenied,
];

impl Flash {
    pub fn key(&self) -> &'static str {
        match self {
            Flash::QuestionDeleted => "question_deleted",
            Flash::QuestionEditDenied => "question_edit_denied",
            Flash::QuestionDeleteDenied => "question_delete_denied",
            Flash::CommentDeleted => "comment_deleted",
            Flash::CommentEditDenied => "comment_edit_denied",
            Flash::CommentDeleteDenied => "comment_delete_denied",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Flash::QuestionDeleted => "The Question was deleted.",
            Flash::QuestionEditDenied => "You can't edit a question you don't own.",
            Flash::QuestionDeleteDenied => "You can't delete a question you don't own.",
            Flash::CommentDeleted => "The comment was deleted.",
            Flash::CommentEditDenied => "You can't edit a comment you didn't write.",
            Flash::CommentDeleteDenied => "You can't delete a comment you didn't write.",
        }
    }

    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            Flash::QuestionEditDenied
                | Flash::QuestionDeleteDenied
                | Flash::CommentEditDenied
                | Flash::CommentDeleteDenied
        )
    }
}

pub fn set(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.key()))
            .http_only(true)
            .path("/"),
    )
}

/// Sends the visitor to `to` with `flash` waiting there.
pub fn redirect_with(jar: CookieJar, flash: Flash, to: &str) -> Response {
    (set(jar, flash), Redirect::to(to)).into_response()
}

/// Reads the pending notice, if any, and clears it so it shows only once.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = match jar.get(FLASH_COOKIE) {
        Some(cookie) => Flash::from_key(cookie.value()),
        None => return (jar, None),
    };

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}
