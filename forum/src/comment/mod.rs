pub mod create;
pub mod delete;
pub mod edit;
pub mod routes;

use serde::Deserialize;
use validator::Validate;

use crate::validation::{FieldErrors, blank_as_empty};

#[derive(Deserialize, Validate, Debug, Default, Clone)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Comment must be 1 to 5000 characters"))]
    pub content: String,
}

impl CommentForm {
    pub fn check(&self) -> Result<(), FieldErrors> {
        CommentForm {
            content: blank_as_empty(&self.content).to_owned(),
        }
        .validate()
        .map_err(FieldErrors::from)
    }
}
