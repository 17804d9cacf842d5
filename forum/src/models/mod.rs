pub mod comment;
pub mod question;
