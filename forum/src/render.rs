//! HTML rendering. Everything here is a pure function from data to markup;
//! user supplied text always passes through `escape_html` before it reaches
//! a template.

use std::collections::HashMap;

use axum::response::Html;
use chrono::NaiveDateTime;

use crate::{
    config::ServerConfig,
    flash::Flash,
    identity::models::identity::Identity,
    models::{comment::Comment, question::Question},
    utils::{escape_html, render_template},
    validation::FieldErrors,
};

const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");
const QUESTIONS_TEMPLATE: &str = include_str!("templates/questions.html");
const QUESTION_ROW_TEMPLATE: &str = include_str!("templates/question_row.html");
const QUESTION_TEMPLATE: &str = include_str!("templates/question.html");
const COMMENT_ITEM_TEMPLATE: &str = include_str!("templates/comment_item.html");
const QUESTION_FORM_TEMPLATE: &str = include_str!("templates/question_form.html");
const COMMENT_FORM_TEMPLATE: &str = include_str!("templates/comment_form.html");
const ERROR_TEMPLATE: &str = include_str!("templates/error.html");
const PAGE_TEMPLATE: &str = include_str!("templates/page.html");

const FALLBACK_SITE_NAME: &str = "Forum";

pub fn page(
    config: &ServerConfig,
    viewer: Option<&Identity>,
    title: &str,
    flash: Option<Flash>,
    body: &str,
) -> Html<String> {
    let nav = match viewer {
        Some(identity) => format!(
            "<span class=\"viewer\">{}</span>\
             <form method=\"post\" action=\"/logout\"><button type=\"submit\">Log out</button></form>",
            escape_html(&identity.display_name())
        ),
        None => format!(
            "<a href=\"{}\">Log in</a>",
            escape_html(&config.login_url)
        ),
    };

    Html(layout(&config.site_name, title, &nav, flash, body))
}

fn layout(site_name: &str, title: &str, nav: &str, flash: Option<Flash>, body: &str) -> String {
    let flash = match flash {
        Some(f) => format!(
            "<p class=\"flash {}\" role=\"status\">{}</p>",
            if f.is_denial() { "flash-denied" } else { "flash-info" },
            escape_html(f.message())
        ),
        None => String::new(),
    };

    render_template(
        LAYOUT_TEMPLATE,
        &[
            ("{{title}}", &escape_html(title)),
            ("{{site_name}}", &escape_html(site_name)),
            ("{{nav}}", nav),
            ("{{flash}}", &flash),
            ("{{body}}", body),
        ],
    )
}

fn timestamp(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn author(names: &HashMap<i32, String>, id: i32) -> String {
    escape_html(
        &names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("user #{id}")),
    )
}

fn multiline(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

fn errors_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape_html(e)))
        .collect();
    format!("<ul class=\"errors\">{items}</ul>")
}

pub fn question_list(questions: &[Question], names: &HashMap<i32, String>) -> String {
    let rows: String = if questions.is_empty() {
        "<p>No questions yet.</p>".into()
    } else {
        questions
            .iter()
            .map(|q| {
                render_template(
                    QUESTION_ROW_TEMPLATE,
                    &[
                        ("{{id}}", &q.id.to_string()),
                        ("{{subject}}", &escape_html(&q.subject)),
                        ("{{author}}", &author(names, q.author_id)),
                        ("{{modified_at}}", &timestamp(&q.modified_at)),
                    ],
                )
            })
            .collect()
    };

    render_template(QUESTIONS_TEMPLATE, &[("{{rows}}", &rows)])
}

pub fn question_detail(
    question: &Question,
    comments: &[Comment],
    names: &HashMap<i32, String>,
    viewer: &Identity,
) -> String {
    let owner_actions = if question.author_id == viewer.id {
        format!(
            "<p class=\"actions\"><a href=\"/question/edit/{id}\">Edit</a> \
             <a href=\"/question/delete/{id}\">Delete</a></p>",
            id = question.id
        )
    } else {
        String::new()
    };

    let comments: String = if comments.is_empty() {
        "<p>No comments yet.</p>".into()
    } else {
        comments
            .iter()
            .map(|c| {
                let actions = if c.author_id == viewer.id {
                    format!(
                        "<p class=\"actions\"><a href=\"/comment/edit/{id}\">Edit</a> \
                         <a href=\"/comment/delete/{id}\">Delete</a></p>",
                        id = c.id
                    )
                } else {
                    String::new()
                };

                render_template(
                    COMMENT_ITEM_TEMPLATE,
                    &[
                        ("{{id}}", &c.id.to_string()),
                        ("{{author}}", &author(names, c.author_id)),
                        ("{{modified_at}}", &timestamp(&c.modified_at)),
                        ("{{content}}", &multiline(&c.content)),
                        ("{{owner_actions}}", &actions),
                    ],
                )
            })
            .collect()
    };

    render_template(
        QUESTION_TEMPLATE,
        &[
            ("{{id}}", &question.id.to_string()),
            ("{{subject}}", &escape_html(&question.subject)),
            ("{{author}}", &author(names, question.author_id)),
            ("{{modified_at}}", &timestamp(&question.modified_at)),
            ("{{owner_actions}}", &owner_actions),
            ("{{content}}", &multiline(&question.content)),
            ("{{comments}}", &comments),
        ],
    )
}

pub fn question_form(
    heading: &str,
    action: &str,
    subject: &str,
    content: &str,
    errors: &FieldErrors,
) -> String {
    render_template(
        QUESTION_FORM_TEMPLATE,
        &[
            ("{{heading}}", &escape_html(heading)),
            ("{{action}}", &escape_html(action)),
            ("{{subject}}", &escape_html(subject)),
            ("{{subject_errors}}", &errors_list(errors.for_field("subject"))),
            ("{{content}}", &escape_html(content)),
            ("{{content_errors}}", &errors_list(errors.for_field("content"))),
        ],
    )
}

pub fn comment_form(
    heading: &str,
    action: &str,
    question: &Question,
    content: &str,
    errors: &FieldErrors,
) -> String {
    render_template(
        COMMENT_FORM_TEMPLATE,
        &[
            ("{{question_id}}", &question.id.to_string()),
            ("{{question_subject}}", &escape_html(&question.subject)),
            ("{{question_content}}", &multiline(&question.content)),
            ("{{heading}}", &escape_html(heading)),
            ("{{action}}", &escape_html(action)),
            ("{{content}}", &escape_html(content)),
            ("{{content_errors}}", &errors_list(errors.for_field("content"))),
        ],
    )
}

/// A complete document for error responses, which are built without access
/// to the app state.
pub fn error_page(heading: &str, message: &str, debug_info: Option<&str>) -> String {
    let debug_info = match debug_info {
        Some(info) => format!("<pre class=\"debug\">{}</pre>", escape_html(info)),
        None => String::new(),
    };

    let body = render_template(
        ERROR_TEMPLATE,
        &[
            ("{{heading}}", &escape_html(heading)),
            ("{{message}}", &escape_html(message)),
            ("{{debug_info}}", &debug_info),
        ],
    );

    layout(FALLBACK_SITE_NAME, heading, "", None, &body)
}

/// Static content: paragraphs of plain text plus (href, label) links.
pub fn static_page_body(heading: &str, paragraphs: &[&str], links: &[(&str, &str)]) -> String {
    let paragraphs: String = paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", escape_html(p)))
        .collect();

    let links = if links.is_empty() {
        String::new()
    } else {
        let items: String = links
            .iter()
            .map(|(href, label)| {
                format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    escape_html(href),
                    escape_html(label)
                )
            })
            .collect();
        format!("<ul class=\"links\">{items}</ul>")
    };

    render_template(
        PAGE_TEMPLATE,
        &[
            ("{{heading}}", &escape_html(heading)),
            ("{{paragraphs}}", &paragraphs),
            ("{{links}}", &links),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::models::identity::Traits;

    fn question(author_id: i32) -> Question {
        Question {
            id: 5,
            subject: "<b>Budgeting</b> 101".into(),
            content: "line one\nline two".into(),
            author_id,
            modified_at: chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn detail_escapes_user_text_and_shows_owner_links_to_the_author_only() {
        let names = HashMap::from([(1, "Ada".to_string())]);
        let author = Identity::new_with_traits(1, Traits::default());
        let other = Identity::new_with_traits(2, Traits::default());

        let html = question_detail(&question(1), &[], &names, &author);
        assert!(html.contains("&lt;b&gt;Budgeting&lt;/b&gt; 101"));
        assert!(html.contains("line one<br>line two"));
        assert!(html.contains("2024-03-01 09:30 UTC"));
        assert!(html.contains("/question/edit/5"));

        let html = question_detail(&question(1), &[], &names, &other);
        assert!(!html.contains("/question/edit/5"));
        assert!(html.contains("/comment/new/5"));
    }

    #[test]
    fn form_shows_field_errors_next_to_fields() {
        #[derive(validator::Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "Subject is required"))]
            subject: String,
        }

        let errors: FieldErrors = validator::Validate::validate(&Probe {
            subject: String::new(),
        })
        .unwrap_err()
        .into();

        let html = question_form("Ask", "/question/new", "", "body", &errors);
        assert!(html.contains("<li>Subject is required</li>"));
        assert!(html.contains(">body</textarea>"));
    }

    #[test]
    fn unknown_authors_get_a_placeholder_name() {
        let html = question_list(&[question(9)], &HashMap::new());
        assert!(html.contains("user #9"));
        assert!(html.contains("href=\"/question/5\""));
    }
}
