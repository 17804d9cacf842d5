use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_extra::extract::CookieJar;

use crate::{App, flash, identity::MaybeAuthUser, render};

pub struct StaticPage {
    pub path: &'static str,
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
    pub links: &'static [(&'static str, &'static str)],
}

const LESSON_LINKS: &[(&str, &str)] = &[
    ("/lessonMaking", "Making money"),
    ("/lessonSpending", "Spending"),
    ("/lessonBudgeting", "Budgeting"),
    ("/lessonSaving", "Saving"),
    ("/lessonInvesting", "Investing"),
    ("/lessonBorrowing", "Borrowing"),
    ("/lessonProtect", "Protecting your money"),
];

const BACK_TO_COURSES: &[(&str, &str)] = &[
    ("/courses", "All lessons"),
    ("/questions", "Ask the forum"),
];

pub const PAGES: &[StaticPage] = &[
    StaticPage {
        path: "/",
        title: "Welcome",
        paragraphs: &[
            "Learn how money works, one lesson at a time, and ask the community when you get stuck.",
        ],
        links: &[
            ("/courses", "Browse the lessons"),
            ("/questions", "Read the forum"),
        ],
    },
    StaticPage {
        path: "/aboutus",
        title: "About us",
        paragraphs: &[
            "We are a small group of volunteers who believe financial literacy should be free.",
        ],
        links: &[],
    },
    StaticPage {
        path: "/courses",
        title: "Courses",
        paragraphs: &["Seven short lessons covering the basics of personal finance."],
        links: LESSON_LINKS,
    },
    StaticPage {
        path: "/lessonMaking",
        title: "Making money",
        paragraphs: &[
            "Income comes from work, from what you own, and from what you build.",
            "Understand your gross and net pay before you plan anything else.",
        ],
        links: BACK_TO_COURSES,
    },
    StaticPage {
        path: "/lessonSpending",
        title: "Spending",
        paragraphs: &[
            "Separate needs from wants and notice where small purchases add up.",
        ],
        links: BACK_TO_COURSES,
    },
    StaticPage {
        path: "/lessonBudgeting",
        title: "Budgeting",
        paragraphs: &[
            "A budget is a plan for every unit of income before the month begins.",
            "Track what you actually spend and adjust the plan, not the records.",
        ],
        links: BACK_TO_COURSES,
    },
    StaticPage {
        path: "/lessonSaving",
        title: "Saving",
        paragraphs: &[
            "Pay yourself first and keep an emergency fund before long term goals.",
        ],
        links: BACK_TO_COURSES,
    },
    StaticPage {
        path: "/lessonInvesting",
        title: "Investing",
        paragraphs: &[
            "Investing trades certainty for growth; diversification limits the damage of any single loss.",
        ],
        links: BACK_TO_COURSES,
    },
    StaticPage {
        path: "/lessonBorrowing",
        title: "Borrowing",
        paragraphs: &[
            "Credit costs interest. Compare the total repaid, not the monthly payment.",
        ],
        links: BACK_TO_COURSES,
    },
    StaticPage {
        path: "/lessonProtect",
        title: "Protecting your money",
        paragraphs: &[
            "Insurance, strong passwords and a healthy suspicion of offers that sound too good.",
        ],
        links: BACK_TO_COURSES,
    },
    StaticPage {
        path: "/terms",
        title: "Terms",
        paragraphs: &[
            "Content on this site is for education only and is not financial advice.",
            "Be kind in the forum. Posts may be removed by their authors at any time.",
        ],
        links: &[],
    },
];

pub fn route() -> Router<App> {
    PAGES.iter().fold(Router::<App>::new(), |router, page| {
        router.route(
            page.path,
            get(
                move |State(ctx): State<App>, MaybeAuthUser(viewer): MaybeAuthUser, jar: CookieJar| async move {
                    let (jar, flash) = flash::take(jar);
                    let body = render::static_page_body(page.title, page.paragraphs, page.links);
                    (
                        jar,
                        render::page(&ctx.config, viewer.as_ref().ok(), page.title, flash, &body),
                    )
                        .into_response()
                },
            ),
        )
    })
}
