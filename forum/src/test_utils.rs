use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use tower::ServiceExt;

use crate::{
    App,
    config::{Env, ServerConfig, StoreKind},
    identity::{
        COOKIE_NAME,
        models::identity::{Identity, Traits},
    },
    routes,
    store::MemoryStore,
};

pub fn test_config() -> ServerConfig {
    ServerConfig {
        env: Env::Dev,
        store: StoreKind::Memory,
        bind_address: "127.0.0.1:0".into(),
        site_name: "Test Forum".into(),
        login_url: "/login".into(),
        database_max_connections: 1,
        run_migrations: false,
        dev_session_token: None,
    }
}

/// A forum over an in-memory store with three logged in identities.
pub struct TestForum {
    pub store: Arc<MemoryStore>,
    pub router: Router,
    pub u1: Identity,
    pub u2: Identity,
    pub u3: Identity,
}

pub const U1: &str = "u1-token";
pub const U2: &str = "u2-token";
pub const U3: &str = "u3-token";

impl TestForum {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());

        let mut users = vec![];
        for (token, name) in [(U1, "Una"), (U2, "Ugo"), (U3, "Uma")] {
            let identity = store
                .add_identity(Traits {
                    email: None,
                    name: Some(name.into()),
                })
                .await;
            store.add_session(token, identity.id).await;
            users.push(identity);
        }
        let u3 = users.remove(2);
        let u2 = users.remove(1);
        let u1 = users.remove(0);

        let app = App {
            config: Arc::new(test_config()),
            store: store.clone(),
            sessions: store.clone(),
        };

        TestForum {
            store,
            router: routes::router(app),
            u1,
            u2,
            u3,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, &[], None).await
    }

    pub async fn get_with_cookie(&self, uri: &str, token: &str, cookie: &str) -> TestResponse {
        self.send(Method::GET, uri, Some(token), &[], Some(cookie))
            .await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
    ) -> TestResponse {
        self.send(Method::POST, uri, token, fields, None).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
        extra_cookie: Option<&str>,
    ) -> TestResponse {
        let mut cookies = vec![];
        if let Some(token) = token {
            cookies.push(format!("{COOKIE_NAME}={token}"));
        }
        if let Some(cookie) = extra_cookie {
            cookies.push(cookie.to_string());
        }

        let mut builder = Request::builder().method(method.clone()).uri(uri);
        if !cookies.is_empty() {
            builder = builder.header(header::COOKIE, cookies.join("; "));
        }

        let request = if method == Method::POST {
            builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form_body(fields)))
                .unwrap()
        } else {
            builder.body(Body::empty()).unwrap()
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

fn form_body(fields: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The `name=value` pair this response sets for cookie `name`, if any.
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .find(|pair| pair.starts_with(&format!("{name}=")))
            .map(str::to_owned)
    }
}
