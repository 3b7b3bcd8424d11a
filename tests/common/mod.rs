#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use gratitudes_api::auth::{generate_jwt, Claims};
use gratitudes_api::config::AppConfig;
use gratitudes_api::database::{Gratitude, MemoryGratitudeStore};
use gratitudes_api::state::AppState;

pub const SECRET: &str = "integration-test-secret";
pub const USER_ID: i32 = 1;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryGratitudeStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::development();
        config.security.jwt_secret = SECRET.to_string();

        let store = Arc::new(MemoryGratitudeStore::new());
        let state = AppState::new(store.clone(), &config);
        Self {
            router: gratitudes_api::app(state, &config),
            store,
        }
    }

    pub async fn seeded(gratitudes: Vec<Gratitude>) -> Self {
        let app = Self::new();
        for gratitude in gratitudes {
            app.store.seed(gratitude).await;
        }
        app
    }

    /// Send a request as `USER_ID`
    pub async fn authed(&self, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse> {
        self.send(method, uri, Some(token_for(USER_ID)?), body).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<String>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("failed to read response body")?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };

        Ok(TestResponse { status, headers, body })
    }
}

pub fn token_for(user_id: i32) -> Result<String> {
    let claims = Claims::new(format!("user-{}", user_id), user_id, 1);
    Ok(generate_jwt(&claims, SECRET)?)
}

fn fixed_date(day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 12, day, 8, 0, 0).unwrap()
}

pub fn make_gratitudes_array() -> Vec<Gratitude> {
    vec![
        Gratitude {
            id: 1,
            thankful_for: "Christmas".to_string(),
            did_well: "I exercised...".to_string(),
            achieve: "???".to_string(),
            soc: String::new(),
            author_id: USER_ID,
            date_created: fixed_date(25),
        },
        Gratitude {
            id: 2,
            thankful_for: "Family".to_string(),
            did_well: "Cooked dinner".to_string(),
            achieve: "Read a chapter".to_string(),
            soc: "Called an old friend".to_string(),
            author_id: USER_ID,
            date_created: fixed_date(26),
        },
        Gratitude {
            id: 3,
            thankful_for: "Snow".to_string(),
            did_well: "Shoveled".to_string(),
            achieve: "Rest".to_string(),
            soc: String::new(),
            author_id: 2,
            date_created: fixed_date(27),
        },
    ]
}

pub fn make_malicious_gratitude() -> Gratitude {
    Gratitude {
        id: 911,
        thankful_for: r#"Naughty naughty very naughty <script>alert("xss");</script>"#.to_string(),
        did_well: "Hacks!".to_string(),
        achieve: r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#.to_string(),
        soc: String::new(),
        author_id: USER_ID,
        date_created: fixed_date(24),
    }
}

pub const SANITIZED_THANKFUL_FOR: &str =
    r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#;
pub const SANITIZED_ACHIEVE: &str =
    r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#;

/// Assert a serialized `make_malicious_gratitude` comes back in its escaped form
pub fn assert_sanitized(entry: &Value) {
    assert_eq!(entry["thankful_for"], SANITIZED_THANKFUL_FOR);
    assert_eq!(entry["did_well"], "Hacks!");
    assert_eq!(entry["achieve"], SANITIZED_ACHIEVE);
    assert_eq!(entry["soc"], "");
}
