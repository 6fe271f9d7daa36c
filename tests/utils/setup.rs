use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use spymasters::{
    db, router, AppState, InMemoryMatchRepository, MatchRepository, SqliteMatchRepository,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
}

pub struct TestSetupBuilder {
    use_sqlite: bool,
    history_limit: u32,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            use_sqlite: false,
            history_limit: 10,
        }
    }

    /// Backs the app with a private in-memory SQLite database
    pub fn with_sqlite(mut self) -> Self {
        self.use_sqlite = true;
        self
    }

    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    pub async fn build(self) -> TestSetup {
        let repository: Arc<dyn MatchRepository + Send + Sync> = if self.use_sqlite {
            let pool = db::connect_and_migrate("sqlite::memory:")
                .await
                .expect("in-memory database should open");
            Arc::new(SqliteMatchRepository::new(pool))
        } else {
            Arc::new(InMemoryMatchRepository::new())
        };

        TestSetup {
            app: router(AppState::new(repository, self.history_limit)),
        }
    }
}

#[allow(dead_code)]
impl TestSetup {
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    /// Records a match and returns its id, panicking if the request fails
    pub async fn record(&self, body: Value) -> i64 {
        let (status, json) = self.send("POST", "/api/spymasters", Some(body)).await;
        assert_eq!(status, StatusCode::OK, "record failed: {}", json);
        json["match"]["id"].as_i64().expect("response should carry an id")
    }
}
