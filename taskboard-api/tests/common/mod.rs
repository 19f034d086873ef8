/// Common test utilities for the database-backed integration tests
///
/// Provides a TestContext that connects to the database named by
/// `DATABASE_URL`, runs migrations, builds the router, and offers request
/// helpers for driving the full HTTP surface in-process.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_shared::db::migrations::run_migrations;
use tower::ServiceExt;
use uuid::Uuid;

/// Test context holding the app under test
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;
        run_migrations(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext { db, app, config })
    }

    /// Sends a JSON request, returning the status and parsed body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, parsed)
    }

    /// Registers a fresh user and returns (token, email)
    ///
    /// Emails are salted with a UUID so repeated runs never collide.
    pub async fn register_user(&self, name: &str) -> anyhow::Result<(String, String)> {
        let email = format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4());

        let (status, body) = self
            .request(
                "POST",
                "/auth/register",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": "integration-test-password",
                })),
            )
            .await;

        anyhow::ensure!(status == StatusCode::OK, "register failed: {}", body);

        let token = body["token"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("no token in register response"))?
            .to_string();

        Ok((token, email))
    }

    /// Creates a task for the given token and returns its id
    pub async fn create_task(&self, token: &str, title: &str) -> anyhow::Result<String> {
        let (status, body) = self
            .request(
                "POST",
                "/tasks",
                Some(token),
                Some(serde_json::json!({ "title": title })),
            )
            .await;

        anyhow::ensure!(status == StatusCode::OK, "create task failed: {}", body);

        body["id"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("no id in task response"))
    }
}
