use async_trait::async_trait;
use axum::{http::StatusCode, routing::get, Json, Router};
use posts_service::config::{AppConfig, MongoConfig, QuoteApiConfig};
use posts_service::models::{Post, PostDocument};
use posts_service::services::{generate_post_id, PostStore, QuoteClient};
use posts_service::startup::Application;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    /// Spawn the app with an in-memory store and a healthy quote upstream.
    pub async fn spawn() -> Self {
        let upstream =
            spawn_quote_upstream(StatusCode::OK, serde_json::json!({ "affirmation": "Keep going" }))
                .await;
        Self::spawn_with_store(Arc::new(InMemoryStore::default()), upstream).await
    }

    /// Spawn the app around an injected store double and quote upstream URL.
    pub async fn spawn_with_store(store: Arc<dyn PostStore>, quote_url: String) -> Self {
        let config = AppConfig {
            port: 0, // random port for testing
            mongodb: MongoConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "posts_test".to_string(),
            },
            quote_api: QuoteApiConfig {
                url: quote_url.clone(),
            },
        };

        let app = Application::with_dependencies(config, store, QuoteClient::new(quote_url))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address }
    }
}

/// Stand-in for the hosted document store, keyed the same way (string id to
/// open field map).
#[derive(Default)]
pub struct InMemoryStore {
    posts: Mutex<BTreeMap<String, PostDocument>>,
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn list(&self) -> anyhow::Result<Vec<Post>> {
        let posts = self.posts.lock().unwrap();
        Ok(posts
            .iter()
            .map(|(id, fields)| Post {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect())
    }

    async fn create(&self, fields: PostDocument) -> anyhow::Result<String> {
        let id = generate_post_id();
        self.posts.lock().unwrap().insert(id.clone(), fields);
        Ok(id)
    }

    async fn replace(&self, id: &str, fields: PostDocument) -> anyhow::Result<()> {
        self.posts.lock().unwrap().insert(id.to_string(), fields);
        Ok(())
    }

    async fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.posts.lock().unwrap().remove(id);
        Ok(())
    }
}

/// Store double whose every operation fails, for exercising the 500 paths.
pub struct FailingStore;

#[async_trait]
impl PostStore for FailingStore {
    async fn list(&self) -> anyhow::Result<Vec<Post>> {
        anyhow::bail!("store unavailable")
    }

    async fn create(&self, _fields: PostDocument) -> anyhow::Result<String> {
        anyhow::bail!("store unavailable")
    }

    async fn replace(&self, _id: &str, _fields: PostDocument) -> anyhow::Result<()> {
        anyhow::bail!("store unavailable")
    }

    async fn delete(&self, _id: &str) -> anyhow::Result<()> {
        anyhow::bail!("store unavailable")
    }
}

/// Spawn a one-route double of the quote service returning the given status
/// and body, and hand back its base URL.
pub async fn spawn_quote_upstream(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        "/",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind quote upstream listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{}", addr)
}

/// A base URL nothing is listening on, for connection-failure tests.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
