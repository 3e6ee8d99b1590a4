#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use shop_inventory::{
    config::AppConfig,
    db,
    entities::{category, item},
    forms::{CategoryInput, ItemInput},
    AppState,
};
use tower::ServiceExt;
use uuid::Uuid;

/// Helper harness for spinning up the application backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        Self::with_environment("test").await
    }

    pub async fn with_environment(environment: &str) -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            3000,
            environment.to_string(),
        );
        // One connection: every pooled connection would get its own memory database
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = shop_inventory::app(state.clone());
        Self { router, state }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    /// POSTs `fields` as an urlencoded form.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter().copied())
            .finish();
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    pub async fn create_category(&self, name: &str, description: &str) -> category::Model {
        self.state
            .categories
            .insert(CategoryInput {
                name: name.to_string(),
                description: description.to_string(),
            })
            .await
            .expect("failed to insert category")
    }

    pub async fn create_item(
        &self,
        name: &str,
        category_id: Uuid,
        price: Decimal,
        stock: i32,
    ) -> item::Model {
        self.state
            .items
            .insert(ItemInput {
                name: name.to_string(),
                description: format!("{} description", name),
                price,
                stock,
                category_id,
            })
            .await
            .expect("failed to insert item")
    }
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not utf-8")
}

/// Location of a 303 redirect.
pub fn location(response: &Response<Body>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect without location")
        .to_str()
        .expect("location is not ascii")
        .to_string()
}

/// Id at the end of a detail-page location such as `/shop/item/<id>`.
pub fn id_from_location(location: &str) -> Uuid {
    let raw = location.rsplit('/').next().expect("empty location");
    Uuid::parse_str(raw).expect("location does not end in an id")
}
