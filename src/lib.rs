//! Shop inventory web application
//!
//! Server-rendered pages for managing categories and the items filed under
//! them, backed by a SeaORM database.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod seed;
pub mod services;
pub mod tracing;
pub mod views;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    response::Redirect,
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use handlers::{categories, common, health, items};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub categories: services::CategoryService,
    pub items: services::ItemService,
}

impl AppState {
    /// Builds the services around one shared connection pool.
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        Self {
            categories: services::CategoryService::new(db.clone()),
            items: services::ItemService::new(db.clone()),
            db,
            config,
        }
    }
}

/// Page routes under `/shop`
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(items::index))
        // Categories
        .route("/categories", get(categories::category_list))
        .route(
            "/category/create",
            get(categories::category_create_get).post(categories::category_create_post),
        )
        .route("/category/:id", get(categories::category_detail))
        .route(
            "/category/:id/delete",
            get(categories::category_delete_get).post(categories::category_delete_post),
        )
        .route(
            "/category/:id/update",
            get(categories::category_update_get).post(categories::category_update_post),
        )
        // Items
        .route("/items", get(items::item_list))
        .route(
            "/item/create",
            get(items::item_create_get).post(items::item_create_post),
        )
        .route("/item/:id", get(items::item_detail))
        .route(
            "/item/:id/delete",
            get(items::item_delete_get).post(items::item_delete_post),
        )
        .route(
            "/item/:id/update",
            get(items::item_update_get).post(items::item_update_post),
        )
}

/// Full application router with middleware installed.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/shop") }))
        .route("/health", get(health::health))
        .nest("/shop", shop_routes())
        .fallback(common::not_found)
        // Development error pages carry the failure detail
        .layer(from_fn_with_state(
            state.clone(),
            middleware_helpers::expose_error_details,
        ))
        // HTTP tracing layer for consistent request/response telemetry
        .layer(tracing::configure_http_tracing())
        // Ensure every request carries a request id for traceability
        .layer(from_fn(middleware_helpers::request_id_middleware))
        .with_state(state)
}
