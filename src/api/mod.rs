//! HTTP routing and request/response mapping.
//!
//! Every route is mounted under [`API_PREFIX`]:
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | POST | /users/ | create a user |
//! | GET | /users/ | list users |
//! | GET | /users/{id} | fetch a user |
//! | PUT | /users/{id} | replace name and surname |
//! | DELETE | /users/{id} | delete a user |
//! | GET | /users/{id}/orders | list the user's orders |
//! | GET | /users/{id}/orders/{order_id} | fetch one of the user's orders |
//! | POST | /orders/ | create an order |
//! | GET | /orders/ | list orders |
//! | GET | /orders/{id} | fetch an order |
//! | GET | /health | database round trip |
//! | GET | /openapi.json | OpenAPI document for the routes above |

pub mod doc;
pub mod error;
pub mod orders;
pub mod schemas;
pub mod users;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use self::doc::ApiDoc;
use crate::repositories::{OrderRepository, UserRepository};
use crate::Database;

pub use error::ApiError;

pub const API_PREFIX: &str = "/api/v1";

/// Shared handler state. Cloning shares the underlying pool.
#[derive(Clone, Debug)]
pub struct AppState {
    pub database: Database,
    pub users: UserRepository,
    pub orders: OrderRepository,
}

impl AppState {
    pub fn new(database: Database) -> Self {
        Self {
            users: UserRepository::new(database.clone()),
            orders: OrderRepository::new(database.clone()),
            database,
        }
    }
}

/// Builds the application router with every route under [`API_PREFIX`].
pub fn build_router(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi))
        .merge(users::router())
        .merge(orders::router());

    Router::new()
        .nest(API_PREFIX, api_v1)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.database.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
