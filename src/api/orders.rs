use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::error::{ApiError, ErrorBody};
use super::schemas::{OrderIn, OrderOut};
use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/", get(list_orders).post(create_order))
        .route("/orders/{id}", get(get_order))
}

/// The customer is not checked before the insert; an unknown customer
/// fails on the foreign key and is reported as a storage failure.
#[utoipa::path(
    post,
    path = "/api/v1/orders/",
    request_body = OrderIn,
    responses(
        (status = 201, description = "Order created", body = OrderOut),
        (status = 422, description = "Body does not match OrderIn", body = ErrorBody),
        (status = 500, description = "Unknown customer or storage failure", body = ErrorBody)
    ),
    tag = "orders",
    operation_id = "createOrder"
)]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderIn>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderOut>), ApiError> {
    let Json(body) = payload?;
    let order = state.orders.create(&body.description, &body.customer).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/",
    responses(
        (status = 200, description = "Every order", body = [OrderOut]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag = "orders",
    operation_id = "listOrders"
)]
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderOut>>, ApiError> {
    let orders = state.orders.get_all().await?;
    Ok(Json(orders.into_iter().map(OrderOut::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = String, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = OrderOut),
        (status = 404, description = "No such order", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag = "orders",
    operation_id = "getOrder"
)]
pub async fn get_order(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<OrderOut>, ApiError> {
    let Path(id) = path?;
    let order = state.orders.get(&id).await?;
    Ok(Json(order.into()))
}
