use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::error::{ApiError, ErrorBody};
use super::schemas::{OrderOut, UserIn, UserOut};
use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/users/{id}/orders", get(list_user_orders))
        .route("/users/{id}/orders/{order_id}", get(get_user_order))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/",
    request_body = UserIn,
    responses(
        (status = 201, description = "User created", body = UserOut),
        (status = 422, description = "Body does not match UserIn", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag = "users",
    operation_id = "createUser"
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserIn>, JsonRejection>,
) -> Result<(StatusCode, Json<UserOut>), ApiError> {
    let Json(body) = payload?;
    let user = state.users.create(&body.name, &body.surname).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/",
    responses(
        (status = 200, description = "Every user in insertion order", body = [UserOut]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag = "users",
    operation_id = "listUsers"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserOut>>, ApiError> {
    let users = state.users.get_all().await?;
    Ok(Json(users.into_iter().map(UserOut::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserOut),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag = "users",
    operation_id = "getUser"
)]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<UserOut>, ApiError> {
    let Path(id) = path?;
    let user = state.users.get(&id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    request_body = UserIn,
    responses(
        (status = 200, description = "The updated user", body = UserOut),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 422, description = "Body does not match UserIn", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag = "users",
    operation_id = "updateUser"
)]
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UserIn>, JsonRejection>,
) -> Result<Json<UserOut>, ApiError> {
    let Path(id) = path?;
    let Json(body) = payload?;
    let user = state.users.update(&id, &body.name, &body.surname).await?;
    Ok(Json(user.into()))
}

/// Always answers `true`, whether or not the user existed.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Delete committed", body = bool),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag = "users",
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<bool>, ApiError> {
    let Path(id) = path?;
    Ok(Json(state.users.delete(&id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/orders",
    params(("id" = String, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Orders placed by the user", body = [OrderOut]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag = "users",
    operation_id = "listUserOrders"
)]
pub async fn list_user_orders(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<OrderOut>>, ApiError> {
    let Path(id) = path?;
    let orders = state.orders.get_all_by_customer(&id).await?;
    Ok(Json(orders.into_iter().map(OrderOut::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/orders/{order_id}",
    params(
        ("id" = String, Path, description = "Customer id"),
        ("order_id" = String, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "The order", body = OrderOut),
        (status = 404, description = "No such order for this user", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag = "users",
    operation_id = "getUserOrder"
)]
pub async fn get_user_order(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<OrderOut>, ApiError> {
    let Path((id, order_id)) = path?;
    let order = state.orders.get_by_customer_and_id(&id, &order_id).await?;
    Ok(Json(order.into()))
}
