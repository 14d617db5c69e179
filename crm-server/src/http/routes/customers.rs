//! Customer endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{CustomerId, JsonBody};
use crate::models::Customer;
use crate::state::AppState;

pub const COLLECTION_PATH: &str = "/customers";
pub const BATCH_PATH: &str = "/customers/batch";
pub const ITEM_PATH: &str = "/customers/{id}";

/// Batch update response
#[derive(Debug, Serialize)]
pub struct BatchUpdateResponse {
    pub result: &'static str,
    pub customers_updated: u64,
}

/// Delete confirmation
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub result: String,
}

/// GET /customers - every customer, ascending by id
async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = state.customers().list().await?;
    Ok(Json(customers))
}

/// GET /customers/{id}
async fn get_customer(
    State(state): State<AppState>,
    CustomerId(id): CustomerId,
) -> Result<Json<Customer>, ApiError> {
    tracing::debug!(id, "fetching customer");
    let customer = state.customers().get(id).await?;
    Ok(Json(customer))
}

/// POST /customers - the body's `id` is ignored; the store assigns one
async fn add_customer(
    State(state): State<AppState>,
    JsonBody(customer): JsonBody<Customer>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = state.customers().create(customer.into_fields()).await?;
    tracing::info!(id = customer.id, "customer created");

    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /customers/batch - overwrite many customers in one transaction
async fn update_customers_batch(
    State(state): State<AppState>,
    JsonBody(customers): JsonBody<Vec<Customer>>,
) -> Result<Json<BatchUpdateResponse>, ApiError> {
    tracing::debug!(submitted = customers.len(), "batch update");
    let updated = state.customers().update_batch(&customers).await?;
    tracing::info!(submitted = customers.len(), updated, "batch update committed");

    Ok(Json(BatchUpdateResponse {
        result: "Batch update completed",
        customers_updated: updated,
    }))
}

/// PUT /customers/{id} - full replacement; the path id wins over the body's
async fn update_customer(
    State(state): State<AppState>,
    CustomerId(id): CustomerId,
    JsonBody(customer): JsonBody<Customer>,
) -> Result<Json<Customer>, ApiError> {
    tracing::debug!(id, "updating customer");
    let customer = state.customers().update(id, customer.into_fields()).await?;
    Ok(Json(customer))
}

/// DELETE /customers/{id}
async fn delete_customer(
    State(state): State<AppState>,
    CustomerId(id): CustomerId,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.customers().delete(id).await?;
    tracing::info!(id, "customer deleted");

    Ok(Json(DeleteResponse {
        result: format!("Customer {} deleted", id),
    }))
}

/// Customer routes. The literal batch path goes in ahead of the `{id}` capture.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(COLLECTION_PATH, get(list_customers).post(add_customer))
        .route(BATCH_PATH, put(update_customers_batch))
        .route(
            ITEM_PATH,
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}
