//! Route handlers organized by resource
//!
//! # Resolution order
//!
//! [`ROUTE_TABLE`] lists every route in the order it is resolved. At a given
//! path depth a literal segment always wins over a `{capture}`, so
//! `PUT /customers/batch` reaches the batch handler and is never read as an
//! update of customer `"batch"`. The literal route is also registered first.
//! A path that matches but lacks the method answers 405; it does not fall
//! through to a capture route.

use axum::Router;

use crate::state::AppState;

pub mod customers;
pub mod home;

/// `(method, path)` for every route, in resolution order.
pub const ROUTE_TABLE: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", customers::COLLECTION_PATH),
    ("POST", customers::COLLECTION_PATH),
    ("PUT", customers::BATCH_PATH),
    ("GET", customers::ITEM_PATH),
    ("PUT", customers::ITEM_PATH),
    ("DELETE", customers::ITEM_PATH),
];

/// All routes, before state is attached
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .merge(customers::router())
}
