//! Application state shared across handlers

use std::sync::Arc;

use crate::db::CustomerRepository;

/// Shared application state
///
/// Built once by the caller and handed to the router; handlers reach storage
/// only through it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    customers: Box<dyn CustomerRepository>,
}

impl AppState {
    pub fn new(customers: impl CustomerRepository + 'static) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                customers: Box::new(customers),
            }),
        }
    }

    pub fn customers(&self) -> &dyn CustomerRepository {
        self.inner.customers.as_ref()
    }
}
