//! In-memory repository implementation.

use std::collections::BTreeMap;
#[cfg(test)]
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Customer, CustomerFields};

use super::{CustomerRepository, DbError};

/// In-memory storage backend for development and testing.
///
/// Rows live in a `BTreeMap` keyed by id, so listing is ascending without a
/// sort. Ids come from a counter and are never handed out twice, even after a
/// delete. Data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    table: Arc<RwLock<Table>>,
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, Customer>,
    last_id: i32,
    #[cfg(test)]
    failing_ids: HashSet<i32>,
}

impl Table {
    fn next_id(&mut self) -> Result<i32, DbError> {
        let id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| DbError::Storage("customer id sequence exhausted".into()))?;
        self.last_id = id;
        Ok(id)
    }

    #[cfg(test)]
    fn check_writable(&self, id: i32) -> Result<(), DbError> {
        if self.failing_ids.contains(&id) {
            return Err(DbError::Storage(format!("injected write failure for id {}", id)));
        }
        Ok(())
    }

    #[cfg(not(test))]
    fn check_writable(&self, _id: i32) -> Result<(), DbError> {
        Ok(())
    }
}

impl InMemoryCustomerRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write to `id` fail with a storage error.
    #[cfg(test)]
    pub(crate) async fn fail_writes_for(&self, id: i32) {
        self.table.write().await.failing_ids.insert(id);
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Customer>, DbError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Customer, DbError> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::customer_not_found(id))
    }

    async fn create(&self, fields: CustomerFields) -> Result<Customer, DbError> {
        let mut table = self.table.write().await;
        let id = table.next_id()?;
        let customer = fields.with_id(id);
        table.rows.insert(id, customer.clone());
        Ok(customer)
    }

    async fn update(&self, id: i32, fields: CustomerFields) -> Result<Customer, DbError> {
        let mut table = self.table.write().await;
        table.check_writable(id)?;

        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DbError::customer_not_found(id))?;
        *row = fields.with_id(id);
        Ok(row.clone())
    }

    async fn update_batch(&self, customers: &[Customer]) -> Result<u64, DbError> {
        let mut table = self.table.write().await;

        // Apply to a staged copy; it only replaces the table if every row succeeds
        let mut staged = table.rows.clone();
        let mut updated = 0;
        for customer in customers {
            table.check_writable(customer.id).map_err(|e| DbError::BatchItem {
                id: customer.id,
                source: Box::new(e),
            })?;

            if let Some(row) = staged.get_mut(&customer.id) {
                *row = customer.clone();
                updated += 1;
            }
        }

        table.rows = staged;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let mut table = self.table.write().await;
        table.check_writable(id)?;

        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::customer_not_found(id))
    }
}
