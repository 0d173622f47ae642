use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rocksdb::{ColumnFamilyDescriptor, DB, IteratorMode, Options};
use uuid::Uuid;

use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::{OrderStore, UserStore};
use crate::domain::user::User;
use crate::error::{OrderError, Result};

/// Column Family for order documents.
pub const CF_ORDERS: &str = "orders";
/// Column Family for user records.
pub const CF_USERS: &str = "users";

/// A persistent document store backed by RocksDB.
///
/// Orders and users live in separate column families, one JSON document per
/// record keyed by id. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_orders = ColumnFamilyDescriptor::new(CF_ORDERS, Options::default());
        let cf_users = ColumnFamilyDescriptor::new(CF_USERS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_orders, cf_users])
            .map_err(|e| OrderError::Persistence(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| OrderError::Persistence(format!("{name} column family not found")))
    }
}

#[async_trait]
impl OrderStore for RocksDbStore {
    async fn insert(&self, order: NewOrder) -> Result<Order> {
        let order = Order::from_new(order, Uuid::new_v4().to_string(), Utc::now());

        let cf = self.cf(CF_ORDERS)?;
        let value =
            serde_json::to_vec(&order).map_err(|e| OrderError::Persistence(e.to_string()))?;
        self.db
            .put_cf(cf, order.id.as_bytes(), value)
            .map_err(|e| OrderError::Persistence(e.to_string()))?;

        Ok(order)
    }

    async fn get(&self, id: &str) -> Result<Option<Order>> {
        let cf = self.cf(CF_ORDERS)?;
        let raw = self
            .db
            .get_cf(cf, id.as_bytes())
            .map_err(|e| OrderError::Persistence(e.to_string()))?;

        match raw {
            Some(bytes) => {
                let order = serde_json::from_slice(&bytes)
                    .map_err(|e| OrderError::Persistence(e.to_string()))?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    async fn get_for_user(&self, user_id: &str) -> Result<Vec<Order>> {
        let cf = self.cf(CF_ORDERS)?;
        let mut matching = Vec::new();

        for entry in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_, value) = entry.map_err(|e| OrderError::Persistence(e.to_string()))?;
            let order: Order = serde_json::from_slice(&value)
                .map_err(|e| OrderError::Persistence(e.to_string()))?;
            if order.user_id == user_id {
                matching.push(order);
            }
        }

        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}

#[async_trait]
impl UserStore for RocksDbStore {
    async fn get(&self, id: &str) -> Result<Option<User>> {
        let cf = self.cf(CF_USERS)?;
        let raw = self
            .db
            .get_cf(cf, id.as_bytes())
            .map_err(|e| OrderError::Persistence(e.to_string()))?;

        match raw {
            Some(bytes) => {
                let user = serde_json::from_slice(&bytes)
                    .map_err(|e| OrderError::Persistence(e.to_string()))?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, user: User) -> Result<()> {
        let cf = self.cf(CF_USERS)?;
        let value =
            serde_json::to_vec(&user).map_err(|e| OrderError::Persistence(e.to_string()))?;
        self.db
            .put_cf(cf, user.id.as_bytes(), value)
            .map_err(|e| OrderError::Persistence(e.to_string()))?;
        Ok(())
    }
}
