use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::prices::domain::{default_seed, FoodItem, PriceList};

/// Storage for the price list. Every method returns the collection as it
/// stands after the call; lookups hit the first item with an exactly equal name.
#[async_trait]
pub trait PriceRepository: Send + Sync {
    async fn list(&self) -> PriceList;
    async fn create(&self, name: String, price: f64) -> PriceList;
    async fn rename(&self, name: &str, new_name: String) -> Result<PriceList, ServiceError>;
    async fn reprice(&self, name: &str, price: f64) -> Result<PriceList, ServiceError>;
    async fn delete(&self, name: &str) -> Result<PriceList, ServiceError>;
}

/// In-memory, insertion-ordered repository.
///
/// The lookup and the mutation it guards run under one write lock, and the
/// returned snapshot is taken before the lock is released.
#[derive(Clone)]
pub struct MemoryPriceRepository {
    inner: Arc<RwLock<Vec<FoodItem>>>,
}

impl MemoryPriceRepository {
    pub fn new(seed: Vec<FoodItem>) -> Self {
        Self { inner: Arc::new(RwLock::new(seed)) }
    }

    /// Repository holding apple, orange and banana.
    pub fn seeded() -> Self {
        Self::new(default_seed())
    }

    fn find_index(items: &[FoodItem], name: &str) -> Option<usize> {
        items.iter().position(|item| item.name == name)
    }

    fn snapshot(items: &[FoodItem]) -> PriceList {
        PriceList { food: items.to_vec() }
    }

    async fn modify<F>(&self, name: &str, f: F) -> Result<PriceList, ServiceError>
    where
        F: FnOnce(&mut Vec<FoodItem>, usize) + Send,
    {
        let mut items = self.inner.write().await;
        let idx = Self::find_index(&items, name).ok_or_else(|| ServiceError::not_found("Food"))?;
        f(&mut *items, idx);
        Ok(Self::snapshot(&items))
    }
}

#[async_trait]
impl PriceRepository for MemoryPriceRepository {
    async fn list(&self) -> PriceList {
        let items = self.inner.read().await;
        Self::snapshot(&items)
    }

    async fn create(&self, name: String, price: f64) -> PriceList {
        let mut items = self.inner.write().await;
        items.push(FoodItem { name, price });
        Self::snapshot(&items)
    }

    async fn rename(&self, name: &str, new_name: String) -> Result<PriceList, ServiceError> {
        self.modify(name, move |items, idx| items[idx].name = new_name).await
    }

    async fn reprice(&self, name: &str, price: f64) -> Result<PriceList, ServiceError> {
        self.modify(name, move |items, idx| items[idx].price = price).await
    }

    async fn delete(&self, name: &str) -> Result<PriceList, ServiceError> {
        self.modify(name, |items, idx| {
            items.remove(idx);
        })
        .await
    }
}
