use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::prices::domain::{parse_price, require_name, PriceList};
use crate::prices::repository::PriceRepository;

/// Application service for the price list.
/// Parses raw query values before anything reaches the repository, so a
/// rejected request never mutates state.
#[derive(Clone)]
pub struct PriceService {
    repo: Arc<dyn PriceRepository>,
}

impl PriceService {
    pub fn new(repo: Arc<dyn PriceRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> PriceList {
        let list = self.repo.list().await;
        debug!(count = list.len(), "list prices");
        list
    }

    #[instrument(skip(self, raw_price))]
    pub async fn create(&self, name: &str, raw_price: Option<&str>) -> Result<PriceList, ServiceError> {
        let name = require_name("foodItem", Some(name))?;
        let price = parse_price("foodPrice", raw_price)?;
        let list = self.repo.create(name, price).await;
        info!(price, count = list.len(), "created food price");
        Ok(list)
    }

    #[instrument(skip(self, raw_new_name))]
    pub async fn rename(&self, name: &str, raw_new_name: Option<&str>) -> Result<PriceList, ServiceError> {
        let new_name = require_name("newName", raw_new_name)?;
        let list = self.repo.rename(name, new_name.clone()).await?;
        info!(%new_name, "renamed food");
        Ok(list)
    }

    #[instrument(skip(self, raw_price))]
    pub async fn reprice(&self, name: &str, raw_price: Option<&str>) -> Result<PriceList, ServiceError> {
        let price = parse_price("newPrice", raw_price)?;
        let list = self.repo.reprice(name, price).await?;
        info!(price, "repriced food");
        Ok(list)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<PriceList, ServiceError> {
        let list = self.repo.delete(name).await?;
        info!(count = list.len(), "deleted food");
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::domain::FoodItem;
    use crate::prices::repository::MemoryPriceRepository;

    fn service() -> PriceService {
        PriceService::new(Arc::new(MemoryPriceRepository::seeded()))
    }

    #[tokio::test]
    async fn walkthrough_from_seed() {
        let svc = service();

        let list = svc.create("pear", Some("4")).await.unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list.food.last(), Some(&FoodItem::new("pear", 4.0)));

        let list = svc.reprice("pear", Some("10")).await.unwrap();
        assert_eq!(list.find("pear"), Some(&FoodItem::new("pear", 10.0)));

        let list = svc.delete("orange").await.unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.find("orange").is_none());

        let err = svc.rename("doesnotexist", Some("x")).await.unwrap_err();
        assert_eq!(err, ServiceError::not_found("Food"));
        assert_eq!(svc.list().await, list);
    }

    #[tokio::test]
    async fn rename_keeps_price_and_length() {
        let svc = service();
        let list = svc.rename("banana", Some("plantain")).await.unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.food[2], FoodItem::new("plantain", 3.0));
        assert_eq!(list.food[0], FoodItem::new("apple", 1.0));
    }

    #[tokio::test]
    async fn reprice_coerces_numeric_text() {
        let svc = service();
        let list = svc.reprice("apple", Some("5")).await.unwrap();
        assert_eq!(list.food[0].price, 5.0);
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_mutation() {
        let svc = service();
        let before = svc.list().await;

        assert!(matches!(svc.create("pear", Some("cheap")).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.create("pear", None).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.create(" ", Some("1")).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.create("", Some("1")).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.reprice("apple", Some("NaN")).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.rename("apple", Some("")).await, Err(ServiceError::Validation(_))));

        assert_eq!(svc.list().await, before);
    }

    #[tokio::test]
    async fn validation_wins_over_not_found() {
        let svc = service();
        let err = svc.reprice("nope", Some("abc")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
