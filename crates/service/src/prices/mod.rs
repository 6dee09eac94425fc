//! Food price list: one ordered collection of `{name, price}` items.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{FoodItem, PriceList};
pub use repository::{MemoryPriceRepository, PriceRepository};
pub use service::PriceService;
