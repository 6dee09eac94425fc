//! Service layer for the food price list.
//! - `prices::domain` holds the item/list types and input parsing.
//! - `prices::repository` owns the collection behind a storage trait.
//! - `prices::service` applies input rules before touching storage.

pub mod errors;
pub mod prices;
