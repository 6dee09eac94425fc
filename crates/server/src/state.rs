use std::sync::Arc;

use service::prices::{MemoryPriceRepository, PriceRepository, PriceService};

/// Shared handler state. Cloning is cheap: the price list lives behind an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub prices: PriceService,
}

impl ServerState {
    pub fn new(repo: Arc<dyn PriceRepository>) -> Self {
        Self { prices: PriceService::new(repo) }
    }

    /// Fresh in-memory list with the default apple/orange/banana seed.
    pub fn seeded() -> Self {
        Self::new(Arc::new(MemoryPriceRepository::seeded()))
    }
}
