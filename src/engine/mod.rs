mod availability;
mod cancellation;
mod error;
mod mutations;
mod pricing;
mod queries;
mod slot;
mod store;

pub use cancellation::settlement;
pub use error::{EngineError, ValidationFault};
pub use pricing::{Quote, quote, round_money, table_price_per_person};
pub use queries::{OccasionOption, ReservationStatement, TableOption};
pub use slot::validate_slot;
pub use store::{InMemoryStore, RecordStore, StoreError};

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::catalog::PricingCatalog;
use crate::config::EngineConfig;
use crate::notify::Notifier;

/// Booking orchestrator: validates requested slots, prevents double-booking,
/// prices reservations, and drives the one-way cancellation transition.
///
/// All methods take `&self` and the engine holds no mutable state of its
/// own; catalog and config are frozen at construction, so one engine is
/// safely shared across concurrent requests. Durable state lives behind the
/// [`RecordStore`].
pub struct Engine {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    catalog: PricingCatalog,
    config: EngineConfig,
}

impl Engine {
    pub fn new(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        catalog: PricingCatalog,
        config: EngineConfig,
    ) -> Self {
        Self { store, notifier, catalog, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PricingCatalog {
        &self.catalog
    }
}

/// Venue-local wall clock: the reference instant for slot validation and
/// the upcoming flag.
pub(crate) fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
