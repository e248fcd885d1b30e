//! Restaurant table-booking engine: slot validation, double-booking
//! prevention, deterministic pricing, and cancellation settlement.
//!
//! The engine is invoked in-process by a hosting layer; durable state lives
//! behind [`RecordStore`] and outbound notifications behind [`Notifier`].

pub mod catalog;
pub mod config;
pub mod engine;
pub mod model;
pub mod notify;
pub mod observability;

pub use catalog::PricingCatalog;
pub use config::{ConflictScope, EngineConfig, ServiceWindow, UnknownOccasionPolicy};
pub use engine::{
    Engine, EngineError, InMemoryStore, OccasionOption, Quote, RecordStore, ReservationStatement,
    StoreError, TableOption, ValidationFault,
};
pub use model::{
    Actor, Cancellation, CustomerIdentity, DiningTable, OccasionType, Reservation,
    ReservationFilter, ReservationId, ReservationRequest, TableCategory, TableId,
};
pub use notify::{ChannelNotifier, LogNotifier, Notifier, OutboundMessage};
