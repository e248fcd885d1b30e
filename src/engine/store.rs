use async_trait::async_trait;
use chrono::NaiveDateTime;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::config::ConflictScope;
use crate::model::{DiningTable, Reservation, ReservationFilter, ReservationId, TableId};

#[derive(Debug)]
pub enum StoreError {
    /// Uniqueness constraint on (table, instant) violated at write time.
    SlotTaken {
        table_id: TableId,
        reserved_at: NaiveDateTime,
    },
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::SlotTaken { table_id, reserved_at } => {
                write!(f, "slot ({table_id}, {reserved_at}) already taken")
            }
            StoreError::Unavailable(e) => write!(f, "store unavailable: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for super::EngineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::SlotTaken { table_id, reserved_at } => {
                super::EngineError::Conflict { table_id, reserved_at }
            }
            StoreError::Unavailable(e) => super::EngineError::Storage(e),
        }
    }
}

/// Durable record store the engine runs against. The availability probe in
/// the engine is optimistic; `insert_reservation` is the authoritative check
/// and must reject a duplicate (table, instant) pair under the given scope.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_table(&self, id: TableId) -> Result<Option<DiningTable>, StoreError>;

    async fn insert_table(&self, table: DiningTable) -> Result<(), StoreError>;

    async fn list_tables(&self, active_only: bool) -> Result<Vec<DiningTable>, StoreError>;

    async fn get_reservation(
        &self,
        id: ReservationId,
    ) -> Result<Option<Reservation>, StoreError>;

    async fn exists_reservation(
        &self,
        table_id: TableId,
        reserved_at: NaiveDateTime,
        scope: ConflictScope,
    ) -> Result<bool, StoreError>;

    async fn insert_reservation(
        &self,
        reservation: Reservation,
        scope: ConflictScope,
    ) -> Result<(), StoreError>;

    async fn update_reservation(&self, reservation: Reservation) -> Result<(), StoreError>;

    /// Reservations matching the filter, newest first.
    async fn list_reservations(
        &self,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>, StoreError>;
}

/// DashMap-backed store. The slot index entry doubles as the uniqueness
/// constraint: claiming it goes through the entry API, so two concurrent
/// inserts for the same (table, instant) can never both succeed.
#[derive(Default)]
pub struct InMemoryStore {
    tables: DashMap<TableId, DiningTable>,
    reservations: DashMap<ReservationId, Reservation>,
    /// (table, instant) → reservation currently holding the slot.
    slots: DashMap<(TableId, NaiveDateTime), ReservationId>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn holder_blocks(&self, holder: ReservationId, scope: ConflictScope) -> bool {
        match scope {
            ConflictScope::AllReservations => true,
            ConflictScope::ActiveOnly => self
                .reservations
                .get(&holder)
                .is_some_and(|r| !r.is_cancelled()),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn find_table(&self, id: TableId) -> Result<Option<DiningTable>, StoreError> {
        Ok(self.tables.get(&id).map(|e| e.value().clone()))
    }

    async fn insert_table(&self, table: DiningTable) -> Result<(), StoreError> {
        self.tables.insert(table.id, table);
        Ok(())
    }

    async fn list_tables(&self, active_only: bool) -> Result<Vec<DiningTable>, StoreError> {
        let mut tables: Vec<DiningTable> = self
            .tables
            .iter()
            .filter(|e| !active_only || e.value().is_active)
            .map(|e| e.value().clone())
            .collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tables)
    }

    async fn get_reservation(
        &self,
        id: ReservationId,
    ) -> Result<Option<Reservation>, StoreError> {
        Ok(self.reservations.get(&id).map(|e| e.value().clone()))
    }

    async fn exists_reservation(
        &self,
        table_id: TableId,
        reserved_at: NaiveDateTime,
        scope: ConflictScope,
    ) -> Result<bool, StoreError> {
        let holder = self.slots.get(&(table_id, reserved_at)).map(|e| *e.value());
        Ok(holder.is_some_and(|h| self.holder_blocks(h, scope)))
    }

    async fn insert_reservation(
        &self,
        reservation: Reservation,
        scope: ConflictScope,
    ) -> Result<(), StoreError> {
        match self.slots.entry((reservation.table_id, reservation.reserved_at)) {
            Entry::Occupied(mut slot) => {
                if self.holder_blocks(*slot.get(), scope) {
                    return Err(StoreError::SlotTaken {
                        table_id: reservation.table_id,
                        reserved_at: reservation.reserved_at,
                    });
                }
                // Cancelled holder under ActiveOnly: the new reservation
                // takes over the slot.
                slot.insert(reservation.id);
            }
            Entry::Vacant(slot) => {
                slot.insert(reservation.id);
            }
        }
        self.reservations.insert(reservation.id, reservation);
        Ok(())
    }

    async fn update_reservation(&self, reservation: Reservation) -> Result<(), StoreError> {
        if !self.reservations.contains_key(&reservation.id) {
            return Err(StoreError::Unavailable(format!(
                "unknown reservation {}",
                reservation.id
            )));
        }
        self.reservations.insert(reservation.id, reservation);
        Ok(())
    }

    async fn list_reservations(
        &self,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>, StoreError> {
        let mut matches: Vec<Reservation> = self
            .reservations
            .iter()
            .map(|e| e.value().clone())
            .filter(|r| filter.date.is_none_or(|d| r.reserved_at.date() == d))
            .filter(|r| filter.table_id.is_none_or(|t| r.table_id == t))
            .filter(|r| {
                filter
                    .customer_email
                    .as_deref()
                    .is_none_or(|email| r.customer_email.eq_ignore_ascii_case(email))
            })
            .collect();
        matches.sort_by(|a, b| b.reserved_at.cmp(&a.reserved_at));
        Ok(matches)
    }
}
