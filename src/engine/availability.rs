use chrono::NaiveDateTime;

use crate::model::{DiningTable, TableId};

use super::{Engine, EngineError};

impl Engine {
    /// Resolve a table reference for booking: the table must exist and be
    /// active. Anything else is a NotFound rejection, kept distinct from a
    /// scheduling conflict.
    pub(super) async fn find_bookable_table(
        &self,
        id: TableId,
    ) -> Result<DiningTable, EngineError> {
        self.store
            .find_table(id)
            .await?
            .filter(|t| t.is_active)
            .ok_or(EngineError::NotFound(id))
    }

    /// Optimistic conflict probe: exact (table, instant) equality, no buffer
    /// window. Which reservations block is governed by the configured
    /// conflict scope. The store's uniqueness constraint at insert time
    /// remains the authoritative check.
    pub async fn is_slot_taken(
        &self,
        table_id: TableId,
        reserved_at: NaiveDateTime,
    ) -> Result<bool, EngineError> {
        Ok(self
            .store
            .exists_reservation(table_id, reserved_at, self.config.conflict_scope)
            .await?)
    }
}
