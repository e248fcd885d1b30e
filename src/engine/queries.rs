use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::model::{
    Cancellation, DiningTable, OccasionType, Reservation, ReservationFilter, ReservationId,
    TableCategory, TableId,
};

use super::{Engine, EngineError, cancellation, now_local, pricing};

/// A bookable table with its priced per-person rate, for selection lists.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOption {
    pub id: TableId,
    pub name: String,
    pub capacity: u32,
    pub category: TableCategory,
    pub category_label: &'static str,
    pub base_price_per_person: Decimal,
    pub price_per_person: Decimal,
}

/// An occasion with its per-person surcharge, for selection lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccasionOption {
    pub value: OccasionType,
    pub label: &'static str,
    pub price_per_person: Decimal,
}

/// One row of a customer's reservation history, with the priced breakdown
/// resolved against the current catalog where the stored record predates
/// price persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationStatement {
    pub id: ReservationId,
    pub reserved_at: NaiveDateTime,
    pub table_name: String,
    pub table_category_label: &'static str,
    pub party_size: u32,
    pub occasion_label: &'static str,
    pub notes: Option<String>,
    pub table_price_per_person: Decimal,
    pub occasion_price_per_person: Decimal,
    pub total_price: Decimal,
    pub is_upcoming: bool,
    pub cancellation: Option<Cancellation>,
}

impl Engine {
    pub async fn get_reservation(&self, id: ReservationId) -> Result<Reservation, EngineError> {
        self.store
            .get_reservation(id)
            .await?
            .ok_or(EngineError::NotFound(id))
    }

    /// Admin listing: optional date and table filters, newest first.
    pub async fn list_reservations(
        &self,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>, EngineError> {
        Ok(self.store.list_reservations(filter).await?)
    }

    /// Active tables with their current per-person price.
    pub async fn table_options(&self) -> Result<Vec<TableOption>, EngineError> {
        let tables = self.store.list_tables(true).await?;
        Ok(tables
            .into_iter()
            .map(|t| {
                let price_per_person =
                    pricing::table_price_per_person(&t, &self.catalog, self.config.base_price_floor);
                TableOption {
                    id: t.id,
                    capacity: t.capacity,
                    category: t.category,
                    category_label: t.category.label(),
                    base_price_per_person: t.effective_base_price(self.config.base_price_floor),
                    price_per_person,
                    name: t.name,
                }
            })
            .collect())
    }

    /// Every occasion with its surcharge, priced through the catalog's
    /// lookup-with-default.
    pub fn occasion_options(&self) -> Vec<OccasionOption> {
        OccasionType::ALL
            .iter()
            .map(|&occasion| OccasionOption {
                value: occasion,
                label: occasion.label(),
                price_per_person: pricing::round_money(self.catalog.surcharge(occasion)),
            })
            .collect()
    }

    /// Statement rows for one customer (case-insensitive email match),
    /// newest first.
    pub async fn customer_statements(
        &self,
        email: &str,
    ) -> Result<Vec<ReservationStatement>, EngineError> {
        let filter = ReservationFilter {
            customer_email: Some(email.to_string()),
            ..ReservationFilter::default()
        };
        let reservations = self.store.list_reservations(&filter).await?;
        let now = now_local();

        let mut statements = Vec::with_capacity(reservations.len());
        for reservation in reservations {
            let table = self.store.find_table(reservation.table_id).await?;
            statements.push(self.statement_row(reservation, table.as_ref(), now));
        }
        Ok(statements)
    }

    fn statement_row(
        &self,
        reservation: Reservation,
        table: Option<&DiningTable>,
        now: NaiveDateTime,
    ) -> ReservationStatement {
        let floor = self.config.base_price_floor;
        let table_price_per_person = table
            .map(|t| pricing::table_price_per_person(t, &self.catalog, floor))
            .unwrap_or(Decimal::ZERO);
        let occasion_price_per_person =
            pricing::round_money(self.catalog.surcharge(reservation.occasion));
        let total = pricing::effective_total(&reservation, table, &self.catalog, floor);

        // Rows cancelled before settlement persistence existed carry zero
        // fee/refund; resolve them for display without touching the record.
        let cancellation = reservation.cancellation.clone().map(|stamp| {
            let (computed_fee, _) = cancellation::settlement(total, self.config.cancellation_fee_rate);
            let fee = if stamp.fee > Decimal::ZERO { stamp.fee } else { computed_fee };
            let refund = if stamp.refund > Decimal::ZERO {
                stamp.refund
            } else {
                (total - fee).max(Decimal::ZERO)
            };
            Cancellation { fee, refund, ..stamp }
        });

        ReservationStatement {
            id: reservation.id,
            reserved_at: reservation.reserved_at,
            table_name: table
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "Unknown table".to_string()),
            table_category_label: table.map(|t| t.category.label()).unwrap_or("N/A"),
            party_size: reservation.party_size,
            occasion_label: reservation.occasion.label(),
            notes: reservation.notes,
            table_price_per_person,
            occasion_price_per_person,
            total_price: total,
            is_upcoming: reservation.reserved_at >= now,
            cancellation,
        }
    }
}
