use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::PricingCatalog;
use crate::model::{DiningTable, OccasionType, Reservation};

/// Priced breakdown for one reservation. Deterministic: same inputs always
/// yield the same outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub table_price_per_person: Decimal,
    pub occasion_price_per_person: Decimal,
    pub total: Decimal,
}

/// All monetary results round to 2 decimal places, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `round(base × multiplier, 2)`, with the base price floor applied first.
pub fn table_price_per_person(
    table: &DiningTable,
    catalog: &PricingCatalog,
    floor: Decimal,
) -> Decimal {
    round_money(table.effective_base_price(floor) * catalog.multiplier(table.category))
}

pub fn quote(
    table: &DiningTable,
    occasion: OccasionType,
    party_size: u32,
    catalog: &PricingCatalog,
    floor: Decimal,
) -> Quote {
    let table_pp = table_price_per_person(table, catalog, floor);
    let occasion_pp = round_money(catalog.surcharge(occasion));
    let total = round_money(Decimal::from(party_size) * (table_pp + occasion_pp));
    Quote {
        table_price_per_person: table_pp,
        occasion_price_per_person: occasion_pp,
        total,
    }
}

/// The price a settlement is based on: the stored total when present, else a
/// one-time recomputation from the current catalog. A missing table prices
/// the table component at 0.
pub fn effective_total(
    reservation: &Reservation,
    table: Option<&DiningTable>,
    catalog: &PricingCatalog,
    floor: Decimal,
) -> Decimal {
    if reservation.total_price > Decimal::ZERO {
        return reservation.total_price;
    }
    let table_pp = table
        .map(|t| table_price_per_person(t, catalog, floor))
        .unwrap_or(Decimal::ZERO);
    let occasion_pp = round_money(catalog.surcharge(reservation.occasion));
    round_money(Decimal::from(reservation.party_size) * (table_pp + occasion_pp))
}
