use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

pub type TableId = Ulid;
pub type ReservationId = Ulid;

/// Pricing tier of a dining table. Labels are a static mapping, resolved at
/// compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableCategory {
    Standard,
    VipExclusive,
    PrivateRoom,
    GastronomicExperience,
    PremiumLocation,
    BusinessUpscale,
    EventSpace,
}

impl TableCategory {
    pub const ALL: [TableCategory; 7] = [
        TableCategory::Standard,
        TableCategory::VipExclusive,
        TableCategory::PrivateRoom,
        TableCategory::GastronomicExperience,
        TableCategory::PremiumLocation,
        TableCategory::BusinessUpscale,
        TableCategory::EventSpace,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TableCategory::Standard => "Standard table",
            TableCategory::VipExclusive => "VIP & exclusive table",
            TableCategory::PrivateRoom => "Private room",
            TableCategory::GastronomicExperience => "Gastronomic experience table",
            TableCategory::PremiumLocation => "Premium location table",
            TableCategory::BusinessUpscale => "Upscale business table",
            TableCategory::EventSpace => "Event space",
        }
    }
}

/// Stated purpose of a reservation. Drives the per-person surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccasionType {
    Standard,
    FamilyGathering,
    Celebration,
    Corporate,
    AcademicEvent,
    CulturalOuting,
    Vip,
}

impl OccasionType {
    pub const ALL: [OccasionType; 7] = [
        OccasionType::Standard,
        OccasionType::FamilyGathering,
        OccasionType::Celebration,
        OccasionType::Corporate,
        OccasionType::AcademicEvent,
        OccasionType::CulturalOuting,
        OccasionType::Vip,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OccasionType::Standard => "Standard",
            OccasionType::FamilyGathering => "Personal & family gathering",
            OccasionType::Celebration => "Celebration & party",
            OccasionType::Corporate => "Corporate occasion",
            OccasionType::AcademicEvent => "School & university event",
            OccasionType::CulturalOuting => "Tourist & cultural outing",
            OccasionType::Vip => "VIP reservation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: TableId,
    pub name: String,
    pub capacity: u32,
    pub category: TableCategory,
    pub base_price_per_person: Decimal,
    pub is_active: bool,
}

impl DiningTable {
    /// Base price with the defensive floor applied: a non-positive stored
    /// price is coerced to `floor` before any pricing math.
    pub fn effective_base_price(&self, floor: Decimal) -> Decimal {
        if self.base_price_per_person <= Decimal::ZERO {
            floor
        } else {
            self.base_price_per_person
        }
    }
}

/// Cancellation stamp. Present once, never cleared — the transition is
/// one-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cancellation {
    pub cancelled_at: DateTime<Utc>,
    pub fee: Decimal,
    pub refund: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    /// Combined date + time-of-day, venue-local wall clock.
    pub reserved_at: NaiveDateTime,
    pub party_size: u32,
    pub table_id: TableId,
    pub notes: Option<String>,
    pub occasion: OccasionType,
    /// Frozen at confirmation time; authoritative over any later
    /// recomputation from current catalog values.
    pub total_price: Decimal,
    pub cancellation: Option<Cancellation>,
}

impl Reservation {
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_some()
    }

    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.reserved_at >= now
    }
}

/// A booking request as received from the hosting layer, before validation.
/// The time-of-day is kept separate from the date until the slot validator
/// combines them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub party_size: u32,
    pub table_id: TableId,
    pub notes: Option<String>,
    pub occasion: OccasionType,
}

/// Signed-in customer details used to pre-fill a request. The account email
/// always wins; name and phone only fill blanks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Who is asking for a cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Actor {
    Customer { email: String },
    Admin,
}

/// Admin-side listing filter: calendar date and/or table, plus customer
/// email for the profile view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    pub date: Option<NaiveDate>,
    pub table_id: Option<TableId>,
    pub customer_email: Option<String>,
}
