use chrono::NaiveTime;
use rust_decimal::Decimal;

/// What to do with an occasion that has no surcharge entry in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownOccasionPolicy {
    /// Price the occasion at 0 (pure lookup-with-default).
    PriceAsZero,
    /// Reject the request with a validation fault.
    Reject,
}

/// Which reservations block a slot when probing for conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictScope {
    /// Cancelled reservations still occupy their slot.
    AllReservations,
    /// Cancelled reservations free their slot for rebooking.
    ActiveOnly,
}

/// Daily service hours, closed on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceWindow {
    pub opens: NaiveTime,
    pub closes: NaiveTime,
}

impl ServiceWindow {
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.opens <= time && time <= self.closes
    }
}

impl Default for ServiceWindow {
    fn default() -> Self {
        Self {
            opens: NaiveTime::from_hms_opt(13, 0, 0).expect("static service window"),
            closes: NaiveTime::from_hms_opt(23, 0, 0).expect("static service window"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Venue name used in outbound notification subjects and bodies.
    pub venue_name: String,
    pub service_window: ServiceWindow,
    /// Floor applied to a non-positive table base price before pricing.
    pub base_price_floor: Decimal,
    pub cancellation_fee_rate: Decimal,
    pub min_party_size: u32,
    pub max_party_size: u32,
    /// Internal address that receives a copy of each new booking. None
    /// disables the copy.
    pub notification_email: Option<String>,
    pub unknown_occasion_policy: UnknownOccasionPolicy,
    pub conflict_scope: ConflictScope,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            venue_name: "Maitre".into(),
            service_window: ServiceWindow::default(),
            base_price_floor: Decimal::from(220),
            cancellation_fee_rate: Decimal::new(5, 2),
            min_party_size: 1,
            max_party_size: 20,
            notification_email: None,
            unknown_occasion_policy: UnknownOccasionPolicy::PriceAsZero,
            conflict_scope: ConflictScope::AllReservations,
        }
    }
}

impl EngineConfig {
    /// Build a config from `MAITRE_*` environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            venue_name: std::env::var("MAITRE_VENUE_NAME").unwrap_or(defaults.venue_name),
            service_window: ServiceWindow {
                opens: env_time("MAITRE_OPENS").unwrap_or(defaults.service_window.opens),
                closes: env_time("MAITRE_CLOSES").unwrap_or(defaults.service_window.closes),
            },
            base_price_floor: env_parse("MAITRE_BASE_PRICE_FLOOR")
                .unwrap_or(defaults.base_price_floor),
            cancellation_fee_rate: env_parse("MAITRE_CANCELLATION_FEE_RATE")
                .unwrap_or(defaults.cancellation_fee_rate),
            min_party_size: env_parse("MAITRE_MIN_PARTY_SIZE").unwrap_or(defaults.min_party_size),
            max_party_size: env_parse("MAITRE_MAX_PARTY_SIZE").unwrap_or(defaults.max_party_size),
            notification_email: std::env::var("MAITRE_NOTIFICATION_EMAIL").ok(),
            unknown_occasion_policy: match std::env::var("MAITRE_UNKNOWN_OCCASION").as_deref() {
                Ok("reject") => UnknownOccasionPolicy::Reject,
                _ => defaults.unknown_occasion_policy,
            },
            conflict_scope: match std::env::var("MAITRE_CONFLICT_SCOPE").as_deref() {
                Ok("active") => ConflictScope::ActiveOnly,
                _ => defaults.conflict_scope,
            },
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

fn env_time(key: &str) -> Option<NaiveTime> {
    std::env::var(key)
        .ok()
        .and_then(|s| NaiveTime::parse_from_str(&s, "%H:%M").ok())
}
