use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::model::{OccasionType, TableCategory};

/// Immutable pricing tables, built once and injected into the engine.
/// Lookups never mutate shared state: a category missing from the multiplier
/// table prices at 1.0, an occasion missing from the surcharge table prices
/// at 0.
#[derive(Debug, Clone)]
pub struct PricingCatalog {
    multipliers: HashMap<TableCategory, Decimal>,
    surcharges: HashMap<OccasionType, Decimal>,
}

impl Default for PricingCatalog {
    fn default() -> Self {
        Self::new(Self::default_multipliers(), Self::default_surcharges())
    }
}

impl PricingCatalog {
    pub fn new(
        multipliers: HashMap<TableCategory, Decimal>,
        surcharges: HashMap<OccasionType, Decimal>,
    ) -> Self {
        Self { multipliers, surcharges }
    }

    /// The built-in multiplier table, exposed so custom catalogs can start
    /// from it.
    pub fn default_multipliers() -> HashMap<TableCategory, Decimal> {
        HashMap::from([
            (TableCategory::Standard, Decimal::new(135, 2)),
            (TableCategory::VipExclusive, Decimal::new(280, 2)),
            (TableCategory::PrivateRoom, Decimal::new(240, 2)),
            (TableCategory::GastronomicExperience, Decimal::new(325, 2)),
            (TableCategory::PremiumLocation, Decimal::new(230, 2)),
            (TableCategory::BusinessUpscale, Decimal::new(260, 2)),
            (TableCategory::EventSpace, Decimal::new(245, 2)),
        ])
    }

    /// The built-in per-person surcharge table.
    pub fn default_surcharges() -> HashMap<OccasionType, Decimal> {
        HashMap::from([
            (OccasionType::Standard, Decimal::ZERO),
            (OccasionType::FamilyGathering, Decimal::from(120)),
            (OccasionType::Celebration, Decimal::from(170)),
            (OccasionType::Corporate, Decimal::from(220)),
            (OccasionType::AcademicEvent, Decimal::from(130)),
            (OccasionType::CulturalOuting, Decimal::from(185)),
            (OccasionType::Vip, Decimal::from(320)),
        ])
    }

    pub fn multiplier(&self, category: TableCategory) -> Decimal {
        self.multipliers.get(&category).copied().unwrap_or(Decimal::ONE)
    }

    /// Per-person surcharge, defaulting missing entries to 0.
    pub fn surcharge(&self, occasion: OccasionType) -> Decimal {
        self.surcharges.get(&occasion).copied().unwrap_or(Decimal::ZERO)
    }

    /// Whether the occasion has an explicit surcharge entry. Used by the
    /// reject-unpriced policy.
    pub fn is_priced(&self, occasion: OccasionType) -> bool {
        self.surcharges.contains_key(&occasion)
    }
}
