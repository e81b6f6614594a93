use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::work_item::{DraftItem, WorkItemEntry};

/// The full in-progress estimate a wizard session builds up.
///
/// Text fields use the empty string for "not filled in yet"; the submission
/// payload maps empty optionals to absent fields. Items keep insertion order,
/// which is display order only — cost derivation is order-independent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEstimate {
    pub investor_name: String,
    pub investor_address: String,
    pub contractor_name: String,
    pub contractor_address: String,
    pub contractor_phone: String,
    pub contractor_email: String,
    pub items: Vec<DraftItem>,
    /// Percentage in [0, 100]; clamped at every write.
    pub material_discount_pct: Decimal,
    /// Percentage in [0, 100]; clamped at every write.
    pub labor_discount_pct: Decimal,
    pub notes: String,
    pub valid_until: String,
    pub start_date: String,
}

impl DraftEstimate {
    /// The entries themselves, without their session-local ids.
    pub fn work_items(&self) -> impl Iterator<Item = &WorkItemEntry> {
        self.items.iter().map(|item| &item.entry)
    }
}

/// Partial update for the investor/contractor block; only the fields set to
/// `Some` are written, the rest keep their current values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicInfoPatch {
    pub investor_name: Option<String>,
    pub investor_address: Option<String>,
    pub contractor_name: Option<String>,
    pub contractor_address: Option<String>,
    pub contractor_phone: Option<String>,
    pub contractor_email: Option<String>,
}
