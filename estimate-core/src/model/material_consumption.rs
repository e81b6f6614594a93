use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costing::clamp_non_negative;

/// How much of one material a single unit of the parent work item consumes,
/// and at what unit price. Owned by its [`WorkItemEntry`](super::WorkItemEntry);
/// it has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialConsumption {
    pub material_name: String,
    pub unit: String,
    pub consumption_per_work_unit: Decimal,
    pub price_per_unit: Decimal,
}

impl MaterialConsumption {
    /// Builds a consumption line. Negative rates and prices are clamped to
    /// zero here, at the input boundary, so they never reach a derived total.
    pub fn new(
        material_name: impl Into<String>,
        unit: impl Into<String>,
        consumption_per_work_unit: Decimal,
        price_per_unit: Decimal,
    ) -> Self {
        Self {
            material_name: material_name.into(),
            unit: unit.into(),
            consumption_per_work_unit: clamp_non_negative(consumption_per_work_unit),
            price_per_unit: clamp_non_negative(price_per_unit),
        }
    }
}
