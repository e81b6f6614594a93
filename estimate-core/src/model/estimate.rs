use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::work_item::WorkItemEntry;

/// A persisted estimate as the server returns it: the submitted fields plus
/// the server-assigned id, timestamp, and server-computed cost fields.
///
/// The five cost fields must numerically match the client-side
/// [`CostBreakdown`](crate::costing::CostBreakdown) for the same inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub id: String,
    pub investor_name: String,
    pub investor_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor_email: Option<String>,
    pub work_items: Vec<WorkItemEntry>,
    pub material_discount: Decimal,
    pub labor_discount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    // Server-computed totals
    pub material_cost: Decimal,
    pub labor_cost: Decimal,
    pub material_cost_with_discount: Decimal,
    pub labor_cost_with_discount: Decimal,
    pub total_cost: Decimal,

    pub created_at: DateTime<Utc>,
}
