use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::WorkItemEntry;

/// Payload for `POST /api/estimates`. The server recomputes and persists the
/// derived totals from these inputs; they must match the client-side
/// [`CostBreakdown`](crate::costing::CostBreakdown) for the same draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEstimateRequest {
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
}

/// Level of breakdown detail in a generated PDF. Both levels use the same
/// underlying totals; `Basic` only omits per-item detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfDetail {
    #[default]
    Full,
    Basic,
}

impl PdfDetail {
    /// Value for the `detail` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Basic => "basic",
        }
    }
}
