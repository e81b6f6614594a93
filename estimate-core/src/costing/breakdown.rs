use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::{clamp_non_negative, clamp_percent, round_half_up};
use crate::model::{DraftEstimate, WorkItemEntry};

/// The derived cost set for a draft: material and labor totals, their
/// discounted variants, and the grand total. All fields are currency-rounded
/// to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub material_cost: Decimal,
    pub labor_cost: Decimal,
    pub material_cost_with_discount: Decimal,
    pub labor_cost_with_discount: Decimal,
    pub total_cost: Decimal,
}

/// Sum of `quantity × consumption_per_work_unit × price_per_unit` over every
/// material of every item, carried at full precision. Each factor is clamped
/// non-negative here as well as at the input boundary, so items rehydrated
/// from an out-of-domain slot still cannot push a negative value into a sum.
pub fn raw_material_cost<'a>(items: impl IntoIterator<Item = &'a WorkItemEntry>) -> Decimal {
    items
        .into_iter()
        .map(|item| {
            let quantity = clamp_non_negative(item.quantity);
            item.materials
                .iter()
                .map(|mat| {
                    quantity
                        * clamp_non_negative(mat.consumption_per_work_unit)
                        * clamp_non_negative(mat.price_per_unit)
                })
                .sum::<Decimal>()
        })
        .sum()
}

/// Sum of `quantity × labor_price_per_unit` over every item, carried at full
/// precision with the same non-negative clamping as [`raw_material_cost`].
pub fn raw_labor_cost<'a>(items: impl IntoIterator<Item = &'a WorkItemEntry>) -> Decimal {
    items
        .into_iter()
        .map(|item| clamp_non_negative(item.quantity) * clamp_non_negative(item.labor_price_per_unit))
        .sum()
}

/// Total material cost of the given items, currency-rounded.
///
/// Rounding happens once, on the full-precision sum: sub-cent parts that
/// would each round to zero still count toward the union. Only the raw sums
/// are additive over disjoint item lists; use [`raw_material_cost`] where
/// that property matters.
pub fn material_cost<'a>(items: impl IntoIterator<Item = &'a WorkItemEntry>) -> Decimal {
    round_half_up(raw_material_cost(items))
}

/// Total labor cost of the given items, currency-rounded. Same single-point
/// rounding as [`material_cost`].
pub fn labor_cost<'a>(items: impl IntoIterator<Item = &'a WorkItemEntry>) -> Decimal {
    round_half_up(raw_labor_cost(items))
}

/// Derives the full [`CostBreakdown`] for a draft.
///
/// Sums are carried at full precision and each output field is rounded
/// exactly once. Discounted values are derived from the unrounded bases;
/// the total is the sum of the two rounded discounted values, so no further
/// precision is lost. Discount percentages are clamped to [0, 100] and item
/// amounts non-negative before use, whatever the draft holds.
pub fn cost_breakdown(draft: &DraftEstimate) -> CostBreakdown {
    let raw_material = raw_material_cost(draft.work_items());
    let raw_labor = raw_labor_cost(draft.work_items());

    let material_pct = clamp_percent(draft.material_discount_pct);
    let labor_pct = clamp_percent(draft.labor_discount_pct);

    let material_factor = Decimal::ONE - material_pct / Decimal::ONE_HUNDRED;
    let labor_factor = Decimal::ONE - labor_pct / Decimal::ONE_HUNDRED;

    let material_cost_with_discount = round_half_up(raw_material * material_factor);
    let labor_cost_with_discount = round_half_up(raw_labor * labor_factor);

    CostBreakdown {
        material_cost: round_half_up(raw_material),
        labor_cost: round_half_up(raw_labor),
        material_cost_with_discount,
        labor_cost_with_discount,
        total_cost: material_cost_with_discount + labor_cost_with_discount,
    }
}
