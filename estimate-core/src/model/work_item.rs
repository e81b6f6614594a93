use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::Work;
use super::material_consumption::MaterialConsumption;
use crate::costing::clamp_non_negative;

/// Stable identifier for one draft line, issued by the session when the line
/// is added. Unlike an array position it does not shift when an earlier line
/// is removed, so it is safe to hold across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One priced line in an estimate: a quantity of work, its labor price per
/// unit, and the materials consumed per unit of that work.
///
/// The wire shape matches the estimate API; `materials` travels under the
/// `materialPrices` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemEntry {
    /// Reference to a catalog work; `None` for free-form entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_id: Option<String>,
    pub work_name: String,
    pub unit: String,
    pub quantity: Decimal,
    pub labor_price_per_unit: Decimal,
    #[serde(rename = "materialPrices")]
    pub materials: Vec<MaterialConsumption>,
}

impl WorkItemEntry {
    /// Builds a free-form entry. Quantity and labor price are clamped
    /// non-negative at this boundary.
    pub fn new(
        work_name: impl Into<String>,
        unit: impl Into<String>,
        quantity: Decimal,
        labor_price_per_unit: Decimal,
        materials: Vec<MaterialConsumption>,
    ) -> Self {
        Self {
            work_id: None,
            work_name: work_name.into(),
            unit: unit.into(),
            quantity: clamp_non_negative(quantity),
            labor_price_per_unit: clamp_non_negative(labor_price_per_unit),
            materials,
        }
    }

    /// Pre-populates an entry from a catalog work: labor price from the
    /// catalog default, each material priced at its default unit price
    /// (zero when the catalog carries no default).
    pub fn from_work(
        work: &Work,
        quantity: Decimal,
    ) -> Self {
        Self {
            work_id: Some(work.id.clone()),
            work_name: work.name.clone(),
            unit: work.unit.clone(),
            quantity: clamp_non_negative(quantity),
            labor_price_per_unit: clamp_non_negative(work.default_labor_price),
            materials: work
                .materials
                .iter()
                .map(|mat| {
                    MaterialConsumption::new(
                        mat.name.clone(),
                        mat.unit.clone(),
                        mat.consumption_per_work_unit,
                        mat.default_price_per_unit.unwrap_or(Decimal::ZERO),
                    )
                })
                .collect(),
        }
    }

    /// Merges the fields present in `patch` into this entry. Numeric fields
    /// are clamped non-negative on the way in.
    pub fn apply(
        &mut self,
        patch: WorkItemPatch,
    ) {
        if let Some(work_name) = patch.work_name {
            self.work_name = work_name;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = clamp_non_negative(quantity);
        }
        if let Some(labor_price_per_unit) = patch.labor_price_per_unit {
            self.labor_price_per_unit = clamp_non_negative(labor_price_per_unit);
        }
        if let Some(materials) = patch.materials {
            self.materials = materials;
        }
    }
}

/// Partial update for a [`WorkItemEntry`]; only the fields set to `Some`
/// are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkItemPatch {
    pub work_name: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<Decimal>,
    pub labor_price_per_unit: Option<Decimal>,
    pub materials: Option<Vec<MaterialConsumption>>,
}

/// A [`WorkItemEntry`] as held inside a draft, paired with its stable id.
/// The id is session-local and never serialized to the estimate API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftItem {
    pub id: ItemId,
    pub entry: WorkItemEntry,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::model::CatalogMaterial;

    use super::*;

    fn tiling_work() -> Work {
        Work {
            id: "w-17".to_string(),
            name: "Floor tiling".to_string(),
            category: "flooring".to_string(),
            unit: "m2".to_string(),
            default_labor_price: dec!(55),
            is_system: true,
            materials: vec![
                CatalogMaterial {
                    name: "tile adhesive".to_string(),
                    unit: "kg".to_string(),
                    consumption_per_work_unit: dec!(4),
                    default_price_per_unit: Some(dec!(2.20)),
                },
                CatalogMaterial {
                    name: "grout".to_string(),
                    unit: "kg".to_string(),
                    consumption_per_work_unit: dec!(0.7),
                    default_price_per_unit: None,
                },
            ],
        }
    }

    #[test]
    fn from_work_copies_defaults() {
        let entry = WorkItemEntry::from_work(&tiling_work(), dec!(12));

        assert_eq!(entry.work_id.as_deref(), Some("w-17"));
        assert_eq!(entry.work_name, "Floor tiling");
        assert_eq!(entry.quantity, dec!(12));
        assert_eq!(entry.labor_price_per_unit, dec!(55));
        assert_eq!(entry.materials.len(), 2);
        assert_eq!(entry.materials[0].price_per_unit, dec!(2.20));
    }

    #[test]
    fn from_work_prices_missing_defaults_at_zero() {
        let entry = WorkItemEntry::from_work(&tiling_work(), dec!(1));

        assert_eq!(entry.materials[1].price_per_unit, Decimal::ZERO);
    }

    #[test]
    fn new_clamps_negative_quantity_and_price() {
        let entry = WorkItemEntry::new("demolition", "m2", dec!(-3), dec!(-10), vec![]);

        assert_eq!(entry.quantity, Decimal::ZERO);
        assert_eq!(entry.labor_price_per_unit, Decimal::ZERO);
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut entry = WorkItemEntry::new("painting", "m2", dec!(20), dec!(15), vec![]);

        entry.apply(WorkItemPatch {
            quantity: Some(dec!(25)),
            ..WorkItemPatch::default()
        });

        assert_eq!(entry.quantity, dec!(25));
        assert_eq!(entry.work_name, "painting");
        assert_eq!(entry.labor_price_per_unit, dec!(15));
    }

    #[test]
    fn apply_clamps_negative_updates() {
        let mut entry = WorkItemEntry::new("painting", "m2", dec!(20), dec!(15), vec![]);

        entry.apply(WorkItemPatch {
            quantity: Some(dec!(-1)),
            labor_price_per_unit: Some(dec!(-5)),
            ..WorkItemPatch::default()
        });

        assert_eq!(entry.quantity, Decimal::ZERO);
        assert_eq!(entry.labor_price_per_unit, Decimal::ZERO);
    }

    #[test]
    fn wire_shape_uses_material_prices_key_and_omits_absent_work_id() {
        let entry = WorkItemEntry::new(
            "painting",
            "m2",
            dec!(20),
            dec!(15),
            vec![MaterialConsumption::new("paint", "l", dec!(0.25), dec!(30))],
        );

        let json = serde_json::to_value(&entry).unwrap();

        assert!(json.get("materialPrices").is_some());
        assert!(json.get("workId").is_none());
        assert_eq!(json["laborPricePerUnit"], serde_json::json!("15"));
    }
}
