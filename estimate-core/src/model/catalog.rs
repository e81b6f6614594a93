use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A material as the catalog describes it for one work: the per-unit
/// consumption rate plus an optional default market price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMaterial {
    pub name: String,
    pub unit: String,
    pub consumption_per_work_unit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_price_per_unit: Option<Decimal>,
}

/// A predefined work from the read-only catalog, used to pre-fill draft
/// entries with default prices and consumption rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub default_labor_price: Decimal,
    pub is_system: bool,
    pub materials: Vec<CatalogMaterial>,
}

/// Market price statistics for one material, scraped from supplier listings.
/// Read-only reference data for sanity-checking entered prices; nothing in
/// the draft links to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPrice {
    pub id: String,
    pub material_name: String,
    pub unit: String,
    pub price_min: Decimal,
    pub price_avg: Decimal,
    pub price_max: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<String>,
}

/// Market rate statistics for one type of work, the labor counterpart of
/// [`MaterialPrice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborPrice {
    pub id: String,
    pub work_type: String,
    pub unit: String,
    pub price_min: Decimal,
    pub price_avg: Decimal,
    pub price_max: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<String>,
}

/// A named bundle of catalog work ids ("bathroom renovation", ...). Expanding
/// a template adds one draft entry per referenced work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenovationTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub is_system: bool,
    pub work_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn material_price_tolerates_absent_optional_fields() {
        let json = r#"{
            "id": "mp-1",
            "materialName": "plaster",
            "unit": "kg",
            "priceMin": "32",
            "priceAvg": "40",
            "priceMax": "51"
        }"#;

        let price: MaterialPrice = serde_json::from_str(json).unwrap();

        assert_eq!(price.material_name, "plaster");
        assert_eq!(price.price_avg, dec!(40));
        assert_eq!(price.source_url, None);
        assert_eq!(price.region, None);
        assert_eq!(price.scraped_at, None);
    }

    #[test]
    fn labor_price_uses_the_work_type_key() {
        let json = r#"{
            "id": "lp-3",
            "workType": "plastering",
            "unit": "m2",
            "priceMin": "20",
            "priceAvg": "25",
            "priceMax": "35",
            "region": "mazowieckie"
        }"#;

        let price: LaborPrice = serde_json::from_str(json).unwrap();

        assert_eq!(price.work_type, "plastering");
        assert_eq!(price.region.as_deref(), Some("mazowieckie"));
    }
}
