mod catalog;
mod draft_estimate;
mod estimate;
mod material_consumption;
mod work_item;

pub use catalog::{CatalogMaterial, LaborPrice, MaterialPrice, RenovationTemplate, Work};
pub use draft_estimate::{BasicInfoPatch, DraftEstimate};
pub use estimate::Estimate;
pub use material_consumption::MaterialConsumption;
pub use work_item::{DraftItem, ItemId, WorkItemEntry, WorkItemPatch};
