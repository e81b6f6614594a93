use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::CreateEstimateRequest;
use crate::costing::{self, CostBreakdown, clamp_percent};
use crate::model::{BasicInfoPatch, DraftEstimate, DraftItem, ItemId, WorkItemEntry, WorkItemPatch};

/// Number of wizard steps: basic info, work selection, prices & quantities,
/// discounts & notes, summary.
pub const STEP_COUNT: usize = 5;

/// The single live draft estimate of a session plus the wizard step it is on.
///
/// This is an explicitly constructed value, not a global: callers own one per
/// session and pass it where it is needed. All operations are total — they
/// mutate or no-op, never fail. The store performs no I/O; persistence wraps
/// it (see [`PersistentSession`](super::PersistentSession)) and submission is
/// a caller concern fed by [`DraftSession::submission_request`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSession {
    draft: DraftEstimate,
    current_step: usize,
    next_item_id: u64,
}

impl DraftSession {
    /// A fresh session: empty draft, step 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DraftEstimate {
        &self.draft
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Merges the fields present in the patch into the investor/contractor
    /// block. Required-field validation is the calling UI's concern.
    pub fn set_basic_info(
        &mut self,
        patch: BasicInfoPatch,
    ) {
        let draft = &mut self.draft;
        if let Some(v) = patch.investor_name {
            draft.investor_name = v;
        }
        if let Some(v) = patch.investor_address {
            draft.investor_address = v;
        }
        if let Some(v) = patch.contractor_name {
            draft.contractor_name = v;
        }
        if let Some(v) = patch.contractor_address {
            draft.contractor_address = v;
        }
        if let Some(v) = patch.contractor_phone {
            draft.contractor_phone = v;
        }
        if let Some(v) = patch.contractor_email {
            draft.contractor_email = v;
        }
    }

    /// Appends an entry and returns its stable id. No de-duplication: adding
    /// the same catalog work twice yields two independent lines.
    pub fn add_work_item(
        &mut self,
        entry: WorkItemEntry,
    ) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        tracing::debug!(item = %id, work = %entry.work_name, "work item added");
        self.draft.items.push(DraftItem { id, entry });
        id
    }

    /// Merges the patch into the item with the given id. Returns false, and
    /// changes nothing, when no such item exists.
    pub fn update_work_item(
        &mut self,
        id: ItemId,
        patch: WorkItemPatch,
    ) -> bool {
        match self.draft.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.entry.apply(patch);
                true
            }
            None => {
                tracing::debug!(item = %id, "update for unknown work item ignored");
                false
            }
        }
    }

    /// Removes the item with the given id; later items keep their ids and
    /// their relative order. Unknown ids are a no-op returning false.
    pub fn remove_work_item(
        &mut self,
        id: ItemId,
    ) -> bool {
        let before = self.draft.items.len();
        self.draft.items.retain(|item| item.id != id);
        self.draft.items.len() != before
    }

    /// Overwrites both discount percentages together, clamped to [0, 100].
    /// Callers changing only one must pass the sibling's current value.
    pub fn set_discounts(
        &mut self,
        material_pct: Decimal,
        labor_pct: Decimal,
    ) {
        self.draft.material_discount_pct = clamp_percent(material_pct);
        self.draft.labor_discount_pct = clamp_percent(labor_pct);
    }

    /// Overwrites both date strings together, same sibling-preservation
    /// requirement as [`DraftSession::set_discounts`].
    pub fn set_dates(
        &mut self,
        valid_until: impl Into<String>,
        start_date: impl Into<String>,
    ) {
        self.draft.valid_until = valid_until.into();
        self.draft.start_date = start_date.into();
    }

    pub fn set_notes(
        &mut self,
        notes: impl Into<String>,
    ) {
        self.draft.notes = notes.into();
    }

    /// Jumps to the given step, clamped to `[0, STEP_COUNT - 1]`.
    pub fn set_current_step(
        &mut self,
        step: usize,
    ) {
        self.current_step = step.min(STEP_COUNT - 1);
    }

    /// Advances one step, clamped at the last step. The store enforces no
    /// completeness gate; that lives in the calling UI.
    pub fn step_forward(&mut self) {
        self.current_step = (self.current_step + 1).min(STEP_COUNT - 1);
    }

    /// Goes back one step, clamped at step 0.
    pub fn step_back(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// Restores the initial empty state; used after a successful submission
    /// or an explicit "start over".
    pub fn reset(&mut self) {
        tracing::debug!("draft session reset");
        *self = Self::default();
    }

    /// Total material cost of the current draft, currency-rounded. Derived on
    /// demand, never cached.
    pub fn material_cost(&self) -> Decimal {
        costing::material_cost(self.draft.work_items())
    }

    /// Total labor cost of the current draft, currency-rounded.
    pub fn labor_cost(&self) -> Decimal {
        costing::labor_cost(self.draft.work_items())
    }

    /// Grand total after discounts.
    pub fn total_cost(&self) -> Decimal {
        self.cost_breakdown().total_cost
    }

    /// The full derived cost set for the current draft.
    pub fn cost_breakdown(&self) -> CostBreakdown {
        costing::cost_breakdown(&self.draft)
    }

    /// Shapes the current draft into the estimate API's creation payload.
    /// Session-local item ids are stripped; empty optional strings become
    /// absent fields; discount percentages are clamped to [0, 100] once more
    /// so a rehydrated out-of-range value never reaches the wire. The store
    /// itself never sends this anywhere.
    pub fn submission_request(&self) -> CreateEstimateRequest {
        let draft = &self.draft;
        CreateEstimateRequest {
            investor_name: draft.investor_name.clone(),
            investor_address: draft.investor_address.clone(),
            contractor_name: non_empty(&draft.contractor_name),
            contractor_address: non_empty(&draft.contractor_address),
            contractor_phone: non_empty(&draft.contractor_phone),
            contractor_email: non_empty(&draft.contractor_email),
            work_items: draft.work_items().cloned().collect(),
            material_discount: clamp_percent(draft.material_discount_pct),
            labor_discount: clamp_percent(draft.labor_discount_pct),
            notes: non_empty(&draft.notes),
            valid_until: non_empty(&draft.valid_until),
            start_date: non_empty(&draft.start_date),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
